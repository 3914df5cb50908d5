use crate::model::Lamp;

/// Base diameter of a floor light spot, in logical pixels.
pub const SPOT_BASE_SIZE: f64 = 120.0;
/// Extra diameter added at full intensity.
pub const SPOT_SIZE_RANGE: f64 = 100.0;
/// Spot opacity at full intensity.
pub const SPOT_OPACITY_SCALE: f64 = 0.4;

/// How strongly a lamp lights the floor beneath it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualIntensity {
    /// `brightness * glow`.
    pub intensity: f64,
    pub spot_opacity: f64,
    /// Spot diameter in logical pixels.
    pub spot_size: f64,
}

impl VisualIntensity {
    pub fn of(lamp: &Lamp) -> Self {
        Self::from_levels(lamp.brightness, lamp.glow)
    }

    pub fn from_levels(brightness: f64, glow: f64) -> Self {
        let intensity = brightness * glow;
        Self {
            intensity,
            spot_opacity: (intensity * SPOT_OPACITY_SCALE).clamp(0.0, 1.0),
            spot_size: SPOT_BASE_SIZE + intensity * SPOT_SIZE_RANGE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_intensity() {
        let v = VisualIntensity::from_levels(1.0, 1.0);
        assert!((v.intensity - 1.0).abs() < 1e-12);
        assert!((v.spot_opacity - 0.4).abs() < 1e-12);
        assert!((v.spot_size - 220.0).abs() < 1e-12);
    }

    #[test]
    fn lit_lamp() {
        let v = VisualIntensity::from_levels(1.0, 0.8);
        assert!((v.intensity - 0.8).abs() < 1e-12);
        assert!((v.spot_opacity - 0.32).abs() < 1e-12);
        assert!((v.spot_size - 200.0).abs() < 1e-12);
    }

    #[test]
    fn floor_levels() {
        let v = VisualIntensity::from_levels(0.2, 0.1);
        assert!((v.intensity - 0.02).abs() < 1e-12);
        assert!((v.spot_size - 122.0).abs() < 1e-9);
    }
}
