//! Pure transformations of a [`LampCollection`].
//!
//! Each operation takes the current collection and returns a new one; the
//! store decides what to do with the result. Randomness comes in through
//! the `rng` argument so callers can seed it.

use lamp_grid_protocol::{GlobalAction, Swatch};
use rand::Rng;

use crate::model::collection::{RANDOM_BRIGHTNESS, RANDOM_GLOW, random_swatch};
use crate::model::{BRIGHTNESS_MAX, BRIGHTNESS_MIN, GLOW_MAX, GLOW_MIN, Lamp, LampCollection};

pub const LIT_BRIGHTNESS: f64 = 1.0;
pub const LIT_GLOW: f64 = 0.8;
pub const UNLIT_BRIGHTNESS: f64 = 0.5;
pub const UNLIT_GLOW: f64 = 0.3;
/// Brighten/dim increment.
pub const STEP: f64 = 0.1;

/// Flip one lamp on or off.
///
/// Turning on lights it fully with a fresh random color; turning off drops
/// it to a low idle level and keeps the color. Returns `None` when no lamp
/// has `id`.
pub fn toggle<R: Rng + ?Sized>(
    lamps: &LampCollection,
    id: u32,
    rng: &mut R,
) -> Option<LampCollection> {
    if !lamps.contains(id) {
        return None;
    }
    Some(lamps.map(|lamp| {
        if lamp.id != id {
            return lamp.clone();
        }
        if lamp.active {
            Lamp {
                active: false,
                brightness: UNLIT_BRIGHTNESS,
                glow: UNLIT_GLOW,
                ..lamp.clone()
            }
        } else {
            Lamp {
                active: true,
                brightness: LIT_BRIGHTNESS,
                glow: LIT_GLOW,
                color: random_swatch(rng),
                ..lamp.clone()
            }
        }
    }))
}

/// Paint one lamp and light it. Returns `None` when no lamp has `id`.
pub fn set_color(lamps: &LampCollection, id: u32, color: Swatch) -> Option<LampCollection> {
    if !lamps.contains(id) {
        return None;
    }
    Some(lamps.map(|lamp| {
        if lamp.id != id {
            return lamp.clone();
        }
        Lamp {
            color,
            active: true,
            brightness: LIT_BRIGHTNESS,
            glow: LIT_GLOW,
            ..lamp.clone()
        }
    }))
}

/// Apply a global action to every lamp.
pub fn apply_global<R: Rng + ?Sized>(
    lamps: &LampCollection,
    action: GlobalAction,
    rng: &mut R,
) -> LampCollection {
    match action {
        GlobalAction::Brighten => lamps.map(|lamp| Lamp {
            brightness: (lamp.brightness + STEP).min(BRIGHTNESS_MAX),
            glow: (lamp.glow + STEP).min(GLOW_MAX),
            ..lamp.clone()
        }),
        GlobalAction::Dim => lamps.map(|lamp| Lamp {
            brightness: (lamp.brightness - STEP).max(BRIGHTNESS_MIN),
            glow: (lamp.glow - STEP).max(GLOW_MIN),
            ..lamp.clone()
        }),
        GlobalAction::Randomize => lamps.map(|lamp| Lamp {
            color: random_swatch(rng),
            brightness: rng.random_range(RANDOM_BRIGHTNESS),
            glow: rng.random_range(RANDOM_GLOW),
            ..lamp.clone()
        }),
        GlobalAction::Reset => lamps.map(|lamp| Lamp {
            active: false,
            brightness: rng.random_range(RANDOM_BRIGHTNESS),
            glow: rng.random_range(RANDOM_GLOW),
            ..lamp.clone()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LAMP_COUNT;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn setup() -> (LampCollection, StdRng) {
        let mut rng = StdRng::seed_from_u64(99);
        (LampCollection::generate(&mut rng), rng)
    }

    fn with_levels(lamps: &LampCollection, brightness: f64, glow: f64) -> LampCollection {
        lamps.map(|l| Lamp {
            brightness,
            glow,
            ..l.clone()
        })
    }

    #[test]
    fn toggle_on_lights_fully() {
        let (lamps, mut rng) = setup();
        let next = toggle(&lamps, 10, &mut rng);
        let lamp = next.as_ref().and_then(|c| c.get(10));
        assert_eq!(lamp.map(|l| l.active), Some(true));
        assert_eq!(lamp.map(|l| l.brightness), Some(LIT_BRIGHTNESS));
        assert_eq!(lamp.map(|l| l.glow), Some(LIT_GLOW));
    }

    #[test]
    fn toggle_off_keeps_color() {
        let (lamps, mut rng) = setup();
        let Some(on) = toggle(&lamps, 10, &mut rng) else {
            panic!("lamp 10 exists");
        };
        let color = on.get(10).map(|l| l.color);
        let Some(off) = toggle(&on, 10, &mut rng) else {
            panic!("lamp 10 exists");
        };
        let lamp = off.get(10);
        assert_eq!(lamp.map(|l| l.active), Some(false));
        assert_eq!(lamp.map(|l| l.brightness), Some(UNLIT_BRIGHTNESS));
        assert_eq!(lamp.map(|l| l.glow), Some(UNLIT_GLOW));
        assert_eq!(lamp.map(|l| l.color), color);
    }

    #[test]
    fn toggle_touches_only_its_lamp() {
        let (lamps, mut rng) = setup();
        let Some(next) = toggle(&lamps, 50, &mut rng) else {
            panic!("lamp 50 exists");
        };
        for (a, b) in lamps.iter().zip(next.iter()) {
            if a.id != 50 {
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn toggle_unknown_id_is_none() {
        let (lamps, mut rng) = setup();
        assert!(toggle(&lamps, 99, &mut rng).is_none());
        assert!(toggle(&lamps, u32::MAX, &mut rng).is_none());
    }

    #[test]
    fn set_color_lights_lamp() {
        let (lamps, _) = setup();
        let next = set_color(&lamps, 3, Swatch::Lilac);
        let lamp = next.as_ref().and_then(|c| c.get(3));
        assert_eq!(lamp.map(|l| l.color), Some(Swatch::Lilac));
        assert_eq!(lamp.map(|l| l.active), Some(true));
        assert_eq!(lamp.map(|l| l.brightness), Some(LIT_BRIGHTNESS));
        assert_eq!(lamp.map(|l| l.glow), Some(LIT_GLOW));
    }

    #[test]
    fn brighten_saturates_at_one() {
        let (lamps, mut rng) = setup();
        let mut lamps = with_levels(&lamps, 0.95, 0.95);
        for _ in 0..5 {
            lamps = apply_global(&lamps, GlobalAction::Brighten, &mut rng);
        }
        for lamp in &lamps {
            assert_eq!(lamp.brightness, 1.0);
            assert_eq!(lamp.glow, 1.0);
        }
    }

    #[test]
    fn dim_saturates_at_floor() {
        let (lamps, mut rng) = setup();
        let mut lamps = with_levels(&lamps, 0.35, 0.25);
        for _ in 0..10 {
            lamps = apply_global(&lamps, GlobalAction::Dim, &mut rng);
        }
        for lamp in &lamps {
            assert_eq!(lamp.brightness, BRIGHTNESS_MIN);
            assert_eq!(lamp.glow, GLOW_MIN);
        }
    }

    #[test]
    fn randomize_rerolls_levels_in_range() {
        let (lamps, mut rng) = setup();
        let lamps = with_levels(&lamps, 0.2, 0.1);
        let next = apply_global(&lamps, GlobalAction::Randomize, &mut rng);
        for lamp in &next {
            assert!(RANDOM_BRIGHTNESS.contains(&lamp.brightness));
            assert!(RANDOM_GLOW.contains(&lamp.glow));
        }
    }

    #[test]
    fn reset_turns_everything_off_and_keeps_colors() {
        let (lamps, mut rng) = setup();
        let lit = lamps.map(|l| Lamp {
            active: true,
            ..l.clone()
        });
        let next = apply_global(&lit, GlobalAction::Reset, &mut rng);
        assert_eq!(next.len(), LAMP_COUNT);
        for (before, after) in lit.iter().zip(next.iter()) {
            assert!(!after.active);
            assert_eq!(before.color, after.color);
            assert!(RANDOM_BRIGHTNESS.contains(&after.brightness));
            assert!(RANDOM_GLOW.contains(&after.glow));
        }
    }
}
