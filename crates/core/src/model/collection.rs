use lamp_grid_protocol::Swatch;
use rand::Rng;

use crate::error::LoadError;
use crate::model::lamp::{COLUMNS, LAMP_COUNT, Lamp, ROWS, clamp_brightness, clamp_glow};

/// Brightness range used when a lamp's level is re-rolled.
pub const RANDOM_BRIGHTNESS: std::ops::Range<f64> = 0.5..1.0;
/// Glow range used when a lamp's level is re-rolled.
pub const RANDOM_GLOW: std::ops::Range<f64> = 0.3..0.7;

/// The 99 lamps of the grid in row-major order.
///
/// Construction goes through [`LampCollection::generate`] or
/// [`LampCollection::from_lamps`], both of which guarantee the length and id
/// layout; every transformation goes through [`LampCollection::map`], which
/// keeps them.
#[derive(Debug, Clone, PartialEq)]
pub struct LampCollection {
    lamps: Vec<Lamp>,
}

impl LampCollection {
    /// Build a fresh grid: fixed positions, random color and levels, all off.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut lamps = Vec::with_capacity(LAMP_COUNT);
        for row in 0..ROWS {
            for col in 0..COLUMNS {
                lamps.push(Lamp::at(
                    col,
                    row,
                    random_swatch(rng),
                    rng.random_range(RANDOM_BRIGHTNESS),
                    rng.random_range(RANDOM_GLOW),
                ));
            }
        }
        Self { lamps }
    }

    /// Adopt a deserialized lamp list after checking its shape.
    ///
    /// Ids may arrive in any order but must cover `0..LAMP_COUNT` exactly.
    /// Position and size are rebuilt from the grid slot; levels outside
    /// their ranges are clamped rather than rejected.
    pub fn from_lamps(mut lamps: Vec<Lamp>) -> Result<Self, LoadError> {
        if lamps.len() != LAMP_COUNT {
            return Err(LoadError::WrongLength {
                expected: LAMP_COUNT,
                found: lamps.len(),
            });
        }
        lamps.sort_by_key(|l| l.id);
        for (index, lamp) in lamps.iter_mut().enumerate() {
            if lamp.id as usize != index {
                return Err(LoadError::OutOfOrder { index, id: lamp.id });
            }
            let (col, row) = (lamp.grid_col, lamp.grid_row);
            if col >= COLUMNS || row >= ROWS || row * COLUMNS + col != lamp.id {
                return Err(LoadError::Misplaced { id: lamp.id, col, row });
            }
            // Geometry comes from the slot, never from the blob.
            *lamp = Lamp {
                active: lamp.active,
                ..Lamp::at(col, row, lamp.color, lamp.brightness, lamp.glow)
            };
        }
        Ok(Self { lamps })
    }

    pub fn from_json(raw: &str) -> Result<Self, LoadError> {
        let lamps: Vec<Lamp> = serde_json::from_str(raw)?;
        Self::from_lamps(lamps)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.lamps)
    }

    /// Apply `f` to every lamp, producing a new collection.
    ///
    /// Fixed attributes are restored from the original lamp and levels are
    /// clamped, so a transform cannot break the collection's invariants.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&Lamp) -> Lamp,
    {
        let lamps = self
            .lamps
            .iter()
            .map(|old| {
                let new = f(old);
                Lamp {
                    id: old.id,
                    grid_col: old.grid_col,
                    grid_row: old.grid_row,
                    x: old.x,
                    y: old.y,
                    size: old.size,
                    brightness: clamp_brightness(new.brightness),
                    glow: clamp_glow(new.glow),
                    color: new.color,
                    active: new.active,
                }
            })
            .collect();
        Self { lamps }
    }

    pub fn lamps(&self) -> &[Lamp] {
        &self.lamps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lamp> {
        self.lamps.iter()
    }

    /// Look up a lamp by id.
    pub fn get(&self, id: u32) -> Option<&Lamp> {
        // Ids equal indices once validated.
        self.lamps.get(id as usize).filter(|l| l.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.lamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lamps.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.lamps.iter().filter(|l| l.active).count()
    }
}

impl<'a> IntoIterator for &'a LampCollection {
    type Item = &'a Lamp;
    type IntoIter = std::slice::Iter<'a, Lamp>;

    fn into_iter(self) -> Self::IntoIter {
        self.lamps.iter()
    }
}

pub fn random_swatch<R: Rng + ?Sized>(rng: &mut R) -> Swatch {
    Swatch::ALL[rng.random_range(0..Swatch::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::lamp::LAMP_SIZE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    #[test]
    fn generate_builds_full_grid() {
        let c = LampCollection::generate(&mut rng());
        assert_eq!(c.len(), LAMP_COUNT);
        for (i, lamp) in c.iter().enumerate() {
            assert_eq!(lamp.id as usize, i);
            assert!(!lamp.active);
            assert!(RANDOM_BRIGHTNESS.contains(&lamp.brightness));
            assert!(RANDOM_GLOW.contains(&lamp.glow));
        }
    }

    #[test]
    fn generate_is_deterministic_per_seed() {
        let a = LampCollection::generate(&mut StdRng::seed_from_u64(1));
        let b = LampCollection::generate(&mut StdRng::seed_from_u64(1));
        let c = LampCollection::generate(&mut StdRng::seed_from_u64(2));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn json_roundtrip_preserves_lamps() {
        let c = LampCollection::generate(&mut rng());
        let json = c.to_json().unwrap_or_default();
        let back = LampCollection::from_json(&json);
        assert_eq!(back.ok(), Some(c));
    }

    #[test]
    fn rejects_unparseable_json() {
        assert!(matches!(
            LampCollection::from_json("{not json"),
            Err(LoadError::Malformed(_))
        ));
    }

    #[test]
    fn rejects_short_collection() {
        let c = LampCollection::generate(&mut rng());
        let short: Vec<Lamp> = c.iter().take(98).cloned().collect();
        assert!(matches!(
            LampCollection::from_lamps(short),
            Err(LoadError::WrongLength { found: 98, .. })
        ));
    }

    #[test]
    fn accepts_shuffled_ids() {
        let c = LampCollection::generate(&mut rng());
        let mut lamps: Vec<Lamp> = c.iter().cloned().collect();
        lamps.swap(0, 1);
        lamps.reverse();
        assert_eq!(LampCollection::from_lamps(lamps).ok(), Some(c));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let c = LampCollection::generate(&mut rng());
        let mut lamps: Vec<Lamp> = c.iter().cloned().collect();
        lamps[0].id = 1;
        assert!(matches!(
            LampCollection::from_lamps(lamps),
            Err(LoadError::OutOfOrder { index: 0, id: 1 })
        ));
    }

    #[test]
    fn rejects_rows_past_the_grid() {
        let c = LampCollection::generate(&mut rng());
        let mut lamps: Vec<Lamp> = c.iter().cloned().collect();
        lamps[0].grid_row = u32::MAX;
        assert!(matches!(
            LampCollection::from_lamps(lamps),
            Err(LoadError::Misplaced { id: 0, row: u32::MAX, .. })
        ));
    }

    #[test]
    fn rejects_columns_past_the_grid() {
        let c = LampCollection::generate(&mut rng());
        let mut lamps: Vec<Lamp> = c.iter().cloned().collect();
        // Column 11 of row 0 would alias lamp 11 by arithmetic alone.
        lamps[11].grid_col = COLUMNS;
        lamps[11].grid_row = 0;
        assert!(matches!(
            LampCollection::from_lamps(lamps),
            Err(LoadError::Misplaced { id: 11, .. })
        ));
    }

    #[test]
    fn load_rebuilds_geometry_from_slot() {
        let c = LampCollection::generate(&mut rng());
        let mut lamps: Vec<Lamp> = c.iter().cloned().collect();
        lamps[5].size = -10.0;
        lamps[5].x = 9000.0;
        lamps[5].y = f64::NAN;
        let loaded = LampCollection::from_lamps(lamps).ok();
        let lamp = loaded.as_ref().and_then(|c| c.get(5));
        let expected = c.get(5);
        assert!(lamp.zip(expected).is_some_and(|(a, b)| a.same_slot(b)));
        assert_eq!(lamp.map(|l| l.size), Some(LAMP_SIZE));
    }

    #[test]
    fn clamps_out_of_range_levels_on_load() {
        let c = LampCollection::generate(&mut rng());
        let mut lamps: Vec<Lamp> = c.iter().cloned().collect();
        lamps[4].brightness = 7.0;
        lamps[4].glow = 0.0;
        let loaded = LampCollection::from_lamps(lamps).ok();
        let lamp = loaded.as_ref().and_then(|c| c.get(4));
        assert_eq!(lamp.map(|l| l.brightness), Some(1.0));
        assert_eq!(lamp.map(|l| l.glow), Some(0.1));
    }

    #[test]
    fn map_cannot_move_lamps() {
        let c = LampCollection::generate(&mut rng());
        let moved = c.map(|l| Lamp {
            id: 500,
            x: -3.0,
            size: 1.0,
            brightness: 9.0,
            ..l.clone()
        });
        for (a, b) in c.iter().zip(moved.iter()) {
            assert!(a.same_slot(b));
            assert_eq!(b.brightness, 1.0);
        }
    }

    #[test]
    fn lookup_by_id() {
        let c = LampCollection::generate(&mut rng());
        assert_eq!(c.get(42).map(|l| l.id), Some(42));
        assert!(c.get(99).is_none());
        assert!(!c.contains(1000));
    }
}
