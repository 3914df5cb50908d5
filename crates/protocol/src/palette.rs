use serde::{Deserialize, Serialize};

use crate::types::Color;

/// The fixed palette of pastel lamp colors.
///
/// Serialized as the lowercase name so persisted state stays readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Swatch {
    Rose,
    Peach,
    Butter,
    Mint,
    Seafoam,
    Sky,
    Periwinkle,
    Lavender,
    Lilac,
    Blush,
}

impl Swatch {
    /// Every palette entry, in picker order.
    pub const ALL: [Swatch; 10] = [
        Swatch::Rose,
        Swatch::Peach,
        Swatch::Butter,
        Swatch::Mint,
        Swatch::Seafoam,
        Swatch::Sky,
        Swatch::Periwinkle,
        Swatch::Lavender,
        Swatch::Lilac,
        Swatch::Blush,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Rose => "rose",
            Self::Peach => "peach",
            Self::Butter => "butter",
            Self::Mint => "mint",
            Self::Seafoam => "seafoam",
            Self::Sky => "sky",
            Self::Periwinkle => "periwinkle",
            Self::Lavender => "lavender",
            Self::Lilac => "lilac",
            Self::Blush => "blush",
        }
    }

    /// sRGB bytes of the swatch.
    pub const fn rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Rose => (0xff, 0xb3, 0xc1),
            Self::Peach => (0xff, 0xd1, 0xa9),
            Self::Butter => (0xff, 0xf1, 0xa8),
            Self::Mint => (0xb8, 0xf2, 0xc9),
            Self::Seafoam => (0xa8, 0xe6, 0xdc),
            Self::Sky => (0xb3, 0xdc, 0xff),
            Self::Periwinkle => (0xc3, 0xc8, 0xff),
            Self::Lavender => (0xd9, 0xc2, 0xf7),
            Self::Lilac => (0xf0, 0xc2, 0xf2),
            Self::Blush => (0xf7, 0xc6, 0xd0),
        }
    }

    pub fn color(self) -> Color {
        let (r, g, b) = self.rgb();
        Color::from_rgb8(r, g, b)
    }

    pub fn from_index(index: usize) -> Option<Swatch> {
        Self::ALL.get(index).copied()
    }
}

impl std::fmt::Display for Swatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Swatch {
    type Err = UnknownSwatch;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|swatch| swatch.name() == s)
            .ok_or_else(|| UnknownSwatch(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSwatch(pub String);

impl std::fmt::Display for UnknownSwatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown swatch: {}", self.0)
    }
}

impl std::error::Error for UnknownSwatch {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_distinct_entries() {
        let mut seen = std::collections::HashSet::new();
        for s in Swatch::ALL {
            assert!(seen.insert(s.rgb()), "duplicate color for {s}");
        }
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn from_index_follows_all() {
        for (i, s) in Swatch::ALL.iter().enumerate() {
            assert_eq!(Swatch::from_index(i), Some(*s));
        }
        assert_eq!(Swatch::from_index(10), None);
    }

    #[test]
    fn serializes_as_lowercase_name() {
        let json = serde_json::to_string(&Swatch::Periwinkle).unwrap_or_default();
        assert_eq!(json, "\"periwinkle\"");
        let back: Option<Swatch> = serde_json::from_str("\"mint\"").ok();
        assert_eq!(back, Some(Swatch::Mint));
    }

    #[test]
    fn parses_names() {
        assert_eq!("lilac".parse::<Swatch>(), Ok(Swatch::Lilac));
        assert_eq!(
            "teal".parse::<Swatch>(),
            Err(UnknownSwatch("teal".to_string()))
        );
    }
}
