//! Biome colors and names.
//!
//! The palette is built once at startup and passed by reference to the
//! renderer and tile descriptions.

use crate::cell::TAINTED_MODIFIER;
use image::Rgb;

/// One biome entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Biome {
    pub name: &'static str,
    pub color: Rgb<u8>,
}

const BUILTIN_BIOMES: [(&str, [u8; 3]); 12] = [
    ("Desert", [245, 196, 110]),
    ("Savanna", [204, 174, 77]),
    ("Jungle", [66, 135, 40]),
    ("Grassland", [184, 179, 82]),
    ("Woodland", [119, 155, 70]),
    ("Lush Forest", [70, 128, 70]),
    ("Swamp", [59, 108, 79]),
    ("Boreal Forest", [70, 128, 70]),
    ("Hills", [131, 160, 131]),
    ("Mountains", [245, 245, 255]),
    ("Deep Water", [15, 55, 100]),
    ("Shallow Water", [39, 75, 116]),
];

/// Neutral gray for unknown or unassigned biomes.
pub const FALLBACK_COLOR: Rgb<u8> = Rgb([100, 100, 100]);

/// Tint mixed into tainted biomes.
pub const TAINT_COLOR: Rgb<u8> = Rgb([90, 0, 120]);

/// Biome id -> color/name table plus the modifier tint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BiomePalette {
    biomes: Vec<Biome>,
    fallback: Rgb<u8>,
    taint: Rgb<u8>,
}

impl Default for BiomePalette {
    fn default() -> Self {
        Self {
            biomes: BUILTIN_BIOMES
                .iter()
                .map(|&(name, rgb)| Biome { name, color: Rgb(rgb) })
                .collect(),
            fallback: FALLBACK_COLOR,
            taint: TAINT_COLOR,
        }
    }
}

impl BiomePalette {
    /// Look up a biome by id.
    pub fn get(&self, id: i64) -> Option<&Biome> {
        usize::try_from(id).ok().and_then(|i| self.biomes.get(i))
    }

    /// All biomes, indexed by id.
    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    /// Color for a biome id; unknown and missing ids use the fallback gray.
    pub fn color(&self, id: Option<i64>) -> Rgb<u8> {
        id.and_then(|id| self.get(id)).map(|b| b.color).unwrap_or(self.fallback)
    }

    pub fn taint(&self) -> Rgb<u8> {
        self.taint
    }

    /// Display label `Name(id)`, or `Unknown(id)`.
    pub fn label(&self, id: i64) -> String {
        match self.get(id) {
            Some(biome) => format!("{}({})", biome.name, id),
            None => format!("Unknown({})", id),
        }
    }
}

/// Display name of a biome modifier, when it has one.
pub fn modifier_name(modifier: i64) -> Option<&'static str> {
    match modifier {
        TAINTED_MODIFIER => Some("Dreadlands"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_entries() {
        let palette = BiomePalette::default();
        assert_eq!(palette.biomes().len(), 12);
        assert_eq!(palette.get(2).map(|b| b.name), Some("Jungle"));
        assert_eq!(palette.color(Some(2)), Rgb([66, 135, 40]));
        assert_eq!(palette.color(Some(11)), Rgb([39, 75, 116]));
    }

    #[test]
    fn test_fallback_color() {
        let palette = BiomePalette::default();
        assert_eq!(palette.color(None), FALLBACK_COLOR);
        assert_eq!(palette.color(Some(12)), FALLBACK_COLOR);
        assert_eq!(palette.color(Some(-1)), FALLBACK_COLOR);
    }

    #[test]
    fn test_labels() {
        let palette = BiomePalette::default();
        assert_eq!(palette.label(9), "Mountains(9)");
        assert_eq!(palette.label(40), "Unknown(40)");
        assert_eq!(modifier_name(12), Some("Dreadlands"));
        assert_eq!(modifier_name(3), None);
    }
}
