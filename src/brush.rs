//! Paint brush strokes over the world grids
//!
//! A stroke covers a square of `(2 * radius - 1)` tiles per side centred on
//! the target tile and can write the biome, region and greater-region grids
//! in one pass.

use crate::cell::{Cell, EMPTY_SENTINEL};
use crate::store::{GridKind, GridStore};

/// Largest brush radius. Larger radii are clamped to it.
pub const MAX_RADIUS: u32 = 1024;

/// How a stroke treats biome modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifierBrush {
    /// Leave modifiers alone; paint the plain biome if one is selected
    #[default]
    Keep,
    /// Tag tiles with this modifier
    Apply(i64),
    /// Strip modifiers, keeping the biome id
    Erase,
}

/// Current brush selection.
///
/// `None` fields leave the corresponding grid untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brush {
    pub biome: Option<i64>,
    pub modifier: ModifierBrush,
    pub region: Option<i64>,
    pub greater_region: Option<i64>,
    /// Brush radius, 1 (a single tile) to [`MAX_RADIUS`]
    pub radius: u32,
}

impl Default for Brush {
    fn default() -> Self {
        Self { biome: None, modifier: ModifierBrush::Keep, region: None, greater_region: None, radius: 1 }
    }
}

impl Brush {
    /// Brush that clears the greater region of painted tiles.
    pub fn clear_greater_region(mut self) -> Self {
        self.greater_region = Some(EMPTY_SENTINEL);
        self
    }

    /// Tiles covered by a stroke at (x, y), including ones off the map.
    pub fn footprint(&self, x: i64, y: i64) -> impl Iterator<Item = (i64, i64)> {
        let reach = i64::from(self.radius.clamp(1, MAX_RADIUS)) - 1;
        (-reach..=reach).flat_map(move |dx| (-reach..=reach).map(move |dy| (x + dx, y + dy)))
    }

    /// New biome cell for a tile, or `None` to leave it as is.
    fn paint_biome(&self, current: Cell) -> Option<Cell> {
        match self.modifier {
            ModifierBrush::Erase => match current {
                Cell::Tagged(..) => Some(current.without_modifier()),
                _ => None,
            },
            ModifierBrush::Apply(modifier) => match self.biome {
                Some(biome) => Some(Cell::Tagged(biome, modifier)),
                None => current.with_modifier(modifier),
            },
            ModifierBrush::Keep => self.biome.map(Cell::Scalar),
        }
    }

    /// Apply a stroke centred on tile (x, y).
    ///
    /// Tiles outside the biome grid are skipped. Region writes that fall
    /// outside the (possibly shorter) region grids are ignored. Returns the
    /// number of tiles painted.
    pub fn apply(&self, store: &mut GridStore, x: i64, y: i64) -> usize {
        let mut painted = 0;

        for (nx, ny) in self.footprint(x, y) {
            if !store.biome.contains(ny, nx) {
                continue;
            }

            if let Some(cell) = self.paint_biome(store.biome.get(ny, nx)) {
                store.biome.set(ny, nx, cell);
            }
            if let Some(region) = self.region {
                store.set_cell(GridKind::Region, ny, nx, Cell::Scalar(region));
            }
            if let Some(greater) = self.greater_region {
                store.set_cell(GridKind::GreaterRegion, ny, nx, Cell::Scalar(greater));
            }
            painted += 1;
        }

        painted
    }
}
