//! World loading, rendering and saving for editor front ends
//!
//! [`World`] bundles the three grids with the lore names and is the surface
//! an editor talks to: read and paint cells, render a frame, describe a tile
//! under the cursor, save.

use crate::cell::Cell;
use crate::codec::GridIoError;
use crate::grid::Grid;
use crate::lore::{LoreError, LoreIndex};
use crate::palette::{modifier_name, BiomePalette};
use crate::renderer::{render_frame, HighlightStyle};
use crate::store::{GridKind, GridStore, WorldPaths};
use image::RgbImage;
use log::info;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// Error type for world loading and saving
#[derive(Debug, Error)]
pub enum WorldError {
    #[error(transparent)]
    Grid(#[from] GridIoError),
    #[error(transparent)]
    Lore(#[from] LoreError),
}

/// Loaded world state.
#[derive(Debug, Clone)]
pub struct World {
    pub grids: GridStore,
    pub lore: LoreIndex,
}

/// Load the three grids and the lore names.
///
/// Missing files are not errors: grids default to empty and lore lists to
/// empty.
pub fn load_world(paths: &WorldPaths, column_height: usize) -> Result<World, WorldError> {
    let grids = GridStore::load_all(paths, column_height)?;
    let lore = LoreIndex::load(&paths.lore)?;
    info!(
        "loaded world: biome {}x{}, regions {}x{}, {} region names",
        grids.biome.height(),
        grids.biome.width(),
        grids.region.height(),
        grids.region.width(),
        lore.region_names.len()
    );
    Ok(World { grids, lore })
}

impl World {
    /// Cell at column `x`, row `y`; `Empty` outside the grid.
    pub fn cell_at(&self, kind: GridKind, x: i64, y: i64) -> Cell {
        self.grids.get_cell(kind, y, x)
    }

    /// Paint column `x`, row `y`. Returns `false` (no change) outside the grid.
    pub fn paint_cell(&mut self, kind: GridKind, x: i64, y: i64, cell: Cell) -> bool {
        self.grids.set_cell(kind, y, x, cell)
    }

    /// Render the biome map with an optional greater-region highlight.
    pub fn render_frame(
        &self,
        palette: &BiomePalette,
        highlight: Option<i64>,
        style: &HighlightStyle,
    ) -> RgbImage {
        render_frame(&self.grids.biome, &self.grids.greater_region, highlight, palette, style)
    }

    /// Write all three grids. The lore file is never written.
    pub fn save(&self, paths: &WorldPaths) -> Result<(), WorldError> {
        self.grids.save_all(paths)?;
        Ok(())
    }

    /// One-line description of the tile at column `x`, row `y`.
    ///
    /// Returns `None` outside the biome grid. Ids without a lore or palette
    /// entry are shown as `Unknown(<id>)`.
    pub fn describe_tile(&self, palette: &BiomePalette, x: i64, y: i64) -> Option<String> {
        if !self.grids.biome.contains(y, x) {
            return None;
        }

        let biome = self.cell_at(GridKind::Biome, x, y);
        let region = self.cell_at(GridKind::Region, x, y);
        let greater = self.cell_at(GridKind::GreaterRegion, x, y);

        let mut text = format!(
            "Region: {} | Greater Region: {}",
            self.lore.region_cell_label(region),
            self.lore.greater_region_cell_label(greater)
        );

        match biome.value() {
            Some(id) => text.push_str(&format!(" | Biome: {}", palette.label(id))),
            None => text.push_str(" | Biome: None"),
        }

        if let Some(modifier) = biome.modifier() {
            match modifier_name(modifier) {
                Some(name) => text.push_str(&format!(" | Biome Mod: {}", name)),
                None => text.push_str(&format!(" | Biome Mod: {}", modifier)),
            }
        }

        Some(text)
    }

    /// Per-grid statistics.
    pub fn summary(&self) -> WorldSummary {
        WorldSummary {
            biome: GridSummary::of(self.grids.grid(GridKind::Biome)),
            region: GridSummary::of(self.grids.grid(GridKind::Region)),
            greater_region: GridSummary::of(self.grids.grid(GridKind::GreaterRegion)),
            region_names: self.lore.region_names.clone(),
            greater_region_names: self.lore.greater_region_names.clone(),
        }
    }
}

/// Dimensions and cell counts of one grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridSummary {
    pub height: usize,
    pub width: usize,
    pub empty: usize,
    pub tagged: usize,
    /// Cells per id, tagged or not
    pub counts: BTreeMap<i64, usize>,
}

impl GridSummary {
    pub fn of(grid: &Grid) -> Self {
        let mut summary = Self {
            height: grid.height(),
            width: grid.width(),
            empty: 0,
            tagged: 0,
            counts: BTreeMap::new(),
        };

        for (_, _, cell) in grid.iter() {
            match cell {
                Cell::Empty => summary.empty += 1,
                Cell::Scalar(v) => *summary.counts.entry(v).or_insert(0) += 1,
                Cell::Tagged(v, _) => {
                    summary.tagged += 1;
                    *summary.counts.entry(v).or_insert(0) += 1;
                }
            }
        }

        summary
    }
}

/// Statistics for the whole world, as reported by `realm info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldSummary {
    pub biome: GridSummary,
    pub region: GridSummary,
    pub greater_region: GridSummary,
    pub region_names: Vec<String>,
    pub greater_region_names: Vec<String>,
}
