//! In-memory owner of the three world grids

use crate::cell::Cell;
use crate::codec::{load_grid, save_grid, GridIoError};
use crate::grid::Grid;
use log::info;
use std::fmt;
use std::path::{Path, PathBuf};

/// Default height of the region and greater-region grids.
pub const DEFAULT_COLUMN_HEIGHT: usize = 224;

/// Largest accepted region grid height.
pub const MAX_COLUMN_HEIGHT: usize = 4096;

/// Which world grid an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridKind {
    Biome,
    Region,
    GreaterRegion,
}

impl GridKind {
    pub const ALL: [GridKind; 3] = [GridKind::Biome, GridKind::Region, GridKind::GreaterRegion];

    /// Default save file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            GridKind::Biome => "biomeGrid.save",
            GridKind::Region => "regionGrid.save",
            GridKind::GreaterRegion => "greaterRegionGrid.save",
        }
    }

    /// Fixed height used when loading this grid. Biome grids infer theirs.
    pub fn fixed_height(&self, column_height: usize) -> Option<usize> {
        match self {
            GridKind::Biome => None,
            GridKind::Region | GridKind::GreaterRegion => Some(column_height),
        }
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridKind::Biome => write!(f, "biome"),
            GridKind::Region => write!(f, "region"),
            GridKind::GreaterRegion => write!(f, "greater region"),
        }
    }
}

/// Locations of the world's save files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldPaths {
    pub biome: PathBuf,
    pub region: PathBuf,
    pub greater_region: PathBuf,
    pub lore: PathBuf,
}

impl WorldPaths {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            biome: dir.join(GridKind::Biome.file_name()),
            region: dir.join(GridKind::Region.file_name()),
            greater_region: dir.join(GridKind::GreaterRegion.file_name()),
            lore: dir.join("Lore.save"),
        }
    }

    /// Save file of a grid.
    pub fn grid(&self, kind: GridKind) -> &Path {
        match kind {
            GridKind::Biome => &self.biome,
            GridKind::Region => &self.region,
            GridKind::GreaterRegion => &self.greater_region,
        }
    }
}

/// The three live grids of a world.
///
/// Cell access never fails: reads outside a grid return `Empty` and writes
/// outside it are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct GridStore {
    pub biome: Grid,
    pub region: Grid,
    pub greater_region: Grid,
}

impl GridStore {
    pub fn new(biome: Grid, region: Grid, greater_region: Grid) -> Self {
        Self { biome, region, greater_region }
    }

    /// Empty default grids, as if no save files existed.
    pub fn empty(column_height: usize) -> Self {
        Self {
            biome: Grid::default_for(GridKind::Biome.fixed_height(column_height)),
            region: Grid::default_for(GridKind::Region.fixed_height(column_height)),
            greater_region: Grid::default_for(GridKind::GreaterRegion.fixed_height(column_height)),
        }
    }

    pub fn grid(&self, kind: GridKind) -> &Grid {
        match kind {
            GridKind::Biome => &self.biome,
            GridKind::Region => &self.region,
            GridKind::GreaterRegion => &self.greater_region,
        }
    }

    pub fn grid_mut(&mut self, kind: GridKind) -> &mut Grid {
        match kind {
            GridKind::Biome => &mut self.biome,
            GridKind::Region => &mut self.region,
            GridKind::GreaterRegion => &mut self.greater_region,
        }
    }

    pub fn get_cell(&self, kind: GridKind, row: i64, col: i64) -> Cell {
        self.grid(kind).get(row, col)
    }

    /// Write a cell; returns `false` if (row, col) is outside the grid.
    pub fn set_cell(&mut self, kind: GridKind, row: i64, col: i64, cell: Cell) -> bool {
        self.grid_mut(kind).set(row, col, cell)
    }

    /// Load all three grids. Missing files yield empty defaults.
    pub fn load_all(paths: &WorldPaths, column_height: usize) -> Result<Self, GridIoError> {
        let load = |kind: GridKind| load_grid(paths.grid(kind), kind.fixed_height(column_height));
        Ok(Self {
            biome: load(GridKind::Biome)?,
            region: load(GridKind::Region)?,
            greater_region: load(GridKind::GreaterRegion)?,
        })
    }

    /// Re-encode and write all three grids, stopping at the first failure.
    pub fn save_all(&self, paths: &WorldPaths) -> Result<(), GridIoError> {
        for kind in GridKind::ALL {
            save_grid(self.grid(kind), paths.grid(kind))?;
        }
        info!("saved all grids");
        Ok(())
    }
}
