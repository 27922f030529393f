//! Fixed-size 2D tile grid
//!
//! Cells are addressed as (row, column). Save files store cells column by
//! column, so the grid can be built from and iterated in column-major order.

use crate::cell::Cell;

/// Native column count of world grids.
pub const NATIVE_WIDTH: usize = 256;

/// Default height of grids loaded without a fixed height.
pub const DEFAULT_HEIGHT: usize = 256;

/// A world grid with dimensions fixed at creation.
///
/// Out-of-range reads return [`Cell::Empty`] and out-of-range writes are
/// ignored. Brush strokes near the map edge produce such coordinates all the
/// time, so neither is an error.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    /// Row-major storage, `cells[row * width + col]`.
    cells: Vec<Cell>,
    height: usize,
    width: usize,
}

impl Grid {
    /// Create a grid filled with [`Cell::Empty`].
    ///
    /// Callers bound `height`; configured region heights are capped at
    /// [`MAX_COLUMN_HEIGHT`](crate::store::MAX_COLUMN_HEIGHT).
    pub fn empty(height: usize, width: usize) -> Self {
        Self { cells: vec![Cell::Empty; height * width], height, width }
    }

    /// Default grid used when no save file exists.
    ///
    /// `fixed_height x 256` when a height is given, otherwise `256 x 256`.
    pub fn default_for(fixed_height: Option<usize>) -> Self {
        match fixed_height {
            Some(h) if h > 0 => Self::empty(h, NATIVE_WIDTH),
            _ => Self::empty(DEFAULT_HEIGHT, NATIVE_WIDTH),
        }
    }

    /// Build a grid from cells listed in column-major order.
    ///
    /// Cell `i` lands at row `i % height`, column `i / height`. Cells whose
    /// column reaches `width` are dropped; the count of dropped cells is
    /// returned alongside the grid.
    pub fn from_column_major(cells: Vec<Cell>, height: usize, width: usize) -> (Self, usize) {
        let mut grid = Self::empty(height, width);
        let mut dropped = 0;

        if height == 0 {
            return (grid, cells.len());
        }

        for (i, cell) in cells.into_iter().enumerate() {
            let row = i % height;
            let col = i / height;
            if col < width {
                grid.cells[row * width + col] = cell;
            } else {
                dropped += 1;
            }
        }

        (grid, dropped)
    }

    /// Grid height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check whether (row, col) lies inside the grid.
    pub fn contains(&self, row: i64, col: i64) -> bool {
        row >= 0 && col >= 0 && (row as u64) < self.height as u64 && (col as u64) < self.width as u64
    }

    fn index(&self, row: i64, col: i64) -> Option<usize> {
        if self.contains(row, col) {
            Some(row as usize * self.width + col as usize)
        } else {
            None
        }
    }

    /// Read the cell at (row, col), or `Empty` outside the grid.
    pub fn get(&self, row: i64, col: i64) -> Cell {
        self.index(row, col).map(|i| self.cells[i]).unwrap_or(Cell::Empty)
    }

    /// Write the cell at (row, col). Returns `false` without touching the
    /// grid when the coordinates are outside it.
    pub fn set(&mut self, row: i64, col: i64, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Iterate cells in column-major order (down each column, then right).
    pub fn column_major(&self) -> impl Iterator<Item = Cell> + '_ {
        let height = self.height;
        (0..self.cells.len()).map(move |i| {
            let row = i % height;
            let col = i / height;
            self.cells[row * self.width + col]
        })
    }

    /// Iterate `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(i, cell)| (i / width, i % width, *cell))
    }
}
