//! Text codec for world grid save files
//!
//! A save file is a single bracketed, comma-joined list of tokens written in
//! column-major order:
//!
//! ```text
//! [3,3,[2,12],-4.0,11,...]
//! ```
//!
//! - `[I,J]` is a biome id with a modifier
//! - a bare number is a plain id
//! - `-4.0` (or `-4`) marks an empty tile
//!
//! Decoding is pattern-driven rather than split on commas: anything that is
//! neither a pair nor a number is skipped, so hand-edited files still load.

use crate::cell::{Cell, EMPTY_LITERAL, EMPTY_SENTINEL};
use crate::grid::{Grid, NATIVE_WIDTH};
use log::{debug, info, warn};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use thiserror::Error;

/// Error type for grid file I/O.
///
/// A missing file is not an error: loading falls back to an empty grid.
#[derive(Debug, Error)]
pub enum GridIoError {
    /// The file exists but could not be read
    #[error("failed to read grid '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The save destination could not be written
    #[error("failed to write grid '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\[(\d+\.?\d*),(\d+\.?\d*)\]|(-?\d+\.?\d*)").expect("token pattern is valid")
    })
}

/// Parse a decimal literal and truncate it toward zero.
fn parse_truncated(literal: &str) -> Option<i64> {
    let int_part = literal.split('.').next().unwrap_or(literal);
    int_part.parse::<i64>().ok().or_else(|| literal.parse::<f64>().ok().map(|f| f.trunc() as i64))
}

/// Extract cells from the body of a grid file.
///
/// # Examples
///
/// ```
/// use realmgrid::cell::Cell;
/// use realmgrid::codec::tokenize;
///
/// let cells = tokenize("3,[2,12],-4.0, x 7.0");
/// assert_eq!(
///     cells,
///     vec![Cell::Scalar(3), Cell::Tagged(2, 12), Cell::Empty, Cell::Scalar(7)]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<Cell> {
    let mut cells = Vec::new();

    for caps in token_pattern().captures_iter(text) {
        let cell = match (caps.get(1), caps.get(2), caps.get(3)) {
            (Some(value), Some(modifier), _) => {
                match (parse_truncated(value.as_str()), parse_truncated(modifier.as_str())) {
                    (Some(v), Some(m)) => Some(Cell::Tagged(v, m)),
                    _ => None,
                }
            }
            (_, _, Some(number)) => parse_truncated(number.as_str()).map(|v| {
                if v == EMPTY_SENTINEL {
                    Cell::Empty
                } else {
                    Cell::Scalar(v)
                }
            }),
            _ => None,
        };

        match cell {
            Some(cell) => cells.push(cell),
            None => debug!("skipping unparseable token '{}'", &caps[0]),
        }
    }

    cells
}

/// Strip one surrounding `[`...`]` pair, if both ends are present.
fn strip_outer_brackets(text: &str) -> &str {
    let trimmed = text.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        &trimmed[1..trimmed.len() - 1]
    } else {
        trimmed
    }
}

/// Decode a grid from save-file text.
///
/// # Size Inference
///
/// - `height` = `fixed_height`, or `ceil(tokens / 256)` when none is given
/// - `width` = `tokens / height` (floor)
///
/// Tokens past `height * width` are dropped with a warning. With a fixed
/// height, fewer tokens than one column give a `height x 0` grid, which
/// encodes as `[]` and decodes back to the same shape. Input with no tokens
/// and no fixed height, or a zero `fixed_height`, yields the default grid.
///
/// # Examples
///
/// ```
/// use realmgrid::cell::Cell;
/// use realmgrid::codec::decode;
///
/// let grid = decode("[1,2,3,4,5,6]", Some(2));
/// assert_eq!((grid.height(), grid.width()), (2, 3));
/// assert_eq!(grid.get(0, 1), Cell::Scalar(3));
/// assert_eq!(grid.get(1, 0), Cell::Scalar(2));
/// ```
pub fn decode(text: &str, fixed_height: Option<usize>) -> Grid {
    let cells = tokenize(strip_outer_brackets(text));
    let count = cells.len();

    let height = match fixed_height {
        Some(0) => {
            warn!("fixed height of 0 requested, using default grid size");
            return Grid::default_for(None);
        }
        Some(h) => h,
        None => count.div_ceil(NATIVE_WIDTH),
    };

    if height == 0 {
        debug!("no tokens found, using default grid size");
        return Grid::default_for(None);
    }

    let width = count / height;
    let (grid, dropped) = Grid::from_column_major(cells, height, width);
    if dropped > 0 {
        warn!(
            "{} tokens do not fill a {}-row column, dropped {} trailing token(s)",
            count, height, dropped
        );
    }
    debug!("decoded {} tokens into {}x{} grid", count, height, width);

    grid
}

/// Encode a grid into save-file text.
///
/// Inverse of [`decode`] for the same height, except that `Scalar(-4)` comes
/// back as `Empty`.
///
/// # Examples
///
/// ```
/// use realmgrid::cell::Cell;
/// use realmgrid::codec::encode;
/// use realmgrid::grid::Grid;
///
/// let mut grid = Grid::empty(2, 2);
/// grid.set(0, 0, Cell::Scalar(3));
/// grid.set(1, 0, Cell::Tagged(2, 12));
/// assert_eq!(encode(&grid), "[3,[2,12],-4.0,-4.0]");
/// ```
pub fn encode(grid: &Grid) -> String {
    let tokens: Vec<String> = grid
        .column_major()
        .map(|cell| match cell {
            Cell::Empty => EMPTY_LITERAL.to_string(),
            Cell::Scalar(v) => v.to_string(),
            Cell::Tagged(v, m) => format!("[{},{}]", v, m),
        })
        .collect();

    format!("[{}]", tokens.join(","))
}

/// Load a grid file.
///
/// A missing file yields the default empty grid. Content is read as lossy
/// UTF-8, matching how the files are produced by other tools.
pub fn load_grid(path: &Path, fixed_height: Option<usize>) -> Result<Grid, GridIoError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("grid '{}' not found, using empty grid", path.display());
            return Ok(Grid::default_for(fixed_height));
        }
        Err(source) => return Err(GridIoError::Read { path: path.to_path_buf(), source }),
    };

    let text = String::from_utf8_lossy(&bytes);
    Ok(decode(&text, fixed_height))
}

/// Write a grid file, replacing any existing content.
pub fn save_grid(grid: &Grid, path: &Path) -> Result<(), GridIoError> {
    fs::write(path, encode(grid))
        .map_err(|source| GridIoError::Write { path: path.to_path_buf(), source })?;
    info!("saved {}x{} grid to '{}'", grid.height(), grid.width(), path.display());
    Ok(())
}
