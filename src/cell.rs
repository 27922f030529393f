//! Tile cell values shared by every world grid

/// Reserved id meaning "no assignment".
///
/// The biome and region grids never store it directly: decoding turns it into
/// [`Cell::Empty`]. Greater-region painting uses `Scalar(EMPTY_SENTINEL)` to
/// clear a tile.
pub const EMPTY_SENTINEL: i64 = -4;

/// Literal written for [`Cell::Empty`] in save files.
pub const EMPTY_LITERAL: &str = "-4.0";

/// Biome modifier for the tainted ("Dreadlands") variant.
pub const TAINTED_MODIFIER: i64 = 12;

/// A single tile of a world grid.
///
/// # Examples
///
/// ```
/// use realmgrid::cell::Cell;
///
/// let cell = Cell::Tagged(2, 12);
/// assert_eq!(cell.value(), Some(2));
/// assert_eq!(cell.modifier(), Some(12));
/// assert_eq!(cell.without_modifier(), Cell::Scalar(2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    /// Never assigned
    #[default]
    Empty,
    /// Plain category id
    Scalar(i64),
    /// Category id with a modifier flag (biome grid only)
    Tagged(i64, i64),
}

impl Cell {
    /// The category id, if any.
    pub fn value(&self) -> Option<i64> {
        match self {
            Cell::Empty => None,
            Cell::Scalar(v) | Cell::Tagged(v, _) => Some(*v),
        }
    }

    /// The modifier, for tagged cells.
    pub fn modifier(&self) -> Option<i64> {
        match self {
            Cell::Tagged(_, m) => Some(*m),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// True for `Empty` and for an explicit `Scalar(-4)`.
    pub fn is_unassigned(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Scalar(v) => *v == EMPTY_SENTINEL,
            Cell::Tagged(..) => false,
        }
    }

    /// Drop the modifier of a tagged cell, leaving other cells untouched.
    pub fn without_modifier(self) -> Cell {
        match self {
            Cell::Tagged(v, _) => Cell::Scalar(v),
            other => other,
        }
    }

    /// Attach `modifier` to this cell's id. Empty cells have no id to tag.
    pub fn with_modifier(self, modifier: i64) -> Option<Cell> {
        self.value().map(|v| Cell::Tagged(v, modifier))
    }
}
