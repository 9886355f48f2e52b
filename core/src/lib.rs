#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Plinko engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative board, and pure systems. Systems submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values that systems and
//! adapters react to. Systems never touch board state directly; they read it
//! through immutable views such as [`OccupancyView`].

use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod config;

pub use config::{BoardConfig, ConfigError, Settings};

/// Canonical banner emitted when the game boots.
pub const WELCOME_BANNER: &str = "Game started";

/// Canonical banner emitted once the run has finished.
pub const FAREWELL_BANNER: &str = "Game ended";

/// Smallest number of columns a board may have.
///
/// Edge deflection needs an interior neighbour on both walls.
pub const MIN_COLUMNS: u32 = 2;

/// Smallest number of rows a board may have.
pub const MIN_ROWS: u32 = 1;

/// Commands that express all permissible board mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Advances the simulation clock by a single tick.
    Tick,
    /// Drops a new ball into the top row of the provided column.
    SpawnBall {
        /// Column that receives the ball.
        column: u32,
    },
    /// Moves the ball occupying `from` one row down, or scores it on the bottom row.
    StepBall {
        /// Cell currently occupied by the ball.
        from: CellCoord,
        /// Drift drawn for the ball before the wall override is applied.
        drift: Drift,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// One-based index of the tick that just started.
        tick: u64,
    },
    /// Confirms that a ball entered the top row.
    BallSpawned {
        /// Cell the ball occupies after spawning.
        cell: CellCoord,
        /// Whether the cell already held a ball that absorbed the new one.
        merged: bool,
    },
    /// Confirms that a ball moved one row down.
    BallAdvanced {
        /// Cell the ball occupied before moving.
        from: CellCoord,
        /// Cell the ball occupies after moving.
        to: CellCoord,
    },
    /// Reports that a ball left the bottom row and landed in a slot.
    BallScored {
        /// Bottom-row cell the ball left from.
        from: CellCoord,
        /// Index of the slot the ball landed in.
        slot: u32,
        /// Points awarded by the slot.
        points: u32,
    },
}

/// Horizontal direction a ball takes while falling one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Drift {
    /// Movement toward decreasing column indices.
    Left,
    /// Movement toward increasing column indices.
    Right,
}

impl Drift {
    /// Maps a drawn coin flip onto a drift.
    #[must_use]
    pub const fn from_left(move_left: bool) -> Self {
        if move_left {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Applies the hard-wall policy for a ball at `column` on a board `columns` wide.
    ///
    /// Balls on the leftmost column always drift right and balls on the
    /// rightmost column always drift left, whatever was drawn.
    #[must_use]
    pub const fn deflected(self, column: u32, columns: u32) -> Self {
        if column == 0 {
            Self::Right
        } else if column.saturating_add(1) == columns {
            Self::Left
        } else {
            self
        }
    }

    /// Column reached after drifting from `column`, if it is representable.
    #[must_use]
    pub const fn neighbour(self, column: u32) -> Option<u32> {
        match self {
            Self::Left => column.checked_sub(1),
            Self::Right => column.checked_add(1),
        }
    }
}

/// Location of a single board cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell, counted from the top.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Running point total accumulated by balls landing in slots.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Score(u64);

impl Score {
    /// Score of a run before any ball has landed.
    pub const ZERO: Self = Self(0);

    /// Creates a score wrapper around the provided total.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Retrieves the numeric total.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }

    /// Returns the score after awarding `points`.
    #[must_use]
    pub const fn award(self, points: u32) -> Self {
        Self(self.0.saturating_add(points as u64))
    }
}

/// Size of the peg grid measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoardDimensions {
    columns: u32,
    rows: u32,
}

impl BoardDimensions {
    /// Creates a new dimension descriptor.
    ///
    /// Fails when the board is narrower than [`MIN_COLUMNS`] or shorter than
    /// [`MIN_ROWS`].
    pub fn new(columns: u32, rows: u32) -> Result<Self, LayoutError> {
        if columns < MIN_COLUMNS {
            return Err(LayoutError::TooFewColumns { columns });
        }
        if rows < MIN_ROWS {
            return Err(LayoutError::TooFewRows { rows });
        }
        Ok(Self { columns, rows })
    }

    /// Number of columns contained in the board.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the board.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Index of the row balls exit from.
    #[must_use]
    pub const fn bottom_row(&self) -> u32 {
        self.rows - 1
    }

    /// Total number of cells on the board.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.columns) * u64::from(self.rows);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Columns a new ball may be dropped into.
    ///
    /// The rightmost column is never used as a spawn point.
    #[must_use]
    pub const fn spawn_columns(&self) -> Range<u32> {
        0..self.columns - 1
    }

    /// Reports whether the cell lies on the board.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Row-major index of the cell, if it lies on the board.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Board geometry paired with the value of every exit slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardLayout {
    dimensions: BoardDimensions,
    slot_values: Vec<u32>,
}

impl BoardLayout {
    /// Creates a layout, rejecting slot tables that do not cover every column.
    pub fn new(dimensions: BoardDimensions, slot_values: Vec<u32>) -> Result<Self, LayoutError> {
        let expected = usize::try_from(dimensions.columns()).unwrap_or(usize::MAX);
        if slot_values.len() != expected {
            return Err(LayoutError::SlotCountMismatch {
                expected,
                actual: slot_values.len(),
            });
        }
        Ok(Self {
            dimensions,
            slot_values,
        })
    }

    /// Geometry of the board.
    #[must_use]
    pub const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Slot values ordered by exit position.
    #[must_use]
    pub fn slot_values(&self) -> &[u32] {
        &self.slot_values
    }

    /// Consumes the layout, yielding its parts.
    #[must_use]
    pub fn into_parts(self) -> (BoardDimensions, Vec<u32>) {
        (self.dimensions, self.slot_values)
    }
}

/// Reasons a board layout cannot be constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The board is too narrow for balls to bounce off both walls.
    #[error("board needs at least {} columns, got {columns}", MIN_COLUMNS)]
    TooFewColumns {
        /// Requested column count.
        columns: u32,
    },
    /// The board has no row for balls to fall through.
    #[error("board needs at least {} row, got {rows}", MIN_ROWS)]
    TooFewRows {
        /// Requested row count.
        rows: u32,
    },
    /// The slot table does not hold exactly one value per column.
    #[error("expected {expected} slot values, got {actual}")]
    SlotCountMismatch {
        /// Number of columns on the board.
        expected: usize,
        /// Number of slot values supplied.
        actual: usize,
    },
}

/// Read-only view into the dense occupancy grid.
#[derive(Clone, Copy, Debug)]
pub struct OccupancyView<'a> {
    cells: &'a [bool],
    dimensions: BoardDimensions,
}

impl<'a> OccupancyView<'a> {
    /// Captures a new occupancy view backed by the provided row-major cell slice.
    #[must_use]
    pub fn new(cells: &'a [bool], dimensions: BoardDimensions) -> Self {
        Self { cells, dimensions }
    }

    /// Reports whether a ball sits on the provided cell.
    #[must_use]
    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.dimensions
            .index(cell)
            .and_then(|index| self.cells.get(index).copied())
            .unwrap_or(false)
    }

    /// Provides the dimensions of the underlying occupancy grid.
    #[must_use]
    pub const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn ball_count(&self) -> usize {
        self.cells.iter().filter(|occupied| **occupied).count()
    }

    /// Occupied cells ordered from the bottom row upward, left to right within a row.
    pub fn occupied_bottom_up(&self) -> impl Iterator<Item = CellCoord> + 'a {
        let view = *self;
        let columns = self.dimensions.columns();
        (0..self.dimensions.rows())
            .rev()
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(column, row)))
            .filter(move |cell| view.is_occupied(*cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dimensions(columns: u32, rows: u32) -> BoardDimensions {
        BoardDimensions::new(columns, rows).expect("valid dimensions")
    }

    #[test]
    fn walls_deflect_toward_interior() {
        assert_eq!(Drift::Left.deflected(0, 5), Drift::Right);
        assert_eq!(Drift::Right.deflected(0, 5), Drift::Right);
        assert_eq!(Drift::Right.deflected(4, 5), Drift::Left);
        assert_eq!(Drift::Left.deflected(4, 5), Drift::Left);
        assert_eq!(Drift::Left.deflected(2, 5), Drift::Left);
        assert_eq!(Drift::Right.deflected(2, 5), Drift::Right);
    }

    #[test]
    fn neighbour_refuses_to_leave_column_zero() {
        assert_eq!(Drift::Left.neighbour(0), None);
        assert_eq!(Drift::Left.neighbour(3), Some(2));
        assert_eq!(Drift::Right.neighbour(3), Some(4));
    }

    #[test]
    fn dimensions_reject_degenerate_boards() {
        assert_eq!(
            BoardDimensions::new(1, 5),
            Err(LayoutError::TooFewColumns { columns: 1 })
        );
        assert_eq!(
            BoardDimensions::new(5, 0),
            Err(LayoutError::TooFewRows { rows: 0 })
        );
    }

    #[test]
    fn spawn_columns_exclude_rightmost_column() {
        assert_eq!(dimensions(5, 5).spawn_columns(), 0..4);
        assert_eq!(dimensions(2, 1).spawn_columns(), 0..1);
    }

    #[test]
    fn layout_rejects_mismatched_slot_table() {
        let error = BoardLayout::new(dimensions(5, 5), vec![1, 2, 3]).unwrap_err();
        assert_eq!(
            error,
            LayoutError::SlotCountMismatch {
                expected: 5,
                actual: 3
            }
        );
    }

    #[test]
    fn occupied_cells_are_listed_bottom_up() {
        let dims = dimensions(3, 3);
        let mut cells = vec![false; dims.cell_count()];
        for cell in [
            CellCoord::new(1, 0),
            CellCoord::new(0, 2),
            CellCoord::new(2, 2),
            CellCoord::new(2, 1),
        ] {
            cells[dims.index(cell).expect("on board")] = true;
        }

        let view = OccupancyView::new(&cells, dims);
        let order: Vec<CellCoord> = view.occupied_bottom_up().collect();

        assert_eq!(
            order,
            vec![
                CellCoord::new(0, 2),
                CellCoord::new(2, 2),
                CellCoord::new(2, 1),
                CellCoord::new(1, 0),
            ]
        );
        assert_eq!(view.ball_count(), 4);
        assert!(!view.is_occupied(CellCoord::new(7, 7)));
    }

    #[test]
    fn score_saturates_instead_of_wrapping() {
        let score = Score::new(u64::MAX - 1).award(10);
        assert_eq!(score.get(), u64::MAX);
        assert_eq!(Score::ZERO.award(40).award(2), Score::new(42));
    }
}
