//! Game configuration as supplied by a collector and validated before a run.
//!
//! [`Settings`] is the raw, serde-friendly form that adapters fill from flags
//! or files. [`Settings::validate`] turns it into a [`BoardConfig`], which can
//! only hold values inside the accepted ranges.

use std::{ops::RangeInclusive, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BoardDimensions, LayoutError};

/// Accepted board widths, in columns.
pub const WIDTH_RANGE: RangeInclusive<u32> = 5..=100;
/// Accepted board lengths, in rows.
pub const LENGTH_RANGE: RangeInclusive<u32> = 5..=70;
/// Accepted delays between ticks, in seconds.
pub const SPEED_RANGE: RangeInclusive<f64> = 0.01..=10.0;
/// Accepted number of balls dropped per run.
pub const BALL_COUNT_RANGE: RangeInclusive<u32> = 1..=1000;
/// Largest value a single slot may award.
pub const MAX_SLOT_VALUE: u32 = 1_000_000;

const MILLIS_PER_SECOND: f64 = 1000.0;
// Absorbs binary representation error so that e.g. 0.29 s yields 290 ms.
const MILLIS_EPSILON: f64 = 1e-6;

/// Unvalidated game settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Number of board columns.
    pub width: u32,
    /// Number of board rows.
    pub length: u32,
    /// Delay between ticks, in seconds.
    pub speed_seconds: f64,
    /// Number of balls dropped over the run.
    pub ball_count: u32,
    /// Idle ticks between two spawns.
    pub ball_gap: u32,
    /// Points per slot; generated when absent.
    pub slot_values: Option<Vec<u32>>,
    /// Symbol drawn between cells.
    pub bar_symbol: char,
    /// Symbol drawn for a ball.
    pub ball_symbol: char,
    /// Seed for the random source; drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 11,
            length: 10,
            speed_seconds: 0.1,
            ball_count: 20,
            ball_gap: 2,
            slot_values: None,
            bar_symbol: '.',
            ball_symbol: '*',
            seed: None,
        }
    }
}

impl Settings {
    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<BoardConfig, ConfigError> {
        if !WIDTH_RANGE.contains(&self.width) {
            return Err(ConfigError::WidthOutOfRange { width: self.width });
        }
        if !LENGTH_RANGE.contains(&self.length) {
            return Err(ConfigError::LengthOutOfRange {
                length: self.length,
            });
        }
        if !self.speed_seconds.is_finite() || !SPEED_RANGE.contains(&self.speed_seconds) {
            return Err(ConfigError::SpeedOutOfRange {
                seconds: self.speed_seconds,
            });
        }
        if !BALL_COUNT_RANGE.contains(&self.ball_count) {
            return Err(ConfigError::BallCountOutOfRange {
                count: self.ball_count,
            });
        }
        if self.ball_gap > self.length {
            return Err(ConfigError::BallGapOutOfRange {
                gap: self.ball_gap,
                max: self.length,
            });
        }
        if let Some(values) = &self.slot_values {
            let expected = usize::try_from(self.width).unwrap_or(usize::MAX);
            if values.len() != expected {
                return Err(ConfigError::SlotCountMismatch {
                    expected,
                    actual: values.len(),
                });
            }
            if let Some((slot, value)) = values
                .iter()
                .copied()
                .enumerate()
                .find(|(_, value)| *value > MAX_SLOT_VALUE)
            {
                return Err(ConfigError::SlotValueOutOfRange { slot, value });
            }
        }

        let dimensions = BoardDimensions::new(self.width, self.length)?;
        let millis = (self.speed_seconds * MILLIS_PER_SECOND + MILLIS_EPSILON).floor() as u64;

        Ok(BoardConfig {
            dimensions,
            tick_interval: Duration::from_millis(millis),
            ball_count: self.ball_count,
            ball_gap: self.ball_gap,
            slot_values: self.slot_values.clone(),
            bar_symbol: self.bar_symbol,
            ball_symbol: self.ball_symbol,
            seed: self.seed,
        })
    }
}

/// Fully validated configuration handed to the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardConfig {
    dimensions: BoardDimensions,
    tick_interval: Duration,
    ball_count: u32,
    ball_gap: u32,
    slot_values: Option<Vec<u32>>,
    bar_symbol: char,
    ball_symbol: char,
    seed: Option<u64>,
}

impl BoardConfig {
    /// Geometry of the board.
    #[must_use]
    pub const fn dimensions(&self) -> BoardDimensions {
        self.dimensions
    }

    /// Delay between two ticks, truncated to whole milliseconds.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Number of balls dropped over the run.
    #[must_use]
    pub const fn ball_count(&self) -> u32 {
        self.ball_count
    }

    /// Idle ticks between two spawns.
    #[must_use]
    pub const fn ball_gap(&self) -> u32 {
        self.ball_gap
    }

    /// Slot values supplied by the player, if any.
    #[must_use]
    pub fn slot_values(&self) -> Option<&[u32]> {
        self.slot_values.as_deref()
    }

    /// Symbol drawn between cells.
    #[must_use]
    pub const fn bar_symbol(&self) -> char {
        self.bar_symbol
    }

    /// Symbol drawn for a ball.
    #[must_use]
    pub const fn ball_symbol(&self) -> char {
        self.ball_symbol
    }

    /// Seed for the random source, if one was pinned.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Reasons settings are rejected.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// Width outside [`WIDTH_RANGE`].
    #[error("width must be between {} and {}, got {width}", WIDTH_RANGE.start(), WIDTH_RANGE.end())]
    WidthOutOfRange {
        /// Rejected width.
        width: u32,
    },
    /// Length outside [`LENGTH_RANGE`].
    #[error(
        "length must be between {} and {}, got {length}",
        LENGTH_RANGE.start(),
        LENGTH_RANGE.end()
    )]
    LengthOutOfRange {
        /// Rejected length.
        length: u32,
    },
    /// Speed outside [`SPEED_RANGE`] or not a finite number.
    #[error(
        "speed must be between {} and {} seconds, got {seconds}",
        SPEED_RANGE.start(),
        SPEED_RANGE.end()
    )]
    SpeedOutOfRange {
        /// Rejected speed.
        seconds: f64,
    },
    /// Ball count outside [`BALL_COUNT_RANGE`].
    #[error(
        "ball count must be between {} and {}, got {count}",
        BALL_COUNT_RANGE.start(),
        BALL_COUNT_RANGE.end()
    )]
    BallCountOutOfRange {
        /// Rejected count.
        count: u32,
    },
    /// Gap larger than the board length.
    #[error("ball gap must be between 0 and {max}, got {gap}")]
    BallGapOutOfRange {
        /// Rejected gap.
        gap: u32,
        /// Board length bounding the gap.
        max: u32,
    },
    /// Slot table does not hold exactly one value per column.
    #[error("expected {expected} slot values, got {actual}")]
    SlotCountMismatch {
        /// Board width.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
    /// Slot value above [`MAX_SLOT_VALUE`].
    #[error("slot {slot} must award between 0 and {} points, got {value}", MAX_SLOT_VALUE)]
    SlotValueOutOfRange {
        /// Index of the offending slot.
        slot: usize,
        /// Rejected value.
        value: u32,
    },
    /// Geometry rejected by the board model.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
