#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text rendering for Plinko adapters.
//!
//! [`TextRenderer`] turns the occupancy grid and score into a [`Frame`], and
//! [`TerminalPresenter`] writes frames over each other on an ANSI terminal.

use std::{fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use plinko_core::{CellCoord, OccupancyView, Score, FAREWELL_BANNER};

/// Moves the cursor to the start of the second line, below the banner.
const FRAME_ORIGIN: &str = "\x1b[2;1H";
/// Clears the whole screen and moves the cursor home.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Characters used to draw the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Symbols {
    /// Drawn between two neighbouring cells.
    pub bar: char,
    /// Drawn on cells holding a ball.
    pub ball: char,
}

impl Symbols {
    /// Creates a symbol set.
    #[must_use]
    pub const fn new(bar: char, ball: char) -> Self {
        Self { bar, ball }
    }
}

impl Default for Symbols {
    fn default() -> Self {
        Self::new('.', '*')
    }
}

/// One rendered picture of the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<String>,
    score: Score,
}

impl Frame {
    /// Board rows, top first.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Score shown under the board.
    #[must_use]
    pub const fn score(&self) -> Score {
        self.score
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            writeln!(f, "{row}")?;
        }
        write!(f, "Current score: {}", self.score.get())
    }
}

/// Renders boards as text.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextRenderer {
    symbols: Symbols,
}

impl TextRenderer {
    /// Creates a renderer drawing with the provided symbols.
    #[must_use]
    pub const fn new(symbols: Symbols) -> Self {
        Self { symbols }
    }

    /// Renders the board and score.
    ///
    /// Odd rows are shifted right by one blank to suggest a brick pattern.
    /// Cells are separated by the bar symbol, with no bar after the last one.
    #[must_use]
    pub fn render(&self, occupancy: OccupancyView<'_>, score: Score) -> Frame {
        let dimensions = occupancy.dimensions();
        let columns = dimensions.columns();
        let rows = (0..dimensions.rows())
            .map(|row| {
                let mut line = String::with_capacity(columns as usize * 2 + 1);
                if row % 2 == 1 {
                    line.push(' ');
                }
                for column in 0..columns {
                    if column > 0 {
                        line.push(self.symbols.bar);
                    }
                    if occupancy.is_occupied(CellCoord::new(column, row)) {
                        line.push(self.symbols.ball);
                    } else {
                        line.push(' ');
                    }
                }
                line
            })
            .collect();

        Frame { rows, score }
    }
}

/// Presents frames on an ANSI terminal by redrawing from the top-left corner.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
}

impl<W> TerminalPresenter<W>
where
    W: Write,
{
    /// Creates a presenter writing to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Clears the screen and prints `banner` on the first line.
    ///
    /// Frames are drawn below the banner, so it stays visible for the run.
    pub fn begin(&mut self, banner: &str) -> AnyResult<()> {
        writeln!(self.out, "{CLEAR_SCREEN}{banner}").context("failed to write banner")?;
        self.out.flush().context("failed to flush the terminal")
    }

    /// Draws a frame over the previous one.
    pub fn present(&mut self, frame: &Frame) -> AnyResult<()> {
        writeln!(self.out, "{FRAME_ORIGIN}{frame}").context("failed to draw frame")?;
        self.out.flush().context("failed to flush the terminal")
    }

    /// Clears the board and reports the final score.
    pub fn finish(&mut self, score: Score) -> AnyResult<()> {
        writeln!(
            self.out,
            "{CLEAR_SCREEN}Final score: {}\n{FAREWELL_BANNER}",
            score.get()
        )
        .context("failed to write final score")?;
        self.out.flush().context("failed to flush the terminal")
    }

    /// Consumes the presenter, yielding the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}
