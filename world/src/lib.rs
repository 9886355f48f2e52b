#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state for Plinko.
//!
//! The world owns the occupancy grid, the slot table and the running score.
//! It never draws random numbers: systems decide where balls spawn and which
//! way they drift, and the world applies those decisions through [`apply`],
//! enforcing the wall and scoring rules.

use plinko_core::{
    BoardDimensions, BoardLayout, CellCoord, Command, Drift, Event, Score, WELCOME_BANNER,
};

/// Represents the authoritative Plinko board state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    dimensions: BoardDimensions,
    slot_values: Vec<u32>,
    occupancy: OccupancyGrid,
    score: Score,
    tick_index: u64,
}

impl World {
    /// Creates an empty board from the provided layout.
    #[must_use]
    pub fn new(layout: BoardLayout) -> Self {
        let (dimensions, slot_values) = layout.into_parts();
        Self {
            banner: WELCOME_BANNER,
            occupancy: OccupancyGrid::new(dimensions),
            dimensions,
            slot_values,
            score: Score::ZERO,
            tick_index: 0,
        }
    }

    fn spawn_ball(&mut self, column: u32, out_events: &mut Vec<Event>) {
        let cell = CellCoord::new(column, 0);
        let Some(index) = self.dimensions.index(cell) else {
            return;
        };
        let merged = self.occupancy.occupy(index);
        out_events.push(Event::BallSpawned { cell, merged });
    }

    fn step_ball(&mut self, from: CellCoord, drift: Drift, out_events: &mut Vec<Event>) {
        let Some(index) = self.dimensions.index(from) else {
            return;
        };
        if !self.occupancy.vacate(index) {
            return;
        }

        let drift = drift.deflected(from.column(), self.dimensions.columns());
        let Some(column) = drift.neighbour(from.column()) else {
            return;
        };

        if from.row() == self.dimensions.bottom_row() {
            self.score_ball(from, column, out_events);
            return;
        }

        let to = CellCoord::new(column, from.row() + 1);
        if let Some(index) = self.dimensions.index(to) {
            let _ = self.occupancy.occupy(index);
            out_events.push(Event::BallAdvanced { from, to });
        }
    }

    fn score_ball(&mut self, from: CellCoord, slot: u32, out_events: &mut Vec<Event>) {
        let points = usize::try_from(slot)
            .ok()
            .and_then(|slot| self.slot_values.get(slot).copied());
        let Some(points) = points else {
            return;
        };
        self.score = self.score.award(points);
        out_events.push(Event::BallScored { from, slot, points });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.tick_index = world.tick_index.saturating_add(1);
            out_events.push(Event::TimeAdvanced {
                tick: world.tick_index,
            });
        }
        Command::SpawnBall { column } => world.spawn_ball(column, out_events),
        Command::StepBall { from, drift } => world.step_ball(from, drift, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use plinko_core::{BoardDimensions, OccupancyView, Score};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides the board geometry.
    #[must_use]
    pub fn dimensions(world: &World) -> BoardDimensions {
        world.dimensions
    }

    /// Points awarded by each slot, ordered by exit position.
    #[must_use]
    pub fn slot_values(world: &World) -> &[u32] {
        &world.slot_values
    }

    /// Running score accumulated so far.
    #[must_use]
    pub fn score(world: &World) -> Score {
        world.score
    }

    /// Number of ticks applied so far.
    #[must_use]
    pub fn tick_index(world: &World) -> u64 {
        world.tick_index
    }

    /// Exposes a read-only view of the dense occupancy grid.
    #[must_use]
    pub fn occupancy_view(world: &World) -> OccupancyView<'_> {
        OccupancyView::new(world.occupancy.cells(), world.dimensions)
    }
}

#[derive(Clone, Debug)]
struct OccupancyGrid {
    cells: Vec<bool>,
}

impl OccupancyGrid {
    fn new(dimensions: BoardDimensions) -> Self {
        Self {
            cells: vec![false; dimensions.cell_count()],
        }
    }

    /// Marks the cell occupied, returning whether it already was.
    fn occupy(&mut self, index: usize) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => std::mem::replace(slot, true),
            None => false,
        }
    }

    /// Clears the cell, returning whether it held a ball.
    fn vacate(&mut self, index: usize) -> bool {
        match self.cells.get_mut(index) {
            Some(slot) => std::mem::replace(slot, false),
            None => false,
        }
    }

    fn cells(&self) -> &[bool] {
        &self.cells
    }
}
