#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Movement system that decides which way every falling ball drifts.

use plinko_core::{Command, Drift, Event, OccupancyView};
use rand::Rng;

/// Probability that a ball away from the walls drifts left.
const LEFT_PROBABILITY: f64 = 0.5;

/// Pure system that reacts to ticks and emits one step command per ball.
#[derive(Debug, Default)]
pub struct Movement;

impl Movement {
    /// Creates a new movement system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Consumes world events and the occupancy view to emit step commands.
    ///
    /// Nothing is emitted unless the events contain a tick. Commands are
    /// ordered bottom row first so that a ball never moves twice in one tick,
    /// and one coin flip is drawn per ball in that order, walls included.
    pub fn handle<R>(
        &mut self,
        events: &[Event],
        occupancy_view: OccupancyView<'_>,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for from in occupancy_view.occupied_bottom_up() {
            let drift = Drift::from_left(rng.gen_bool(LEFT_PROBABILITY));
            out.push(Command::StepBall { from, drift });
        }
    }
}
