#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick loop that drives the Plinko systems into the world.
//!
//! A [`Simulation`] owns the world, the systems and the random source for a
//! single run. Each tick applies [`Command::Tick`], lets the movement system
//! step every ball, lets the spawning system drop the next ball, and applies
//! the resulting commands in that order. Once every ball has been dropped the
//! loop keeps ticking for as many ticks as the board has rows, so that the
//! last ball reaches a slot, and then finishes.

use std::time::Duration;

use plinko_core::{BoardLayout, Command, Event, Score};
use plinko_system_movement::Movement;
use plinko_system_spawning::Spawning;
use plinko_world::{self as world, query, World};
use rand::Rng;
use tracing::{debug, info};

pub use plinko_system_spawning::Config as SpawnConfig;

/// Stage of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Balls are still being dropped.
    Spawning,
    /// Every ball has been dropped; the board is emptying.
    Draining {
        /// Ticks left before the run finishes.
        ticks_left: u32,
    },
    /// The run is over.
    Finished,
}

/// Counters that evolve as the run progresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunState {
    /// Points scored so far.
    pub score: Score,
    /// Balls that still have to be dropped.
    pub balls_remaining_to_spawn: u32,
    /// Ticks left before the next drop.
    pub ticks_until_next_spawn: u32,
}

/// Outcome of a single tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// One-based index of the tick.
    pub tick: u64,
    /// Phase the run is in after the tick.
    pub phase: Phase,
    /// Score after the tick.
    pub score: Score,
    /// Events emitted by the world during the tick, in order.
    pub events: Vec<Event>,
}

/// A single Plinko run.
#[derive(Debug)]
pub struct Simulation<R> {
    world: World,
    movement: Movement,
    spawning: Spawning,
    rng: R,
    phase: Phase,
    drain_ticks: u32,
}

impl<R> Simulation<R>
where
    R: Rng,
{
    /// Creates a run on an empty board built from `layout`.
    #[must_use]
    pub fn new(layout: BoardLayout, schedule: SpawnConfig, rng: R) -> Self {
        let drain_ticks = layout.dimensions().rows();
        let spawning = Spawning::new(schedule);
        let phase = if spawning.is_exhausted() {
            Phase::Draining {
                ticks_left: drain_ticks,
            }
        } else {
            Phase::Spawning
        };

        Self {
            world: World::new(layout),
            movement: Movement::new(),
            spawning,
            rng,
            phase,
            drain_ticks,
        }
    }

    /// Read-only access to the board.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Current phase of the run.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Points scored so far.
    #[must_use]
    pub fn score(&self) -> Score {
        query::score(&self.world)
    }

    /// Snapshot of the run counters.
    #[must_use]
    pub fn run_state(&self) -> RunState {
        RunState {
            score: self.score(),
            balls_remaining_to_spawn: self.spawning.balls_remaining(),
            ticks_until_next_spawn: self.spawning.ticks_until_next_spawn(),
        }
    }

    /// Reports whether the run is over.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Performs one tick, or returns `None` once the run is over.
    pub fn step(&mut self) -> Option<TickReport> {
        let spawning = match self.phase {
            Phase::Finished => return None,
            Phase::Spawning => true,
            Phase::Draining { .. } => false,
        };

        let mut events = Vec::new();
        world::apply(&mut self.world, Command::Tick, &mut events);

        let mut commands = Vec::new();
        self.movement.handle(
            &events,
            query::occupancy_view(&self.world),
            &mut self.rng,
            &mut commands,
        );
        if spawning {
            self.spawning.handle(
                &events,
                query::dimensions(&self.world),
                &mut self.rng,
                &mut commands,
            );
        }

        for command in commands {
            world::apply(&mut self.world, command, &mut events);
        }

        self.phase = self.next_phase();
        let tick = query::tick_index(&self.world);
        let score = self.score();
        debug!(tick, score = score.get(), phase = ?self.phase, "tick applied");

        Some(TickReport {
            tick,
            phase: self.phase,
            score,
            events,
        })
    }

    /// Drives the run to completion, rendering after every tick.
    ///
    /// Each tick is followed by a `pacing` sleep; `render` always observes a
    /// tick before the next one mutates the board. The first render error
    /// aborts the run.
    pub async fn run<F, E>(&mut self, pacing: Duration, mut render: F) -> Result<Score, E>
    where
        F: FnMut(&World, &TickReport) -> Result<(), E>,
    {
        info!(
            columns = query::dimensions(&self.world).columns(),
            rows = query::dimensions(&self.world).rows(),
            balls = self.spawning.balls_remaining(),
            pacing_ms = whole_millis(pacing),
            "run started"
        );

        while let Some(report) = self.step() {
            render(&self.world, &report)?;
            tokio::time::sleep(pacing).await;
        }

        let score = self.score();
        info!(
            score = score.get(),
            ticks = query::tick_index(&self.world),
            "run finished"
        );
        Ok(score)
    }

    fn next_phase(&self) -> Phase {
        match self.phase {
            Phase::Spawning if self.spawning.is_exhausted() => {
                info!(
                    tick = query::tick_index(&self.world),
                    drain_ticks = self.drain_ticks,
                    "all balls dropped"
                );
                Phase::Draining {
                    ticks_left: self.drain_ticks,
                }
            }
            Phase::Draining { ticks_left } if ticks_left <= 1 => Phase::Finished,
            Phase::Draining { ticks_left } => Phase::Draining {
                ticks_left: ticks_left - 1,
            },
            other => other,
        }
    }
}

fn whole_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
