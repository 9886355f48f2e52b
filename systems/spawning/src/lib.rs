#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Spawning system responsible for dropping balls on a fixed tick cadence.

use plinko_core::{BoardDimensions, Command, Event};
use rand::Rng;

/// Configuration parameters required to construct the spawning system.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    ball_count: u32,
    spawn_gap_ticks: u32,
}

impl Config {
    /// Creates a new configuration dropping `ball_count` balls with
    /// `spawn_gap_ticks` idle ticks between two drops.
    #[must_use]
    pub const fn new(ball_count: u32, spawn_gap_ticks: u32) -> Self {
        Self {
            ball_count,
            spawn_gap_ticks,
        }
    }

    /// Total number of balls dropped over the run.
    #[must_use]
    pub const fn ball_count(&self) -> u32 {
        self.ball_count
    }

    /// Idle ticks between two drops.
    #[must_use]
    pub const fn spawn_gap_ticks(&self) -> u32 {
        self.spawn_gap_ticks
    }

    /// Number of ticks needed to drop every ball, the first drop landing on the first tick.
    #[must_use]
    pub const fn spawning_ticks(&self) -> u64 {
        if self.ball_count == 0 {
            return 0;
        }
        (self.ball_count as u64 - 1) * (self.spawn_gap_ticks as u64 + 1) + 1
    }
}

/// Pure system that emits one spawn command every `spawn_gap_ticks + 1` ticks.
#[derive(Debug)]
pub struct Spawning {
    spawn_gap_ticks: u32,
    balls_remaining: u32,
    ticks_until_next_spawn: u32,
}

impl Spawning {
    /// Creates a new spawning system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            spawn_gap_ticks: config.spawn_gap_ticks,
            balls_remaining: config.ball_count,
            ticks_until_next_spawn: 0,
        }
    }

    /// Balls that still have to be dropped.
    #[must_use]
    pub const fn balls_remaining(&self) -> u32 {
        self.balls_remaining
    }

    /// Ticks left before the next drop.
    #[must_use]
    pub const fn ticks_until_next_spawn(&self) -> u32 {
        self.ticks_until_next_spawn
    }

    /// Reports whether every ball has been dropped.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.balls_remaining == 0
    }

    /// Consumes world events to emit spawn commands.
    ///
    /// Every tick in the batch either drops a ball into a uniformly random
    /// column of [`BoardDimensions::spawn_columns`] or counts down the gap.
    pub fn handle<R>(
        &mut self,
        events: &[Event],
        dimensions: BoardDimensions,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        R: Rng + ?Sized,
    {
        for event in events {
            if !matches!(event, Event::TimeAdvanced { .. }) || self.is_exhausted() {
                continue;
            }

            if self.ticks_until_next_spawn > 0 {
                self.ticks_until_next_spawn -= 1;
                continue;
            }

            let column = rng.gen_range(dimensions.spawn_columns());
            out.push(Command::SpawnBall { column });
            self.balls_remaining -= 1;
            self.ticks_until_next_spawn = self.spawn_gap_ticks;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawning_ticks_cover_every_gap() {
        assert_eq!(Config::new(1, 0).spawning_ticks(), 1);
        assert_eq!(Config::new(3, 0).spawning_ticks(), 3);
        assert_eq!(Config::new(3, 2).spawning_ticks(), 7);
        assert_eq!(Config::new(0, 5).spawning_ticks(), 0);
    }

    #[test]
    fn starts_ready_to_spawn() {
        let spawning = Spawning::new(Config::new(4, 3));
        assert_eq!(spawning.balls_remaining(), 4);
        assert_eq!(spawning.ticks_until_next_spawn(), 0);
        assert!(!spawning.is_exhausted());
    }
}
