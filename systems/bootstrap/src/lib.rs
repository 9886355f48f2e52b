#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares a Plinko run.

use plinko_core::{BoardConfig, BoardLayout, LayoutError};
use plinko_world::{query, World};
use rand::Rng;

/// Largest value a generated slot may award.
pub const MAX_GENERATED_SLOT_VALUE: u32 = 100;

/// Produces data required to start a run.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the game starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Resolves the board layout described by a validated configuration.
    ///
    /// When the configuration carries no slot values, every slot receives a
    /// uniformly random value in `0..=MAX_GENERATED_SLOT_VALUE`.
    pub fn board_layout<R>(
        &self,
        config: &BoardConfig,
        rng: &mut R,
    ) -> Result<BoardLayout, LayoutError>
    where
        R: Rng + ?Sized,
    {
        let dimensions = config.dimensions();
        let slot_values = match config.slot_values() {
            Some(values) => values.to_vec(),
            None => (0..dimensions.columns())
                .map(|_| rng.gen_range(0..=MAX_GENERATED_SLOT_VALUE))
                .collect(),
        };
        BoardLayout::new(dimensions, slot_values)
    }
}
