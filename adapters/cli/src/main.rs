#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Plinko game in the terminal.

mod args;
mod settings;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use plinko_rendering::{Symbols, TerminalPresenter, TextRenderer};
use plinko_simulation::{Simulation, SpawnConfig};
use plinko_system_bootstrap::Bootstrap;
use plinko_world::query;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::args::Args;

/// Log filter applied when `RUST_LOG` is unset; frames own stdout, so stay quiet.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Entry point for the Plinko command-line interface.
#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    let config = settings::collect(&args)?;
    info!(?config, "configuration resolved");

    let mut rng = match config.seed() {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let bootstrap = Bootstrap;
    let layout = bootstrap
        .board_layout(&config, &mut rng)
        .context("failed to lay out the board")?;
    info!(slot_values = ?layout.slot_values(), "board laid out");

    let schedule = SpawnConfig::new(config.ball_count(), config.ball_gap());
    let mut simulation = Simulation::new(layout, schedule, rng);

    let renderer = TextRenderer::new(Symbols::new(config.bar_symbol(), config.ball_symbol()));
    let mut presenter = TerminalPresenter::new(io::stdout());
    presenter.begin(bootstrap.welcome_banner(simulation.world()))?;

    let score = simulation
        .run(config.tick_interval(), |world, report| {
            let frame = renderer.render(query::occupancy_view(world), report.score);
            presenter.present(&frame)
        })
        .await?;

    presenter.finish(score)
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
