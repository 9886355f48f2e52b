//! Collects the game configuration from defaults, an optional file and flags.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use plinko_core::{BoardConfig, Settings};

use crate::args::Args;

/// Resolves and validates the settings described by the command line.
pub(crate) fn collect(args: &Args) -> Result<BoardConfig> {
    let mut settings = match &args.config {
        Some(path) => load(path)?,
        None => Settings::default(),
    };
    args.apply_to(&mut settings);
    settings.validate().context("invalid game settings")
}

fn load(path: &Path) -> Result<Settings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file '{}'", path.display()))?;
    toml::from_str(&contents)
        .with_context(|| format!("failed to parse settings file '{}'", path.display()))
}
