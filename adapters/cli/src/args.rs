use std::path::PathBuf;

use clap::Parser;
use plinko_core::Settings;

/// Drops balls through a Plinko board in the terminal.
///
/// Flags override values read from `--config`, which override the defaults.
#[derive(Debug, Default, Parser)]
#[command(name = "plinko", version)]
pub(crate) struct Args {
    /// TOML file holding game settings.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Board width in columns (5-100).
    #[arg(long)]
    pub(crate) width: Option<u32>,
    /// Board length in rows (5-70).
    #[arg(long)]
    pub(crate) length: Option<u32>,
    /// Seconds between ball movements (0.01-10).
    #[arg(long, value_name = "SECONDS")]
    pub(crate) speed: Option<f64>,
    /// Number of balls to drop (1-1000).
    #[arg(long)]
    pub(crate) balls: Option<u32>,
    /// Idle ticks between two balls (0 up to the board length).
    #[arg(long)]
    pub(crate) gap: Option<u32>,
    /// Points for every slot, comma separated, one per column (0-1000000 each).
    #[arg(long, value_delimiter = ',', value_name = "POINTS")]
    pub(crate) slot_values: Option<Vec<u32>>,
    /// Symbol drawn between cells.
    #[arg(long)]
    pub(crate) bar: Option<char>,
    /// Symbol drawn for a ball.
    #[arg(long)]
    pub(crate) ball: Option<char>,
    /// Seed for a reproducible run.
    #[arg(long)]
    pub(crate) seed: Option<u64>,
}

impl Args {
    /// Overwrites every setting that was passed on the command line.
    pub(crate) fn apply_to(&self, settings: &mut Settings) {
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(length) = self.length {
            settings.length = length;
        }
        if let Some(speed) = self.speed {
            settings.speed_seconds = speed;
        }
        if let Some(balls) = self.balls {
            settings.ball_count = balls;
        }
        if let Some(gap) = self.gap {
            settings.ball_gap = gap;
        }
        if let Some(slot_values) = &self.slot_values {
            settings.slot_values = Some(slot_values.clone());
        }
        if let Some(bar) = self.bar {
            settings.bar_symbol = bar;
        }
        if let Some(ball) = self.ball {
            settings.ball_symbol = ball;
        }
        if let Some(seed) = self.seed {
            settings.seed = Some(seed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_slot_values() {
        let args = Args::try_parse_from([
            "plinko",
            "--width",
            "5",
            "--slot-values",
            "0,10,20,30,40",
        ])
        .expect("valid arguments");
        assert_eq!(args.width, Some(5));
        assert_eq!(args.slot_values, Some(vec![0, 10, 20, 30, 40]));
    }

    #[test]
    fn only_passed_flags_override_settings() {
        let args = Args::try_parse_from(["plinko", "--balls", "3", "--ball", "o", "--seed", "9"])
            .expect("valid arguments");
        let mut settings = Settings::default();
        args.apply_to(&mut settings);

        assert_eq!(
            settings,
            Settings {
                ball_count: 3,
                ball_symbol: 'o',
                seed: Some(9),
                ..Settings::default()
            }
        );
    }

    #[test]
    fn rejects_non_numeric_width() {
        assert!(Args::try_parse_from(["plinko", "--width", "wide"]).is_err());
    }
}
