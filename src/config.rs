use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::rule_set::RuleSet;
use crate::sim::Brush;

/// Conway's Game of Life on a torus, in your terminal.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Number of rows in the grid
    #[arg(long, value_name = "ROWS", default_value_t = 100)]
    pub rows: usize,

    /// Number of columns in the grid
    #[arg(long, value_name = "COLUMNS", default_value_t = 150)]
    pub columns: usize,

    /// Side length of a cell on screen, in braille dots
    #[arg(
        long = "cell-size",
        value_name = "DOTS",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..=8)
    )]
    pub cell_size: u16,

    /// Chance of each cell starting alive when the grid is seeded
    #[arg(
        long = "seed-percent",
        value_name = "PERCENT",
        default_value_t = 30,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub seed_percent: u8,

    /// Start, and reset to, an empty grid instead of a randomly seeded one
    #[arg(long)]
    pub empty: bool,

    /// Birth/survival rule in B/S notation
    #[arg(long, value_name = "RULE", default_value = "B3/S23")]
    pub rule: RuleSet,

    /// Cells brought to life by each pointer position while dragging
    #[arg(long, value_enum, default_value_t = Brush::Square)]
    pub brush: Brush,

    /// Seed for the random number generator, for reproducible grids
    #[arg(long = "rng-seed", value_name = "SEED")]
    pub rng_seed: Option<u64>,

    /// Frames drawn per second. At most one generation is computed per frame.
    #[arg(
        long,
        value_name = "FPS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub fps: u32,

    /// Write logs to this file. Filter with `RUST_LOG`.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::parse_from(["torus-life"])
    }
}

impl Config {
    pub fn frame_time(&self) -> Duration {
        Duration::from_secs_f64(1f64 / self.fps as f64)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use clap::Parser;

    use super::Config;
    use crate::rule_set::B3S23;
    use crate::rule_set::RuleSet;
    use crate::sim::Brush;

    #[test]
    fn defaults() {
        let config = Config::default();

        assert_eq!((config.rows, config.columns), (100, 150));
        assert_eq!(config.cell_size, 1);
        assert_eq!(config.seed_percent, 30);
        assert!(!config.empty);
        assert_eq!(config.rule, B3S23);
        assert_eq!(config.brush, Brush::Square);
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.fps, 60);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn parses_everything() {
        let config = Config::try_parse_from([
            "torus-life",
            "--rows",
            "20",
            "--columns",
            "40",
            "--cell-size",
            "2",
            "--seed-percent",
            "55",
            "--empty",
            "--rule",
            "B36/S23",
            "--brush",
            "single",
            "--rng-seed",
            "9",
            "--fps",
            "10",
            "--log-file",
            "life.log",
        ])
        .unwrap();

        assert_eq!((config.rows, config.columns), (20, 40));
        assert_eq!(config.cell_size, 2);
        assert_eq!(config.seed_percent, 55);
        assert!(config.empty);
        assert_eq!(config.rule, "B36/S23".parse::<RuleSet>().unwrap());
        assert_eq!(config.brush, Brush::Single);
        assert_eq!(config.rng_seed, Some(9));
        assert_eq!(config.frame_time(), Duration::from_millis(100));
        assert_eq!(config.log_file.unwrap().to_str(), Some("life.log"));
    }

    #[test]
    fn rejects_out_of_range() {
        for args in [
            ["--seed-percent", "101"],
            ["--fps", "0"],
            ["--cell-size", "0"],
            ["--rule", "B9/S23"],
            ["--brush", "circle"],
        ] {
            let argv = std::iter::once("torus-life").chain(args);

            assert!(Config::try_parse_from(argv).is_err(), "{args:?}");
        }
    }
}
