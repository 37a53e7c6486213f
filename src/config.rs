// src/config.rs
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::drivers::{ColumnNames, MonitorError, DEFAULT_COLUMN_COUNT, DEFAULT_INTERVAL};

#[derive(Parser, Debug)]
#[command(name = "tailscope")]
#[command(about = "Plot the most recent rows of a growing comma-delimited file")]
pub struct Cli {
    /// File to tail
    #[arg(long, default_value = "out.txt")]
    pub fname: PathBuf,

    /// Lines kept from the end of the file on each refresh
    #[arg(long, default_value_t = 100)]
    pub nrows: usize,

    /// Start fullscreen (0 or 1)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=1))]
    pub fullscreen: u8,

    /// Column labels, applied left to right
    #[arg(short = 'v', long = "vars", num_args = 1.., value_name = "NAME")]
    pub vars: Vec<String>,

    /// Fixed number of columns per row
    #[arg(long, default_value_t = DEFAULT_COLUMN_COUNT)]
    pub ncols: usize,

    /// Refresh period in milliseconds
    #[arg(long, value_name = "MS", default_value_t = DEFAULT_INTERVAL.as_millis() as u64)]
    pub interval: u64,

    /// Read once, print the table as JSON and exit
    #[arg(long, conflicts_with = "snapshot")]
    pub once: bool,

    /// Read once, render the chart to this PNG file and exit
    #[arg(long, value_name = "PNG")]
    pub snapshot: Option<PathBuf>,
}

/// How the process presents its output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunMode {
    Window { fullscreen: bool },
    PrintOnce,
    Snapshot(PathBuf),
}

/// Validated startup configuration; never changes after the first tick.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    pub path: PathBuf,
    pub window_bound: usize,
    pub columns: ColumnNames,
    pub interval: Duration,
    pub mode: RunMode,
}

impl MonitorConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, MonitorError> {
        if cli.nrows == 0 {
            return Err(MonitorError::InvalidWindowBound);
        }
        if cli.ncols == 0 {
            return Err(MonitorError::InvalidColumnCount);
        }
        if cli.interval == 0 {
            return Err(MonitorError::InvalidInterval);
        }
        let (columns, dropped) = ColumnNames::with_overrides(cli.ncols, &cli.vars);
        if dropped > 0 {
            log::warn!(
                "{dropped} column name(s) ignored: only {} columns are plotted",
                cli.ncols
            );
        }
        let mode = match (cli.once, cli.snapshot) {
            (true, _) => RunMode::PrintOnce,
            (false, Some(path)) => RunMode::Snapshot(path),
            (false, None) => RunMode::Window {
                fullscreen: cli.fullscreen == 1,
            },
        };
        Ok(Self {
            path: cli.fname,
            window_bound: cli.nrows,
            columns,
            interval: Duration::from_millis(cli.interval),
            mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<MonitorConfig, MonitorError> {
        let cli = Cli::try_parse_from(std::iter::once("tailscope").chain(args.iter().copied()))
            .unwrap();
        MonitorConfig::from_cli(cli)
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.path, PathBuf::from("out.txt"));
        assert_eq!(config.window_bound, 100);
        assert_eq!(config.columns, ColumnNames::positional(10));
        assert_eq!(config.interval, Duration::from_millis(500));
        assert_eq!(config.mode, RunMode::Window { fullscreen: false });
    }

    #[test]
    fn vars_override_leading_columns() {
        let config = parse(&["--fullscreen", "1", "-v", "roll", "pitch"]).unwrap();
        assert_eq!(config.columns.get(0), Some("roll"));
        assert_eq!(config.columns.get(1), Some("pitch"));
        assert_eq!(config.columns.get(2), Some("var 2"));
        assert_eq!(config.columns.len(), 10);
        assert_eq!(config.mode, RunMode::Window { fullscreen: true });
    }

    #[test]
    fn zero_window_bound_is_a_configuration_error() {
        assert!(matches!(
            parse(&["--nrows", "0"]),
            Err(MonitorError::InvalidWindowBound)
        ));
        assert!(matches!(
            parse(&["--ncols", "0"]),
            Err(MonitorError::InvalidColumnCount)
        ));
    }

    #[test]
    fn fullscreen_accepts_only_zero_or_one() {
        assert!(Cli::try_parse_from(["tailscope", "--fullscreen", "2"]).is_err());
    }

    #[test]
    fn headless_modes() {
        assert_eq!(parse(&["--once"]).unwrap().mode, RunMode::PrintOnce);
        assert_eq!(
            parse(&["--snapshot", "chart.png"]).unwrap().mode,
            RunMode::Snapshot(PathBuf::from("chart.png"))
        );
    }
}
