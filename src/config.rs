use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::classifier::TrainingConfig;
use crate::data::prepare::PrepareConfig;

#[derive(Parser, Debug)]
#[command(name = "wine-dash")]
#[command(about = "Explore the wine-quality dataset and classify wines.")]
pub struct CommandLine {
    /// CSV file with the eleven measurements and a quality score
    #[arg(long, default_value = "data/winequality-red.csv")]
    pub data: PathBuf,

    /// Field delimiter of the CSV file
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Seed for the train/test split
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Share of rows held out for evaluation
    #[arg(long, default_value_t = 0.20)]
    pub test_fraction: f64,

    /// L2 regularisation strength of the logistic regression
    #[arg(long, default_value_t = 1.0)]
    pub alpha: f64,

    /// Solver iteration cap
    #[arg(long, default_value_t = 100)]
    pub max_iterations: u64,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// Startup configuration, fixed for the process lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub delimiter: u8,
    pub preparation: PrepareConfig,
    pub training: TrainingConfig,
}

impl TryFrom<CommandLine> for DashboardConfig {
    type Error = anyhow::Error;

    fn try_from(cli: CommandLine) -> Result<Self> {
        if !(cli.test_fraction > 0.0 && cli.test_fraction < 1.0) {
            bail!("--test-fraction must lie strictly between 0 and 1, got {}", cli.test_fraction);
        }
        if !(cli.alpha.is_finite() && cli.alpha >= 0.0) {
            bail!("--alpha must be a non-negative number, got {}", cli.alpha);
        }
        if !cli.delimiter.is_ascii() {
            bail!("--delimiter must be a single ASCII character");
        }

        Ok(DashboardConfig {
            data_path: cli.data,
            delimiter: cli.delimiter as u8,
            preparation: PrepareConfig {
                test_fraction: cli.test_fraction,
                seed: cli.seed,
            },
            training: TrainingConfig {
                alpha: cli.alpha,
                max_iterations: cli.max_iterations,
                ..TrainingConfig::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<DashboardConfig> {
        let cli = CommandLine::try_parse_from(std::iter::once("wine-dash").chain(args.iter().copied()))?;
        DashboardConfig::try_from(cli)
    }

    #[test]
    fn defaults() {
        let cfg = parse(&[]).unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("data/winequality-red.csv"));
        assert_eq!(cfg.delimiter, b',');
        assert_eq!(cfg.preparation, PrepareConfig::default());
        assert_eq!(cfg.training, TrainingConfig::default());
    }

    #[test]
    fn overrides() {
        let cfg = parse(&[
            "--data",
            "red.csv",
            "--delimiter",
            ";",
            "--seed",
            "7",
            "--test-fraction",
            "0.25",
            "--max-iterations",
            "500",
        ])
        .unwrap();
        assert_eq!(cfg.data_path, PathBuf::from("red.csv"));
        assert_eq!(cfg.delimiter, b';');
        assert_eq!(cfg.preparation.seed, 7);
        assert_eq!(cfg.preparation.test_fraction, 0.25);
        assert_eq!(cfg.training.max_iterations, 500);
    }

    #[test]
    fn rejects_out_of_range_test_fraction() {
        assert!(parse(&["--test-fraction", "0"]).is_err());
        assert!(parse(&["--test-fraction", "1.0"]).is_err());
        assert!(parse(&["--test-fraction=-0.1"]).is_err());
    }

    #[test]
    fn rejects_negative_alpha() {
        assert!(parse(&["--alpha=-1"]).is_err());
    }
}
