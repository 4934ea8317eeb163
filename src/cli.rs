//! Command-line interface
//!
//! Hyperparameters are positional to match the historical invocation
//! (`winepress 0.5 0.5`); both default to 0.5 when omitted. Everything else
//! is a flag with a sensible default.

use clap::Parser;
use colored::*;
use std::path::PathBuf;

use crate::config::{RunConfig, DEFAULT_ALPHA, DEFAULT_L1_RATIO, DEFAULT_TRACKING_URI};
use crate::run::RunSummary;

#[derive(Parser, Debug)]
#[command(name = "winepress")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Train an ElasticNet regressor on a wine-quality dataset and track the run")]
pub struct Cli {
    /// Overall regularization strength
    #[arg(value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Mix between L1 and L2 penalty (0..1)
    #[arg(value_name = "L1_RATIO")]
    pub l1_ratio: Option<f64>,

    /// Input CSV file
    #[arg(short, long, default_value = "wine.csv")]
    pub data: PathBuf,

    /// Label column name
    #[arg(short, long, default_value = "TARGET")]
    pub target: String,

    /// Tracking store URI; a non-file scheme enables model registration
    #[arg(long, env = "WINEPRESS_TRACKING_URI", default_value = DEFAULT_TRACKING_URI)]
    pub tracking_uri: String,

    /// Seed for the train/holdout partition
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Resolve arguments into a validated-later run configuration
    pub fn into_config(self) -> RunConfig {
        RunConfig {
            data_path: self.data,
            target_column: self.target,
            alpha: self.alpha.unwrap_or(DEFAULT_ALPHA),
            l1_ratio: self.l1_ratio.unwrap_or(DEFAULT_L1_RATIO),
            seed: self.seed,
            tracking_uri: self.tracking_uri,
            ..RunConfig::default()
        }
    }
}

fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}

/// Print the run outcome
pub fn print_summary(summary: &RunSummary) {
    println!();
    println!("  {:<12} {}", muted("Run"), summary.run_id.white());
    println!(
        "  {:<12} {} train / {} holdout",
        muted("Rows"),
        summary.n_train,
        summary.n_test
    );
    println!("  {:<12} {}", muted("RMSE"), format!("{:.4}", summary.report.rmse).white().bold());
    println!("  {:<12} {}", muted("MAE"), format!("{:.4}", summary.report.mae).white());
    println!("  {:<12} {}", muted("R²"), format!("{:.4}", summary.report.r2).white());
    if summary.registered {
        println!("  {:<12} {}", muted("Registry"), crate::run::REGISTERED_MODEL_NAME.white());
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_defaults_to_half_half() {
        let cli = Cli::try_parse_from(["winepress"]).unwrap();
        let config = cli.into_config();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.l1_ratio, 0.5);
        assert_eq!(config.data_path, PathBuf::from("wine.csv"));
        assert_eq!(config.target_column, "TARGET");
    }

    #[test]
    fn test_explicit_defaults_match_omitted() {
        let explicit = Cli::try_parse_from(["winepress", "0.5", "0.5"])
            .unwrap()
            .into_config();
        let omitted = Cli::try_parse_from(["winepress"]).unwrap().into_config();
        assert_eq!(explicit.alpha, omitted.alpha);
        assert_eq!(explicit.l1_ratio, omitted.l1_ratio);
    }

    #[test]
    fn test_single_positional_sets_alpha_only() {
        let config = Cli::try_parse_from(["winepress", "0.9"])
            .unwrap()
            .into_config();
        assert_eq!(config.alpha, 0.9);
        assert_eq!(config.l1_ratio, 0.5);
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Cli::try_parse_from([
            "winepress",
            "0.3",
            "0.7",
            "--data",
            "other.csv",
            "--tracking-uri",
            "http://tracking:5000",
            "--seed",
            "33",
        ])
        .unwrap()
        .into_config();
        assert_eq!(config.alpha, 0.3);
        assert_eq!(config.l1_ratio, 0.7);
        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.tracking_uri, "http://tracking:5000");
        assert_eq!(config.seed, Some(33));
    }

    #[test]
    fn test_non_numeric_positional_is_rejected() {
        assert!(Cli::try_parse_from(["winepress", "abc"]).is_err());
    }
}
