//! Run configuration
//!
//! Every knob of a training run lives in [`RunConfig`]: hyperparameters,
//! data location, holdout fraction, split seed, and the tracking URI.
//! `validate()` rejects out-of-range values before any data is touched.

use crate::error::{Result, WinepressError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default overall regularization strength
pub const DEFAULT_ALPHA: f64 = 0.5;
/// Default L1/L2 mix
pub const DEFAULT_L1_RATIO: f64 = 0.5;
/// Default holdout fraction
pub const DEFAULT_TEST_FRACTION: f64 = 0.25;
/// Default tracking store location
pub const DEFAULT_TRACKING_URI: &str = "file:./mlruns";

/// Configuration for a single training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Path to the input CSV file
    pub data_path: PathBuf,
    /// Name of the label column
    pub target_column: String,
    /// Overall regularization strength (>= 0)
    pub alpha: f64,
    /// Mix between L1 and L2 penalty (0.0 = pure ridge, 1.0 = pure lasso)
    pub l1_ratio: f64,
    /// Fraction of rows held out for evaluation (0, 1)
    pub test_fraction: f64,
    /// Seed for the train/holdout partition; `None` draws from entropy
    pub seed: Option<u64>,
    /// Tracking store URI; a non-`file` scheme enables model registration
    pub tracking_uri: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("wine.csv"),
            target_column: "TARGET".to_string(),
            alpha: DEFAULT_ALPHA,
            l1_ratio: DEFAULT_L1_RATIO,
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: None,
            tracking_uri: DEFAULT_TRACKING_URI.to_string(),
        }
    }
}

impl RunConfig {
    /// Create a config with explicit hyperparameters and defaults elsewhere
    pub fn new(alpha: f64, l1_ratio: f64) -> Self {
        Self {
            alpha,
            l1_ratio,
            ..Default::default()
        }
    }

    /// Set the input data path
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    /// Set the label column name
    pub fn with_target_column(mut self, target: impl Into<String>) -> Self {
        self.target_column = target.into();
        self
    }

    /// Set the partition seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the tracking store URI
    pub fn with_tracking_uri(mut self, uri: impl Into<String>) -> Self {
        self.tracking_uri = uri.into();
        self
    }

    /// Validate field ranges
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha < 0.0 {
            return Err(WinepressError::ConfigError(format!(
                "alpha must be a finite non-negative number, got {}",
                self.alpha
            )));
        }
        if !self.l1_ratio.is_finite() || !(0.0..=1.0).contains(&self.l1_ratio) {
            return Err(WinepressError::ConfigError(format!(
                "l1_ratio must be in [0, 1], got {}",
                self.l1_ratio
            )));
        }
        if !self.test_fraction.is_finite() || self.test_fraction <= 0.0 || self.test_fraction >= 1.0 {
            return Err(WinepressError::ConfigError(format!(
                "test_fraction must be in (0, 1), got {}",
                self.test_fraction
            )));
        }
        if self.target_column.is_empty() {
            return Err(WinepressError::ConfigError(
                "target_column must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hyperparameters() {
        let config = RunConfig::default();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.l1_ratio, 0.5);
        assert_eq!(config.test_fraction, 0.25);
        assert_eq!(config.target_column, "TARGET");
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_negative_alpha() {
        let config = RunConfig::new(-0.1, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_l1_ratio_out_of_range() {
        assert!(RunConfig::new(0.5, 1.5).validate().is_err());
        assert!(RunConfig::new(0.5, -0.01).validate().is_err());
        assert!(RunConfig::new(0.5, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_rejects_degenerate_test_fraction() {
        let mut config = RunConfig::default();
        config.test_fraction = 0.0;
        assert!(config.validate().is_err());
        config.test_fraction = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_boundary_l1_ratios_are_valid() {
        assert!(RunConfig::new(0.0, 0.0).validate().is_ok());
        assert!(RunConfig::new(10.0, 1.0).validate().is_ok());
    }
}
