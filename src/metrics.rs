//! Regression evaluation metrics

use crate::error::{Result, WinepressError};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// The three holdout-quality scalars of a run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RegressionReport {
    /// Root mean squared error
    pub rmse: f64,
    /// Mean absolute error
    pub mae: f64,
    /// Coefficient of determination
    pub r2: f64,
}

impl RegressionReport {
    /// Compute RMSE, MAE and R² from targets and predictions.
    ///
    /// R² is defined as 0 for a zero-variance target vector.
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        if y_true.len() != y_pred.len() {
            return Err(WinepressError::ShapeError {
                expected: format!("{} predictions", y_true.len()),
                actual: format!("{} predictions", y_pred.len()),
            });
        }
        if y_true.is_empty() {
            return Err(WinepressError::DataError(
                "cannot score an empty holdout set".to_string(),
            ));
        }

        let n = y_true.len() as f64;
        let residuals: Vec<f64> = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| t - p)
            .collect();

        let mse = residuals.iter().map(|e| e * e).sum::<f64>() / n;
        let mae = residuals.iter().map(|e| e.abs()).sum::<f64>() / n;

        let y_mean = y_true.sum() / n;
        let ss_tot: f64 = y_true.iter().map(|y| (y - y_mean).powi(2)).sum();
        let ss_res: f64 = residuals.iter().map(|e| e.powi(2)).sum();
        let r2 = if ss_tot > 0.0 { 1.0 - ss_res / ss_tot } else { 0.0 };

        Ok(Self {
            rmse: mse.sqrt(),
            mae,
            r2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rmse_squared_equals_mean_squared_residual() {
        let y_true = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y_pred = array![1.5, 1.5, 3.5, 3.0, 5.5];
        let report = RegressionReport::compute(&y_true, &y_pred).unwrap();

        let mse: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).powi(2))
            .sum::<f64>()
            / y_true.len() as f64;
        assert!((report.rmse.powi(2) - mse).abs() < 1e-12);
    }

    #[test]
    fn test_r2_is_one_for_perfect_prediction() {
        let y = array![1.0, 2.0, 3.0, 4.0];
        let report = RegressionReport::compute(&y, &y.clone()).unwrap();
        assert_eq!(report.r2, 1.0);
        assert_eq!(report.rmse, 0.0);
        assert_eq!(report.mae, 0.0);
    }

    #[test]
    fn test_r2_below_one_for_imperfect_prediction() {
        let y_true = array![1.0, 2.0, 3.0, 4.0];
        let y_pred = array![1.1, 2.0, 2.9, 4.2];
        let report = RegressionReport::compute(&y_true, &y_pred).unwrap();
        assert!(report.r2 < 1.0);
        assert!(report.r2 > 0.9);
    }

    #[test]
    fn test_r2_zero_variance_target() {
        let y_true = array![2.0, 2.0, 2.0];
        let y_pred = array![1.0, 2.0, 3.0];
        let report = RegressionReport::compute(&y_true, &y_pred).unwrap();
        assert_eq!(report.r2, 0.0);
    }

    #[test]
    fn test_mae_known_value() {
        let y_true = array![0.0, 0.0, 0.0, 0.0];
        let y_pred = array![1.0, -1.0, 2.0, -2.0];
        let report = RegressionReport::compute(&y_true, &y_pred).unwrap();
        assert_eq!(report.mae, 1.5);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let y_true = array![1.0, 2.0];
        let y_pred = array![1.0];
        assert!(RegressionReport::compute(&y_true, &y_pred).is_err());
    }
}
