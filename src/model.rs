//! Elastic net linear regression
//!
//! Cyclical coordinate descent with soft thresholding. The objective is
//!
//! ```text
//! 1/2 ||y - Xw||² + alpha * l1_ratio * n * ||w||₁
//!                 + alpha * (1 - l1_ratio) * n / 2 * ||w||²
//! ```
//!
//! `l1_ratio = 0` reduces to ridge, `l1_ratio = 1` to lasso. The intercept is
//! handled by centering and never penalized. Fitting is deterministic for
//! identical inputs.

use crate::error::{Result, WinepressError};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};

/// Soft-threshold operator for the L1 proximal step
fn soft_threshold(val: f64, threshold: f64) -> f64 {
    if val > threshold {
        val - threshold
    } else if val < -threshold {
        val + threshold
    } else {
        0.0
    }
}

/// Elastic-net-regularized linear regression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElasticNet {
    /// Overall regularization strength
    pub alpha: f64,
    /// L1/L2 mix (clamped to [0, 1])
    pub l1_ratio: f64,
    /// Whether to fit an unpenalized intercept
    pub fit_intercept: bool,
    /// Maximum coordinate descent sweeps
    pub max_iter: usize,
    /// Convergence tolerance on the L1 norm of the coefficient update
    pub tol: f64,
    /// Fitted coefficients, `None` before `fit`
    pub coefficients: Option<Array1<f64>>,
    /// Fitted intercept, `None` before `fit`
    pub intercept: Option<f64>,
}

impl Default for ElasticNet {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

impl ElasticNet {
    /// Create an unfitted model with the given hyperparameters
    pub fn new(alpha: f64, l1_ratio: f64) -> Self {
        Self {
            alpha,
            l1_ratio: l1_ratio.clamp(0.0, 1.0),
            fit_intercept: true,
            max_iter: 1000,
            tol: 1e-6,
            coefficients: None,
            intercept: None,
        }
    }

    /// Set the maximum number of coordinate descent sweeps
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Enable/disable the intercept
    pub fn with_fit_intercept(mut self, fit_intercept: bool) -> Self {
        self.fit_intercept = fit_intercept;
        self
    }

    /// Whether `fit` has completed
    pub fn is_fitted(&self) -> bool {
        self.coefficients.is_some()
    }

    /// Fit coefficients to training data.
    ///
    /// Rejects mismatched shapes and empty inputs; any NaN in the data simply
    /// flows through the arithmetic, as the underlying solver makes no
    /// validity guarantees about its inputs.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples != y.len() {
            return Err(WinepressError::ShapeError {
                expected: format!("{} targets", n_samples),
                actual: format!("{} targets", y.len()),
            });
        }
        if n_samples == 0 || n_features == 0 {
            return Err(WinepressError::TrainingError(
                "cannot fit on an empty matrix".to_string(),
            ));
        }

        // Center when fitting an intercept so the penalty never touches it
        let (x_c, y_c, x_mean, y_mean) = if self.fit_intercept {
            let xm = x.mean_axis(Axis(0)).ok_or_else(|| {
                WinepressError::TrainingError("mean of empty axis".to_string())
            })?;
            let ym = y.mean().unwrap_or(0.0);
            (x - &xm.clone().insert_axis(Axis(0)), y - ym, Some(xm), Some(ym))
        } else {
            (x.clone(), y.clone(), None, None)
        };

        let col_norms: Vec<f64> = (0..n_features)
            .map(|j| x_c.column(j).mapv(|v| v * v).sum())
            .collect();

        let n = n_samples as f64;
        let l1_penalty = self.alpha * self.l1_ratio * n;
        let l2_penalty = self.alpha * (1.0 - self.l1_ratio) * n;

        let mut w: Array1<f64> = Array1::zeros(n_features);

        for _sweep in 0..self.max_iter {
            let w_prev = w.clone();

            // Residual is maintained incrementally across coordinate updates
            let mut r = &y_c - &x_c.dot(&w);

            for j in 0..n_features {
                let denom = col_norms[j] + l2_penalty;
                if denom < 1e-15 {
                    w[j] = 0.0;
                    continue;
                }
                let rho = x_c.column(j).dot(&r) + col_norms[j] * w[j];
                let w_old = w[j];
                w[j] = soft_threshold(rho, l1_penalty) / denom;
                if w_old != w[j] {
                    r = r + &(&x_c.column(j) * (w_old - w[j]));
                }
            }

            if (&w - &w_prev).mapv(f64::abs).sum() < self.tol {
                break;
            }
        }

        self.intercept = if self.fit_intercept {
            // x_mean/y_mean are present exactly when fit_intercept is set
            Some(y_mean.unwrap_or(0.0) - w.dot(&x_mean.unwrap_or_else(|| Array1::zeros(n_features))))
        } else {
            Some(0.0)
        };
        self.coefficients = Some(w);

        Ok(self)
    }

    /// Predict targets for a feature matrix
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or(WinepressError::ModelNotFitted)?;
        if x.ncols() != coefficients.len() {
            return Err(WinepressError::ShapeError {
                expected: format!("{} features", coefficients.len()),
                actual: format!("{} features", x.ncols()),
            });
        }
        Ok(x.dot(coefficients) + self.intercept.unwrap_or(0.0))
    }
}
