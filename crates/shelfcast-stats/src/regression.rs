//! Ordinary least-squares line fitting.
//!
//! Fits `y = intercept + slope · x` by minimizing squared residuals, the same
//! result as a first-degree polynomial fit.
//!
//! # Examples
//!
//! ```
//! use shelfcast_stats::regression::fit_line;
//!
//! let x = [1.0, 2.0, 3.0];
//! let y = [5.0, 5.5, 6.0];
//! let fit = fit_line(&x, &y).unwrap();
//! assert_eq!(fit.slope, 0.5);
//! assert_eq!(fit.intercept, 4.5);
//! assert_eq!(fit.solve_for(6.5), Some(4.0));
//! ```

use serde::Serialize;

/// Reasons a line cannot be fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum FitError {
    #[display("x and y have different lengths ({x_len} vs {y_len})")]
    LengthMismatch { x_len: usize, y_len: usize },
    #[display("at least 2 points are required, got {count}")]
    TooFewPoints { count: usize },
    #[display("all x values are identical")]
    ZeroVariance,
    #[display("input or result contains a non-finite value")]
    NonFinite,
}

/// Result of a simple linear regression: `y = intercept + slope · x`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    /// Slope coefficient (β₁).
    pub slope: f64,
    /// Intercept (β₀).
    pub intercept: f64,
    /// Coefficient of determination (R²).
    ///
    /// `1.0` when `y` has no variance, since the fit is then exact.
    pub r_squared: f64,
    /// Number of points the line was fitted on.
    pub points: usize,
}

/// Fits an OLS line through `(x[i], y[i])`.
///
/// # Algorithm
///
/// β₁ = Σ(x−x̄)(y−ȳ) / Σ(x−x̄)²
/// β₀ = ȳ − β₁·x̄
///
/// # Errors
///
/// * [`FitError::LengthMismatch`] - `x` and `y` differ in length
/// * [`FitError::TooFewPoints`] - fewer than 2 points
/// * [`FitError::ZeroVariance`] - every `x` is the same
/// * [`FitError::NonFinite`] - an input or a coefficient is NaN or infinite,
///   or the spread of `x` underflows
///
/// # References
///
/// Draper & Smith (1998). "Applied Regression Analysis", 3rd edition.
#[expect(clippy::cast_precision_loss)]
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<LinearFit, FitError> {
    let n = x.len();
    if n != y.len() {
        return Err(FitError::LengthMismatch {
            x_len: n,
            y_len: y.len(),
        });
    }
    if n < 2 {
        return Err(FitError::TooFewPoints { count: n });
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return Err(FitError::NonFinite);
    }
    if x.iter().all(|&xi| xi == x[0]) {
        return Err(FitError::ZeroVariance);
    }

    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;

    let (ss_x, ss_xy) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(ss_x, ss_xy), (&xi, &yi)| {
            let dx = xi - x_mean;
            (ss_x + dx * dx, ss_xy + dx * (yi - y_mean))
        });
    // distinct x whose squared deviations underflow to zero
    if ss_x <= 0.0 {
        return Err(FitError::NonFinite);
    }

    let slope = ss_xy / ss_x;
    let intercept = y_mean - slope * x_mean;
    if !slope.is_finite() || !intercept.is_finite() {
        return Err(FitError::NonFinite);
    }

    let (ss_res, ss_tot) = x
        .iter()
        .zip(y)
        .fold((0.0, 0.0), |(ss_res, ss_tot), (&xi, &yi)| {
            let residual = yi - (intercept + slope * xi);
            (
                ss_res + residual * residual,
                ss_tot + (yi - y_mean).powi(2),
            )
        });
    let r_squared = if ss_tot > 1e-300 {
        1.0 - ss_res / ss_tot
    } else {
        1.0
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
        points: n,
    })
}

impl LinearFit {
    /// Evaluates the fitted line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Returns the `x` at which the line reaches `y`.
    ///
    /// `None` for a flat line or a non-finite result.
    #[must_use]
    pub fn solve_for(&self, y: f64) -> Option<f64> {
        if self.slope == 0.0 {
            return None;
        }
        let x = (y - self.intercept) / self.slope;
        x.is_finite().then_some(x)
    }
}
