//! Full-history regression per attribute
//!
//! A second, slower-moving estimate next to the recent-window
//! [`projection`](crate::projection): an OLS line over every observation of
//! the attribute, reported with its R². The two estimates answer different
//! questions and are reported side by side rather than reconciled.

use std::collections::BTreeMap;

use serde::Serialize;
use shelfcast_stats::regression::{self, FitError, LinearFit};

use crate::{
    observation::{ObservationSet, TimeSeries},
    projection::round_to_tenth,
    threshold::Threshold,
};

/// Minimum number of observations for a full-history fit.
pub const MIN_REGRESSION_POINTS: usize = 3;

/// Crossing month projected from the full-history line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "status", content = "month", rename_all = "snake_case")]
pub enum RegressionProjection {
    CrossingMonth(f64),
    /// The line is flat or falling.
    Undetermined,
}

/// Full-history regression outcome of one attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FullHistoryRegression {
    Fitted {
        #[serde(flatten)]
        fit: LinearFit,
        projection: RegressionProjection,
    },
    InsufficientData,
    ComputationFailed,
}

impl FullHistoryRegression {
    /// Fits `series` over its whole history.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfcast_analysis::{
    ///     observation::TimeSeries,
    ///     regression_report::{FullHistoryRegression, RegressionProjection},
    ///     threshold::Threshold,
    /// };
    ///
    /// let series = TimeSeries::from_pairs("Odor", [(0.0, 4.0), (1.0, 4.5), (2.0, 5.0), (3.0, 5.5)]);
    /// let FullHistoryRegression::Fitted { fit, projection } =
    ///     FullHistoryRegression::from_series(&series, Threshold::new(6.5).unwrap())
    /// else {
    ///     panic!("expected a fit");
    /// };
    /// assert_eq!(fit.slope, 0.5);
    /// assert_eq!(projection, RegressionProjection::CrossingMonth(5.0));
    /// ```
    #[must_use]
    pub fn from_series(series: &TimeSeries, threshold: Threshold) -> Self {
        if series.len() < MIN_REGRESSION_POINTS {
            return Self::InsufficientData;
        }
        let (x, y): (Vec<f64>, Vec<f64>) = series
            .points()
            .iter()
            .map(|p| (p.time_months, p.value))
            .unzip();
        let fit = match regression::fit_line(&x, &y) {
            Ok(fit) => fit,
            Err(FitError::TooFewPoints { .. } | FitError::ZeroVariance) => {
                return Self::InsufficientData;
            }
            Err(err @ (FitError::NonFinite | FitError::LengthMismatch { .. })) => {
                tracing::debug!(attribute = series.attribute(), %err, "full-history fit failed");
                return Self::ComputationFailed;
            }
        };

        let projection = if fit.slope > 0.0 {
            match fit.solve_for(threshold.value()) {
                Some(month) => RegressionProjection::CrossingMonth(round_to_tenth(month)),
                None => return Self::ComputationFailed,
            }
        } else {
            RegressionProjection::Undetermined
        };
        Self::Fitted { fit, projection }
    }

    /// Fits every attribute of `observations`.
    #[must_use]
    pub fn for_each_attribute(
        observations: &ObservationSet,
        threshold: Threshold,
    ) -> BTreeMap<String, Self> {
        observations
            .iter()
            .map(|series| {
                (
                    series.attribute().to_owned(),
                    Self::from_series(series, threshold),
                )
            })
            .collect()
    }
}
