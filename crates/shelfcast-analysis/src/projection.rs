//! Recent-window threshold projection
//!
//! Projects when an attribute will reach the failure threshold from its
//! latest few observations only, so the estimate reacts to the current rate
//! of degradation rather than the long-run average.
//!
//! # Algorithm
//!
//! 1. Take the last [`RECENT_WINDOW`] points of the time-sorted series.
//! 2. Fewer than 2 points or no spread in time → [`Projection::InsufficientData`].
//! 3. Fit an OLS line over the window.
//! 4. Latest value at/above threshold → [`Projection::AlreadyExceeded`].
//! 5. Slope ≤ 0 → [`Projection::NoThresholdApproach`].
//! 6. Otherwise solve the line for the threshold and round to one decimal.
//!
//! Only a strictly positive slope projects forward. There is no
//! extrapolation guard: the crossing month may lie far beyond the observed
//! range.

use serde::Serialize;
use shelfcast_stats::regression::{self, FitError};

use crate::{observation::TimeSeries, threshold::Threshold};

/// Number of most recent points used for the trend fit.
pub const RECENT_WINDOW: usize = 3;

/// Projected threshold crossing of a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "status", content = "month", rename_all = "snake_case")]
pub enum Projection {
    /// Not enough distinct time points to fit a trend.
    InsufficientData,
    /// The trend is flat or moving away from the threshold.
    NoThresholdApproach,
    /// The latest value is already at or past the threshold.
    AlreadyExceeded,
    /// Month (since production) at which the trend reaches the threshold.
    CrossingMonth(f64),
    /// The fit produced a non-finite result.
    ComputationFailed,
}

impl Projection {
    /// The projected month, if this is a numeric crossing.
    #[must_use]
    pub fn crossing_month(self) -> Option<f64> {
        match self {
            Self::CrossingMonth(month) => Some(month),
            _ => None,
        }
    }
}

/// Projects the threshold crossing of `series` from its recent window.
///
/// # Examples
///
/// ```
/// use shelfcast_analysis::{
///     observation::TimeSeries, projection::{Projection, project_crossing}, threshold::Threshold,
/// };
///
/// let series = TimeSeries::from_pairs("Odor", [(1.0, 5.0), (2.0, 5.5), (3.0, 6.0)]);
/// let threshold = Threshold::new(6.5).unwrap();
/// assert_eq!(project_crossing(&series, threshold), Projection::CrossingMonth(4.0));
/// ```
#[must_use]
pub fn project_crossing(series: &TimeSeries, threshold: Threshold) -> Projection {
    let window = series.recent_window(RECENT_WINDOW);
    let Some(latest) = window.last() else {
        return Projection::InsufficientData;
    };

    let x = window.iter().map(|p| p.time_months).collect::<Vec<_>>();
    let y = window.iter().map(|p| p.value).collect::<Vec<_>>();
    let fit = match regression::fit_line(&x, &y) {
        Ok(fit) => fit,
        Err(FitError::TooFewPoints { .. } | FitError::ZeroVariance) => {
            return Projection::InsufficientData;
        }
        Err(err @ (FitError::NonFinite | FitError::LengthMismatch { .. })) => {
            tracing::debug!(attribute = series.attribute(), %err, "trend fit failed");
            return Projection::ComputationFailed;
        }
    };

    if threshold.is_exceeded_by(latest.value) {
        return Projection::AlreadyExceeded;
    }
    if fit.slope <= 0.0 {
        return Projection::NoThresholdApproach;
    }

    match fit.solve_for(threshold.value()) {
        Some(month) => Projection::CrossingMonth(round_to_tenth(month)),
        None => Projection::ComputationFailed,
    }
}

/// Rounds to one decimal place, halves away from zero.
pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn two_point_fit_is_exact(
            t1 in 0.0_f64..24.0,
            dt in 0.1_f64..12.0,
            v1 in 0.0_f64..5.0,
            dv in 0.01_f64..1.0,
            margin in 0.01_f64..3.0,
        ) {
            let t2 = t1 + dt;
            let v2 = v1 + dv;
            let threshold_value = v2 + margin;
            let slope = (v2 - v1) / (t2 - t1);
            let series = TimeSeries::from_pairs("Odor", [(t1, v1), (t2, v2)]);
            let month = project_crossing(&series, Threshold::new(threshold_value).unwrap())
                .crossing_month()
                .expect("rising series below threshold projects a month");
            let expected = t2 + (threshold_value - v2) / slope;
            prop_assert!((month - expected).abs() <= 0.05 + 1e-6, "month = {month}, expected = {expected}");
        }

        #[test]
        fn rising_series_crosses_after_latest_point(
            start in 0.0_f64..3.0,
            steps in proptest::collection::vec((0.5_f64..3.0, 0.05_f64..0.5), 2..6),
        ) {
            let mut t = 0.0;
            let mut v = start;
            let mut pairs = vec![(t, v)];
            for (dt, dv) in steps {
                t += dt;
                v += dv;
                pairs.push((t, v));
            }
            let series = TimeSeries::from_pairs("Odor", pairs);
            let threshold = Threshold::new(v + 3.0).unwrap();
            let month = project_crossing(&series, threshold)
                .crossing_month()
                .expect("rising series below threshold projects a month");
            prop_assert!(month > t, "month = {month}, latest = {t}");
        }

        #[test]
        fn projection_is_deterministic(
            pairs in proptest::collection::vec((0.0_f64..36.0, 0.0_f64..9.0), 0..8),
            threshold in 1.0_f64..9.0,
        ) {
            let threshold = Threshold::new(threshold).unwrap();
            let a = project_crossing(&TimeSeries::from_pairs("Odor", pairs.clone()), threshold);
            let b = project_crossing(&TimeSeries::from_pairs("Odor", pairs), threshold);
            prop_assert_eq!(a, b);
        }
    }
}
