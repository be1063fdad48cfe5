//! Composite quality index
//!
//! Collapses all attributes of a product into one score per storage time.
//! For every attribute observed at a time point, the distance below the
//! threshold is expressed as a percentage of the threshold:
//!
//! ```text
//! distance = max(0, (threshold - value) / threshold * 100)
//! index    = 100 - mean(distance)
//! band     = index ± sample_std_dev(distance) * 1.96 / sqrt(n)
//! ```
//!
//! The band is a rough spread indicator for a handful of attributes, not a
//! statistically rigorous confidence interval.

use serde::Serialize;
use shelfcast_stats::descriptive::DescriptiveStats;

use crate::{observation::ObservationSet, threshold::Threshold};

/// z-value used for the band half-width.
pub const BAND_Z: f64 = 1.96;

/// Minimum number of scored time points for an index to be reported.
pub const MIN_TIME_POINTS: usize = 2;

/// Index value at a single storage time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QualityIndexPoint {
    pub time_months: f64,
    /// `100 - mean(distance)`
    pub index: f64,
    pub lower: f64,
    pub upper: f64,
    /// Number of attributes observed at this time
    pub attributes: usize,
}

/// Composite quality index over the observed storage times.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityIndex {
    pub points: Vec<QualityIndexPoint>,
}

impl QualityIndex {
    /// Builds the index for every distinct observed time point.
    ///
    /// Returns `None` when fewer than [`MIN_TIME_POINTS`] time points can be
    /// scored.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfcast_analysis::{
    ///     observation::{Observation, ObservationSet}, quality_index::QualityIndex,
    ///     threshold::Threshold,
    /// };
    ///
    /// let set = ObservationSet::from_observations([
    ///     Observation { attribute: "Odor".to_owned(), time_months: 0.0, value: 5.0 },
    ///     Observation { attribute: "Odor".to_owned(), time_months: 1.0, value: 7.5 },
    /// ]);
    /// let index = QualityIndex::build(&set, Threshold::new(10.0).unwrap()).unwrap();
    /// assert_eq!(index.points[0].index, 50.0);
    /// assert_eq!(index.points[1].index, 75.0);
    /// ```
    #[must_use]
    pub fn build(observations: &ObservationSet, threshold: Threshold) -> Option<Self> {
        let points = observations
            .time_points()
            .into_iter()
            .filter_map(|time_months| {
                let distances = observations
                    .iter()
                    .filter_map(|series| series.value_at(time_months))
                    .filter(|value| value.is_finite())
                    .map(|value| distance_percentage(value, threshold));
                score(time_months, distances)
            })
            .collect::<Vec<_>>();

        if points.len() < MIN_TIME_POINTS {
            tracing::debug!(
                scored = points.len(),
                "not enough time points for a quality index"
            );
            return None;
        }
        Some(Self { points })
    }
}

/// Distance below the threshold as a percentage of the threshold, floored at 0.
#[must_use]
pub fn distance_percentage(value: f64, threshold: Threshold) -> f64 {
    let threshold = threshold.value();
    ((threshold - value) / threshold * 100.0).max(0.0)
}

#[expect(clippy::cast_precision_loss)]
fn score<I>(time_months: f64, distances: I) -> Option<QualityIndexPoint>
where
    I: IntoIterator<Item = f64>,
{
    let stats = DescriptiveStats::new(distances)?;
    let index = 100.0 - stats.mean;
    let half_width = stats.sample_std_dev * BAND_Z / (stats.count as f64).sqrt();
    if !index.is_finite() || !half_width.is_finite() {
        tracing::debug!(time_months, "quality index band overflowed, point skipped");
        return None;
    }
    Some(QualityIndexPoint {
        time_months,
        index,
        lower: index - half_width,
        upper: index + half_width,
        attributes: stats.count,
    })
}
