//! Time-tagged observations and per-attribute series
//!
//! An [`Observation`] is one (already replicate-averaged) value of one
//! attribute at one storage time. [`ObservationSet`] groups the observations
//! of a single product into one [`TimeSeries`] per attribute, sorted by time,
//! keeping attributes in the order they first appear in the input.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single measured value of one attribute at one storage time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Attribute identifier (e.g. "Color", "Odor")
    pub attribute: String,
    /// Storage time in months since production
    pub time_months: f64,
    /// Measured value
    pub value: f64,
}

/// One point of a [`TimeSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimePoint {
    pub time_months: f64,
    pub value: f64,
}

/// Time-ordered observations of a single attribute.
///
/// Points are sorted by `time_months` ascending. Duplicate time stamps are
/// not merged.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    attribute: String,
    points: Vec<TimePoint>,
}

impl TimeSeries {
    /// Builds a series from points in any order.
    #[must_use]
    pub fn new(attribute: impl Into<String>, mut points: Vec<TimePoint>) -> Self {
        points.sort_by(|a, b| a.time_months.total_cmp(&b.time_months));
        Self {
            attribute: attribute.into(),
            points,
        }
    }

    /// Builds a series from `(time_months, value)` pairs in any order.
    #[must_use]
    pub fn from_pairs<I>(attribute: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let points = pairs
            .into_iter()
            .map(|(time_months, value)| TimePoint { time_months, value })
            .collect();
        Self::new(attribute, points)
    }

    #[must_use]
    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    #[must_use]
    pub fn points(&self) -> &[TimePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The most recent point.
    #[must_use]
    pub fn latest(&self) -> Option<TimePoint> {
        self.points.last().copied()
    }

    /// The last `size` points (or all of them if there are fewer).
    #[must_use]
    pub fn recent_window(&self, size: usize) -> &[TimePoint] {
        &self.points[self.points.len().saturating_sub(size)..]
    }

    /// Value observed at exactly `time_months`, if any.
    #[must_use]
    pub fn value_at(&self, time_months: f64) -> Option<f64> {
        self.points
            .iter()
            .find(|p| p.time_months == time_months)
            .map(|p| p.value)
    }
}

/// All attribute series of one product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObservationSet {
    series: Vec<TimeSeries>,
}

impl ObservationSet {
    /// Groups observations by attribute.
    ///
    /// Observations with a non-finite value, a non-finite time or a negative
    /// time are skipped.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfcast_analysis::observation::{Observation, ObservationSet};
    ///
    /// let observations = [("Odor", 2.0, 5.5), ("Color", 1.0, 4.0), ("Odor", 1.0, 5.0)]
    ///     .map(|(attribute, time_months, value)| Observation {
    ///         attribute: attribute.to_owned(),
    ///         time_months,
    ///         value,
    ///     });
    /// let set = ObservationSet::from_observations(observations);
    ///
    /// let names: Vec<_> = set.iter().map(|s| s.attribute()).collect();
    /// assert_eq!(names, ["Odor", "Color"]);
    /// assert_eq!(set.current_month(), Some(2.0));
    /// ```
    #[must_use]
    pub fn from_observations<I>(observations: I) -> Self
    where
        I: IntoIterator<Item = Observation>,
    {
        let mut index = HashMap::<String, usize>::new();
        let mut grouped = Vec::<(String, Vec<TimePoint>)>::new();

        for obs in observations {
            if !obs.value.is_finite() || !obs.time_months.is_finite() || obs.time_months < 0.0 {
                tracing::debug!(
                    attribute = %obs.attribute,
                    time_months = obs.time_months,
                    value = obs.value,
                    "skipping invalid observation"
                );
                continue;
            }
            let point = TimePoint {
                time_months: obs.time_months,
                value: obs.value,
            };
            match index.get(&obs.attribute) {
                Some(&i) => grouped[i].1.push(point),
                None => {
                    index.insert(obs.attribute.clone(), grouped.len());
                    grouped.push((obs.attribute, vec![point]));
                }
            }
        }

        let series = grouped
            .into_iter()
            .map(|(attribute, points)| TimeSeries::new(attribute, points))
            .collect();
        Self { series }
    }

    /// Series in first-appearance order of their attribute.
    pub fn iter(&self) -> impl Iterator<Item = &TimeSeries> + '_ {
        self.series.iter()
    }

    #[must_use]
    pub fn get(&self, attribute: &str) -> Option<&TimeSeries> {
        self.series.iter().find(|s| s.attribute == attribute)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The analysis "now": the latest storage time observed for any attribute.
    #[must_use]
    pub fn current_month(&self) -> Option<f64> {
        self.series
            .iter()
            .filter_map(TimeSeries::latest)
            .map(|p| p.time_months)
            .max_by(f64::total_cmp)
    }

    /// Distinct observed storage times across all attributes, ascending.
    #[must_use]
    pub fn time_points(&self) -> Vec<f64> {
        let mut times = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.time_months))
            .collect::<Vec<_>>();
        times.sort_by(f64::total_cmp);
        times.dedup();
        times
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a TimeSeries;
    type IntoIter = std::slice::Iter<'a, TimeSeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.series.iter()
    }
}

impl FromIterator<Observation> for ObservationSet {
    fn from_iter<I: IntoIterator<Item = Observation>>(iter: I) -> Self {
        Self::from_observations(iter)
    }
}
