//! Recent rate of change per attribute
//!
//! The rate is the secant slope across the last [`RATE_WINDOW`] points:
//!
//! ```text
//! rate = (value_last - value_first) / (time_last - time_first)
//! ```
//!
//! and is classified against a fixed significance band of
//! ±[`SIGNIFICANT_CHANGE`] units per month. A rising value is treated as
//! moving towards the threshold, so a positive rate is "worsening".

use serde::Serialize;

use crate::observation::TimeSeries;

/// Number of most recent points spanned by the rate.
pub const RATE_WINDOW: usize = 3;

/// Rates within `±SIGNIFICANT_CHANGE` per month count as stable.
pub const SIGNIFICANT_CHANGE: f64 = 0.1;

/// Direction of a change rate relative to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum RateTrend {
    #[display("worsening")]
    Worsening,
    #[display("improving")]
    Improving,
    #[display("stable")]
    Stable,
}

impl RateTrend {
    #[must_use]
    pub fn classify(rate: f64) -> Self {
        if rate > SIGNIFICANT_CHANGE {
            Self::Worsening
        } else if rate < -SIGNIFICANT_CHANGE {
            Self::Improving
        } else {
            Self::Stable
        }
    }
}

/// Recent change rate of one attribute, in value units per month.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChangeRate {
    pub rate: f64,
    pub trend: RateTrend,
}

impl ChangeRate {
    #[must_use]
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            trend: RateTrend::classify(rate),
        }
    }

    /// Computes the recent change rate of `series`.
    ///
    /// Returns `None` with fewer than [`RATE_WINDOW`] points or when the
    /// window spans no time.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfcast_analysis::{change_rate::{ChangeRate, RateTrend}, observation::TimeSeries};
    ///
    /// let series = TimeSeries::from_pairs("Odor", [(0.0, 4.0), (1.0, 5.0), (2.0, 5.2), (4.0, 6.0)]);
    /// let rate = ChangeRate::from_series(&series).unwrap();
    /// assert_eq!(rate.rate, 1.0 / 3.0);
    /// assert_eq!(rate.trend, RateTrend::Worsening);
    /// ```
    #[must_use]
    pub fn from_series(series: &TimeSeries) -> Option<Self> {
        if series.len() < RATE_WINDOW {
            return None;
        }
        let window = series.recent_window(RATE_WINDOW);
        let (first, last) = (window.first()?, window.last()?);
        let elapsed = last.time_months - first.time_months;
        if elapsed <= 0.0 {
            return None;
        }
        let rate = (last.value - first.value) / elapsed;
        rate.is_finite().then(|| Self::new(rate))
    }
}

/// Rated attributes grouped by trend direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeRateBreakdown {
    /// Attributes rising faster than the significance band, with their rates
    pub worsening: Vec<(String, f64)>,
    /// Attributes falling faster than the significance band, with their rates
    pub improving: Vec<(String, f64)>,
    /// Attributes within the significance band
    pub stable: Vec<String>,
    /// The worsening attribute with the largest rate, to prioritize first
    pub priority: Option<String>,
}

impl ChangeRateBreakdown {
    /// Groups `(attribute, rate)` pairs, keeping their order within each group.
    #[must_use]
    pub fn from_rates<'a, I>(rates: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a ChangeRate)>,
    {
        let mut breakdown = Self::default();
        let mut priority: Option<(&str, f64)> = None;
        for (attribute, rate) in rates {
            match rate.trend {
                RateTrend::Worsening => {
                    breakdown.worsening.push((attribute.to_owned(), rate.rate));
                    if priority.is_none_or(|(_, best)| rate.rate > best) {
                        priority = Some((attribute, rate.rate));
                    }
                }
                RateTrend::Improving => breakdown.improving.push((attribute.to_owned(), rate.rate)),
                RateTrend::Stable => breakdown.stable.push(attribute.to_owned()),
            }
        }
        breakdown.priority = priority.map(|(attribute, _)| attribute.to_owned());
        breakdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secant_over_last_three_points() {
        let series = TimeSeries::from_pairs("Odor", [(0.0, 9.0), (1.0, 5.0), (2.0, 9.0), (3.0, 5.6)]);
        let rate = ChangeRate::from_series(&series).unwrap();
        // middle point of the window does not matter
        assert!((rate.rate - 0.3).abs() < 1e-12);
        assert_eq!(rate.trend, RateTrend::Worsening);
    }

    #[test]
    fn test_requires_three_points() {
        let single = TimeSeries::from_pairs("Odor", [(1.0, 5.0)]);
        let pair = TimeSeries::from_pairs("Odor", [(1.0, 5.0), (2.0, 6.0)]);
        assert_eq!(ChangeRate::from_series(&single), None);
        assert_eq!(ChangeRate::from_series(&pair), None);
    }

    #[test]
    fn test_no_elapsed_time() {
        let series = TimeSeries::from_pairs("Odor", [(1.0, 5.0), (1.0, 5.5), (1.0, 6.0)]);
        assert_eq!(ChangeRate::from_series(&series), None);
    }

    #[test]
    fn test_classification_band() {
        assert_eq!(RateTrend::classify(0.3), RateTrend::Worsening);
        assert_eq!(RateTrend::classify(-0.5), RateTrend::Improving);
        assert_eq!(RateTrend::classify(0.1), RateTrend::Stable);
        assert_eq!(RateTrend::classify(-0.1), RateTrend::Stable);
        assert_eq!(RateTrend::classify(0.0), RateTrend::Stable);
    }

    #[test]
    fn test_breakdown() {
        let rates = [
            ("Odor", ChangeRate::new(0.2)),
            ("Color", ChangeRate::new(-0.4)),
            ("Taste", ChangeRate::new(0.05)),
            ("Texture", ChangeRate::new(0.6)),
            ("Aroma", ChangeRate::new(0.6)),
        ];
        let breakdown = ChangeRateBreakdown::from_rates(rates.iter().map(|(a, r)| (*a, r)));
        assert_eq!(
            breakdown.worsening,
            [
                ("Odor".to_owned(), 0.2),
                ("Texture".to_owned(), 0.6),
                ("Aroma".to_owned(), 0.6)
            ]
        );
        assert_eq!(breakdown.improving, [("Color".to_owned(), -0.4)]);
        assert_eq!(breakdown.stable, ["Taste"]);
        assert_eq!(breakdown.priority.as_deref(), Some("Texture"));
    }

    #[test]
    fn test_breakdown_without_worsening() {
        let rates = [("Color", ChangeRate::new(-0.4))];
        let breakdown = ChangeRateBreakdown::from_rates(rates.iter().map(|(a, r)| (*a, r)));
        assert_eq!(breakdown.priority, None);
    }
}
