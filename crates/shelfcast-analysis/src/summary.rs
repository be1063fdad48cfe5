//! Product-level quality summary
//!
//! Combines the per-attribute [`Projection`]s and [`ChangeRate`]s of one
//! product into a single risk assessment:
//!
//! - **Shelf life**: the earliest numeric crossing month over all attributes
//! - **Critical attribute**: the attribute closest to, but still below, the threshold
//! - **Fastest-changing attribute**: the attribute with the largest (signed) rate
//! - **Status tier**: how many months remain between "now" and the shelf life
//!
//! # Selection rules
//!
//! Attributes already at or above the threshold never become the critical
//! attribute; only the distance below the threshold is ranked. The fastest
//! changing attribute maximizes the signed rate, so a fast improving
//! attribute is never picked over a slowly worsening one. Ties go to the
//! attribute encountered first.
//!
//! # Example
//!
//! ```
//! use shelfcast_analysis::{
//!     observation::{Observation, ObservationSet},
//!     summary::{QaSummary, ShelfLife, StatusTier},
//!     threshold::Threshold,
//! };
//!
//! let observations = [(1.0, 5.0), (2.0, 5.5), (3.0, 6.0)].map(|(time_months, value)| {
//!     Observation { attribute: "Odor".to_owned(), time_months, value }
//! });
//! let set = ObservationSet::from_observations(observations);
//! let summary = QaSummary::from_observations(&set, Threshold::new(6.5).unwrap());
//!
//! assert_eq!(summary.min_shelf_life, ShelfLife::Months(4.0));
//! assert_eq!(summary.status, StatusTier::Critical);
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    change_rate::{ChangeRate, ChangeRateBreakdown},
    observation::{ObservationSet, TimeSeries},
    projection::{self, Projection},
    threshold::{Threshold, ThresholdDistance},
};

/// Remaining months at or below which the product is critical.
pub const CRITICAL_REMAINING_MONTHS: f64 = 1.0;

/// Remaining months at or below which the product needs watching.
pub const WATCH_REMAINING_MONTHS: f64 = 3.0;

/// Remaining months below which a shorter shelf life should be adopted.
pub const REDUCE_REMAINING_MONTHS: f64 = 2.0;

/// Remaining months below which the projected shelf life should be considered.
pub const CONSIDER_REMAINING_MONTHS: f64 = 4.0;

/// Everything the summary needs to know about one attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeAnalysis {
    pub attribute: String,
    /// Storage time of the most recent observation
    pub latest_month: f64,
    /// Most recent observed value
    pub latest_value: f64,
    /// Distance of the latest value below the threshold
    pub distance: ThresholdDistance,
    pub projection: Projection,
    /// Absent with fewer than three observations
    pub change_rate: Option<ChangeRate>,
}

impl AttributeAnalysis {
    /// Analyzes one attribute series. `None` for an empty series.
    #[must_use]
    pub fn from_series(series: &TimeSeries, threshold: Threshold) -> Option<Self> {
        let latest = series.latest()?;
        Some(Self {
            attribute: series.attribute().to_owned(),
            latest_month: latest.time_months,
            latest_value: latest.value,
            distance: threshold.distance(latest.value),
            projection: projection::project_crossing(series, threshold),
            change_rate: ChangeRate::from_series(series),
        })
    }
}

/// Earliest projected crossing month over all attributes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "status", content = "months", rename_all = "snake_case")]
pub enum ShelfLife {
    Months(f64),
    /// No attribute produced a numeric crossing month.
    Unknown,
}

impl ShelfLife {
    #[must_use]
    pub fn months(self) -> Option<f64> {
        match self {
            Self::Months(months) => Some(months),
            Self::Unknown => None,
        }
    }
}

/// Overall product status derived from the remaining shelf life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum StatusTier {
    #[display("stable")]
    Stable,
    #[display("watch")]
    Watch,
    #[display("critical")]
    Critical,
    #[display("unknown")]
    Unknown,
}

impl StatusTier {
    /// Classifies the months left until the shelf life is reached.
    #[must_use]
    pub fn from_remaining_months(remaining_months: Option<f64>) -> Self {
        match remaining_months {
            None => Self::Unknown,
            Some(m) if m <= CRITICAL_REMAINING_MONTHS => Self::Critical,
            Some(m) if m <= WATCH_REMAINING_MONTHS => Self::Watch,
            Some(_) => Self::Stable,
        }
    }

    /// Operator-facing explanation of the tier.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Stable => "Stable: product quality is within the allowed limit",
            Self::Watch => "Watch: monitor closely",
            Self::Critical => "Warning: product is close to the quality limit",
            Self::Unknown => "Not enough data to assess the product",
        }
    }

    /// Suggested follow-up for the tier.
    #[must_use]
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Stable => "Keep the current monitoring frequency.",
            Self::Watch => {
                "Increase the monitoring frequency and review the production process."
            }
            Self::Critical => {
                "Run an urgent quality review and consider shortening the shelf life."
            }
            Self::Unknown => "Collect more data points to project the shelf life.",
        }
    }
}

/// Shelf-life recommendation derived from the remaining months.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ShelfLifeAdvice {
    /// Shorten the declared shelf life to `months`.
    Reduce { months: f64 },
    /// Consider declaring a shelf life of `months`.
    Consider { months: f64 },
    /// The declared shelf life needs no change.
    Maintain,
    /// No numeric shelf life to base advice on.
    Insufficient,
}

impl ShelfLifeAdvice {
    /// Advice for a projected shelf life with `remaining_months` left.
    ///
    /// `months` is the shelf life truncated to whole months.
    #[must_use]
    pub fn new(shelf_life: ShelfLife, remaining_months: Option<f64>) -> Self {
        let (Some(shelf_life), Some(remaining)) = (shelf_life.months(), remaining_months) else {
            return Self::Insufficient;
        };
        let months = shelf_life.trunc();
        if remaining < REDUCE_REMAINING_MONTHS {
            Self::Reduce { months }
        } else if remaining < CONSIDER_REMAINING_MONTHS {
            Self::Consider { months }
        } else {
            Self::Maintain
        }
    }
}

/// The attribute closest to, but still below, the threshold.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriticalAttribute {
    pub attribute: String,
    pub latest_value: f64,
    /// `threshold - latest_value`, always positive
    pub distance: f64,
}

/// The attribute with the largest signed change rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FastestChange {
    pub attribute: String,
    pub rate: ChangeRate,
}

/// Risk summary for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaSummary {
    pub threshold: Threshold,
    /// Latest storage time observed for any attribute
    pub current_month: Option<f64>,
    pub min_shelf_life: ShelfLife,
    /// `min_shelf_life - current_month`
    pub remaining_months: Option<f64>,
    pub status: StatusTier,
    pub advice: ShelfLifeAdvice,
    pub critical_attribute: Option<CriticalAttribute>,
    pub fastest_changing_attribute: Option<FastestChange>,
    pub rate_breakdown: ChangeRateBreakdown,
    pub projections: BTreeMap<String, Projection>,
    pub change_rates: BTreeMap<String, ChangeRate>,
    /// Per-attribute details in first-appearance order
    pub attributes: Vec<AttributeAnalysis>,
}

impl QaSummary {
    /// Projects every attribute of `observations` and aggregates the results.
    #[must_use]
    pub fn from_observations(observations: &ObservationSet, threshold: Threshold) -> Self {
        let attributes = observations
            .iter()
            .filter_map(|series| AttributeAnalysis::from_series(series, threshold))
            .collect();
        Self::aggregate(attributes, threshold, observations.current_month())
    }

    /// Aggregates already analyzed attributes.
    ///
    /// `current_month` is the analysis "now". The result is always
    /// producible: an empty or uninformative input yields
    /// [`StatusTier::Unknown`].
    #[must_use]
    pub fn aggregate(
        attributes: Vec<AttributeAnalysis>,
        threshold: Threshold,
        current_month: Option<f64>,
    ) -> Self {
        let min_shelf_life = attributes
            .iter()
            .filter_map(|a| a.projection.crossing_month())
            .min_by(f64::total_cmp)
            .map_or(ShelfLife::Unknown, ShelfLife::Months);
        let remaining_months = min_shelf_life
            .months()
            .zip(current_month)
            .map(|(shelf_life, now)| shelf_life - now);
        let status = StatusTier::from_remaining_months(remaining_months);

        let summary = Self {
            threshold,
            current_month,
            min_shelf_life,
            remaining_months,
            status,
            advice: ShelfLifeAdvice::new(min_shelf_life, remaining_months),
            critical_attribute: critical_attribute(&attributes),
            fastest_changing_attribute: fastest_changing_attribute(&attributes),
            rate_breakdown: ChangeRateBreakdown::from_rates(
                attributes
                    .iter()
                    .filter_map(|a| Some((a.attribute.as_str(), a.change_rate.as_ref()?))),
            ),
            projections: attributes
                .iter()
                .map(|a| (a.attribute.clone(), a.projection))
                .collect(),
            change_rates: attributes
                .iter()
                .filter_map(|a| Some((a.attribute.clone(), a.change_rate?)))
                .collect(),
            attributes,
        };
        tracing::debug!(
            attributes = summary.attributes.len(),
            shelf_life = ?summary.min_shelf_life,
            status = %summary.status,
            "quality summary aggregated"
        );
        summary
    }
}

fn critical_attribute(attributes: &[AttributeAnalysis]) -> Option<CriticalAttribute> {
    let mut closest: Option<(&AttributeAnalysis, f64)> = None;
    for attribute in attributes {
        let ThresholdDistance::Below(distance) = attribute.distance else {
            continue;
        };
        if closest.is_none_or(|(_, best)| distance < best) {
            closest = Some((attribute, distance));
        }
    }
    closest.map(|(attribute, distance)| CriticalAttribute {
        attribute: attribute.attribute.clone(),
        latest_value: attribute.latest_value,
        distance,
    })
}

fn fastest_changing_attribute(attributes: &[AttributeAnalysis]) -> Option<FastestChange> {
    let mut fastest: Option<(&str, ChangeRate)> = None;
    for attribute in attributes {
        let Some(rate) = attribute.change_rate else {
            continue;
        };
        if fastest.is_none_or(|(_, best)| rate.rate > best.rate) {
            fastest = Some((attribute.attribute.as_str(), rate));
        }
    }
    fastest.map(|(attribute, rate)| FastestChange {
        attribute: attribute.to_owned(),
        rate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{change_rate::RateTrend, observation::Observation};

    fn threshold() -> Threshold {
        Threshold::new(6.5).unwrap()
    }

    fn set(data: &[(&str, &[(f64, f64)])]) -> ObservationSet {
        data.iter()
            .flat_map(|(attribute, points)| {
                points.iter().map(move |&(time_months, value)| Observation {
                    attribute: (*attribute).to_owned(),
                    time_months,
                    value,
                })
            })
            .collect()
    }

    fn analysis(
        attribute: &str,
        latest_value: f64,
        projection: Projection,
        rate: Option<f64>,
    ) -> AttributeAnalysis {
        AttributeAnalysis {
            attribute: attribute.to_owned(),
            latest_month: 3.0,
            latest_value,
            distance: threshold().distance(latest_value),
            projection,
            change_rate: rate.map(ChangeRate::new),
        }
    }

    #[test]
    fn test_min_shelf_life_ignores_non_numeric() {
        let summary = QaSummary::aggregate(
            vec![
                analysis("Odor", 6.0, Projection::CrossingMonth(6.0), None),
                analysis("Color", 5.0, Projection::NoThresholdApproach, None),
                analysis("Taste", 5.5, Projection::CrossingMonth(4.0), None),
                analysis("Texture", 7.0, Projection::AlreadyExceeded, None),
            ],
            threshold(),
            Some(3.0),
        );
        assert_eq!(summary.min_shelf_life, ShelfLife::Months(4.0));
        assert_eq!(summary.remaining_months, Some(1.0));
        assert_eq!(summary.status, StatusTier::Critical);
    }

    #[test]
    fn test_critical_attribute_must_be_below_threshold() {
        // Taste has the earliest crossing but Odor is closest to the threshold
        let summary = QaSummary::aggregate(
            vec![
                analysis("Taste", 5.5, Projection::CrossingMonth(4.0), None),
                analysis("Odor", 6.2, Projection::CrossingMonth(6.0), None),
            ],
            threshold(),
            Some(3.0),
        );
        let critical = summary.critical_attribute.unwrap();
        assert_eq!(critical.attribute, "Odor");
        assert_eq!(critical.latest_value, 6.2);
        assert!((critical.distance - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_exceeded_attribute_never_critical() {
        let summary = QaSummary::aggregate(
            vec![
                analysis("Texture", 8.0, Projection::AlreadyExceeded, None),
                analysis("Odor", 6.5, Projection::AlreadyExceeded, None),
                analysis("Color", 4.0, Projection::NoThresholdApproach, None),
            ],
            threshold(),
            Some(3.0),
        );
        assert_eq!(
            summary.critical_attribute.map(|c| c.attribute).as_deref(),
            Some("Color")
        );

        let all_exceeded = QaSummary::aggregate(
            vec![analysis("Texture", 8.0, Projection::AlreadyExceeded, None)],
            threshold(),
            Some(3.0),
        );
        assert_eq!(all_exceeded.critical_attribute, None);
    }

    #[test]
    fn test_critical_tie_goes_to_first() {
        let summary = QaSummary::aggregate(
            vec![
                analysis("Odor", 6.0, Projection::InsufficientData, None),
                analysis("Color", 6.0, Projection::InsufficientData, None),
            ],
            threshold(),
            Some(1.0),
        );
        assert_eq!(summary.critical_attribute.unwrap().attribute, "Odor");
    }

    #[test]
    fn test_fastest_changing_uses_signed_rate() {
        let summary = QaSummary::aggregate(
            vec![
                analysis("Color", 4.0, Projection::NoThresholdApproach, Some(-0.5)),
                analysis("Odor", 6.0, Projection::CrossingMonth(5.0), Some(0.3)),
                analysis("Taste", 5.0, Projection::InsufficientData, None),
            ],
            threshold(),
            Some(3.0),
        );
        let fastest = summary.fastest_changing_attribute.unwrap();
        assert_eq!(fastest.attribute, "Odor");
        assert_eq!(fastest.rate.rate, 0.3);
        assert_eq!(fastest.rate.trend, RateTrend::Worsening);
    }

    #[test]
    fn test_fastest_changing_may_be_improving() {
        let summary = QaSummary::aggregate(
            vec![
                analysis("Color", 4.0, Projection::NoThresholdApproach, Some(-0.5)),
                analysis("Odor", 4.0, Projection::NoThresholdApproach, Some(-0.2)),
            ],
            threshold(),
            Some(3.0),
        );
        assert_eq!(summary.fastest_changing_attribute.unwrap().attribute, "Odor");
        assert_eq!(summary.rate_breakdown.priority, None);
    }

    #[test]
    fn test_status_tiers() {
        assert_eq!(StatusTier::from_remaining_months(None), StatusTier::Unknown);
        assert_eq!(StatusTier::from_remaining_months(Some(-2.0)), StatusTier::Critical);
        assert_eq!(StatusTier::from_remaining_months(Some(1.0)), StatusTier::Critical);
        assert_eq!(StatusTier::from_remaining_months(Some(1.1)), StatusTier::Watch);
        assert_eq!(StatusTier::from_remaining_months(Some(3.0)), StatusTier::Watch);
        assert_eq!(StatusTier::from_remaining_months(Some(3.1)), StatusTier::Stable);
    }

    #[test]
    fn test_advice() {
        let shelf_life = ShelfLife::Months(7.8);
        assert_eq!(
            ShelfLifeAdvice::new(shelf_life, Some(1.5)),
            ShelfLifeAdvice::Reduce { months: 7.0 }
        );
        assert_eq!(
            ShelfLifeAdvice::new(shelf_life, Some(2.0)),
            ShelfLifeAdvice::Consider { months: 7.0 }
        );
        assert_eq!(ShelfLifeAdvice::new(shelf_life, Some(4.0)), ShelfLifeAdvice::Maintain);
        assert_eq!(
            ShelfLifeAdvice::new(ShelfLife::Unknown, None),
            ShelfLifeAdvice::Insufficient
        );
    }

    #[test]
    fn test_advice_serialization() {
        let json = serde_json::to_string(&ShelfLifeAdvice::Maintain).unwrap();
        assert_eq!(json, r#"{"action":"maintain"}"#);
        let json = serde_json::to_string(&ShelfLifeAdvice::Insufficient).unwrap();
        assert_eq!(json, r#"{"action":"insufficient"}"#);
        let json = serde_json::to_string(&ShelfLifeAdvice::Reduce { months: 4.0 }).unwrap();
        assert_eq!(json, r#"{"action":"reduce","months":4.0}"#);
    }

    #[test]
    fn test_empty_input_is_unknown() {
        let summary = QaSummary::from_observations(&ObservationSet::default(), threshold());
        assert_eq!(summary.min_shelf_life, ShelfLife::Unknown);
        assert_eq!(summary.status, StatusTier::Unknown);
        assert_eq!(summary.advice, ShelfLifeAdvice::Insufficient);
        assert_eq!(summary.critical_attribute, None);
        assert_eq!(summary.fastest_changing_attribute, None);
        assert!(summary.projections.is_empty());
    }

    #[test]
    fn test_all_insufficient_is_unknown() {
        let summary = QaSummary::from_observations(
            &set(&[("Odor", &[(1.0, 5.0)]), ("Color", &[(2.0, 4.0)])]),
            threshold(),
        );
        assert_eq!(summary.status, StatusTier::Unknown);
        assert!(summary.projections.values().all(|p| p.is_insufficient_data()));
        assert!(summary.change_rates.is_empty());
        assert_eq!(summary.current_month, Some(2.0));
    }

    #[test]
    fn test_shelf_life_scenario() {
        // Odor reaches 6.5 at month 4.0, Color at month 7.0; now is month 3
        let summary = QaSummary::from_observations(
            &set(&[
                ("Odor", &[(1.0, 5.0), (2.0, 5.5), (3.0, 6.0)]),
                ("Color", &[(1.0, 5.0), (2.0, 5.25), (3.0, 5.5)]),
            ]),
            threshold(),
        );
        assert_eq!(summary.projections["Odor"], Projection::CrossingMonth(4.0));
        assert_eq!(summary.projections["Color"], Projection::CrossingMonth(7.0));
        assert_eq!(summary.min_shelf_life, ShelfLife::Months(4.0));
        assert_eq!(summary.critical_attribute.unwrap().attribute, "Odor");
        assert_eq!(summary.fastest_changing_attribute.unwrap().attribute, "Odor");
        assert_eq!(summary.status, StatusTier::Critical);
        assert_eq!(summary.advice, ShelfLifeAdvice::Reduce { months: 4.0 });
        let names: Vec<_> = summary.attributes.iter().map(|a| a.attribute.as_str()).collect();
        assert_eq!(names, ["Odor", "Color"]);
    }

    #[test]
    fn test_summary_is_deterministic() {
        let data = set(&[
            ("Odor", &[(0.0, 4.0), (1.0, 4.6), (2.0, 5.1), (3.0, 5.9)]),
            ("Color", &[(0.0, 3.0), (2.0, 3.1)]),
            ("Taste", &[(0.0, 6.0), (1.0, 6.8)]),
        ]);
        let a = QaSummary::from_observations(&data, threshold());
        let b = QaSummary::from_observations(&data, threshold());
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
