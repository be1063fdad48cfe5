use std::collections::BTreeMap;

use serde::Serialize;

use crate::{
    observation::ObservationSet, quality_index::QualityIndex,
    regression_report::FullHistoryRegression, summary::QaSummary, threshold::Threshold,
};

/// Which optional analyses to include in a [`ProductReport`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub quality_index: bool,
    pub regression: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            quality_index: true,
            regression: true,
        }
    }
}

/// Complete shelf-life analysis of one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductReport {
    pub summary: QaSummary,
    /// `None` when disabled or when there are too few time points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality_index: Option<QualityIndex>,
    /// Empty when disabled
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub regression: BTreeMap<String, FullHistoryRegression>,
}

impl ProductReport {
    /// Runs the summary and the enabled optional analyses.
    ///
    /// # Examples
    ///
    /// ```
    /// use shelfcast_analysis::{
    ///     observation::ObservationSet,
    ///     report::{ProductReport, ReportOptions},
    ///     summary::StatusTier,
    ///     threshold::Threshold,
    /// };
    ///
    /// let report = ProductReport::build(
    ///     &ObservationSet::default(),
    ///     Threshold::default(),
    ///     ReportOptions::default(),
    /// );
    /// assert_eq!(report.summary.status, StatusTier::Unknown);
    /// assert!(report.quality_index.is_none());
    /// ```
    #[must_use]
    pub fn build(
        observations: &ObservationSet,
        threshold: Threshold,
        options: ReportOptions,
    ) -> Self {
        let summary = QaSummary::from_observations(observations, threshold);
        let quality_index = options
            .quality_index
            .then(|| QualityIndex::build(observations, threshold))
            .flatten();
        let regression = if options.regression {
            FullHistoryRegression::for_each_attribute(observations, threshold)
        } else {
            BTreeMap::new()
        };
        Self {
            summary,
            quality_index,
            regression,
        }
    }
}
