use chrono::{DateTime, Utc};
use serde::Serialize;
use shelfcast_analysis::report::ProductReport;

/// JSON document written by `analyze --format json`.
#[derive(Debug, Serialize)]
pub struct ReportDocument<'a> {
    pub product: Option<&'a str>,
    pub generated_at: DateTime<Utc>,
    /// Labels of measurements skipped because their sample time was unreadable
    pub skipped_samples: Vec<&'a str>,
    pub report: &'a ProductReport,
}
