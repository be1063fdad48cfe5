use serde::{Deserialize, Serialize};

/// Analysis defaults read from a JSON config file.
///
/// Every field is optional; command-line flags take precedence.
///
/// ```json
/// { "threshold": 7.0, "quality_index": true, "regression": false }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Failure threshold for all attributes
    pub threshold: Option<f64>,
    /// Include the composite quality index
    pub quality_index: Option<bool>,
    /// Include the full-history regression
    pub regression: Option<bool>,
}
