use serde::{Deserialize, Serialize};
use shelfcast_analysis::measurement::Measurement;

/// Stability-test results of one product, as exported from the lab sheet.
///
/// ```json
/// {
///   "product": "Fish sauce 500ml",
///   "measurements": [
///     { "attribute": "Odor", "sample": "01M", "value": 5.0 },
///     { "attribute": "Odor", "sample": "01M-B", "value": 5.2 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementFile {
    /// Product name, echoed in the report
    #[serde(default)]
    pub product: Option<String>,
    /// Raw results, one per replicate
    pub measurements: Vec<Measurement>,
}
