//! Storage-duration labels
//!
//! Stability samples are tagged with how long they were stored before
//! testing, written as `<number><unit>` with an optional `-<suffix>`:
//!
//! ```text
//! 01D      1 day
//! 02W      2 weeks
//! 06M-B    6 months (suffix ignored)
//! ```
//!
//! [`months_from_label`] turns such a label into a continuous month value so
//! that points from different units share one time axis.

/// Days per month used for day-based labels.
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Weeks per month used for week-based labels.
pub const WEEKS_PER_MONTH: f64 = 4.345;

/// Unit of a storage-duration label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Day,
    Week,
    Month,
}

impl DurationUnit {
    /// Parses a single unit letter, case-insensitively.
    #[must_use]
    pub fn from_letter(unit: &str) -> Option<Self> {
        match unit {
            "D" | "d" => Some(Self::Day),
            "W" | "w" => Some(Self::Week),
            "M" | "m" => Some(Self::Month),
            _ => None,
        }
    }

    /// Converts a magnitude in this unit to months.
    #[must_use]
    pub fn to_months(self, magnitude: f64) -> f64 {
        match self {
            Self::Day => magnitude / DAYS_PER_MONTH,
            Self::Week => magnitude / WEEKS_PER_MONTH,
            Self::Month => magnitude,
        }
    }
}

/// Converts a storage-duration label into months.
///
/// Everything after the first `-` is ignored. The remainder must be one or
/// more ASCII digits followed by a single unit letter (`D`, `W` or `M`, any
/// case). Any other shape yields `None`; this function never panics.
///
/// # Examples
///
/// ```
/// use shelfcast_analysis::sample_time::months_from_label;
///
/// assert_eq!(months_from_label("03M"), Some(3.0));
/// assert_eq!(months_from_label("15d"), Some(0.5));
/// assert_eq!(months_from_label("06M-retest"), Some(6.0));
/// assert_eq!(months_from_label("M6"), None);
/// assert_eq!(months_from_label("02Y"), None);
/// ```
#[must_use]
pub fn months_from_label(label: &str) -> Option<f64> {
    let head = label.split('-').next()?.trim();
    let unit_start = head
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(head.len());
    let (digits, unit) = head.split_at(unit_start);
    if digits.is_empty() {
        return None;
    }
    let unit = DurationUnit::from_letter(unit)?;
    let magnitude = digits.parse::<f64>().ok()?;
    Some(unit.to_months(magnitude))
}
