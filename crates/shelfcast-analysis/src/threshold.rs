use serde::Serialize;

/// Failure threshold for an attribute value.
///
/// Values at or above the threshold count as failed quality. The threshold
/// is finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Threshold(f64);

#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display, derive_more::Error)]
#[display("threshold must be a finite positive number, got {value}")]
pub struct ThresholdError {
    pub value: f64,
}

/// Where a value sits relative to the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(tag = "status", content = "distance", rename_all = "snake_case")]
pub enum ThresholdDistance {
    /// Still below the threshold by the given positive margin.
    Below(f64),
    /// At or above the threshold.
    Exceeded,
}

impl Threshold {
    /// Threshold applied when none is configured.
    pub const DEFAULT: Self = Self(6.5);

    pub fn new(value: f64) -> Result<Self, ThresholdError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ThresholdError { value })
        }
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn is_exceeded_by(self, value: f64) -> bool {
        value >= self.0
    }

    #[must_use]
    pub fn distance(self, value: f64) -> ThresholdDistance {
        if self.is_exceeded_by(value) {
            ThresholdDistance::Exceeded
        } else {
            ThresholdDistance::Below(self.0 - value)
        }
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation() {
        assert_eq!(Threshold::new(6.5).map(Threshold::value), Ok(6.5));
        assert!(Threshold::new(0.0).is_err());
        assert!(Threshold::new(-1.0).is_err());
        assert!(Threshold::new(f64::NAN).is_err());
        assert!(Threshold::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_distance() {
        let threshold = Threshold::new(6.5).unwrap();
        assert_eq!(threshold.distance(6.0), ThresholdDistance::Below(0.5));
        assert_eq!(threshold.distance(6.5), ThresholdDistance::Exceeded);
        assert!(threshold.distance(7.0).is_exceeded());
    }

    #[test]
    fn test_error_message() {
        let err = Threshold::new(-2.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "threshold must be a finite positive number, got -2"
        );
    }
}
