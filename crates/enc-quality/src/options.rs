//! Engine parameters.

use enc_model::{QualityError, Result};

/// Percentile used by the outlier check when none is configured.
pub const DEFAULT_PERCENTILE: f64 = 0.99;

/// Parameters of a quality run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityOptions {
    /// Percentile of `total_encounters` above which a row is an outlier.
    pub percentile: f64,
}

impl Default for QualityOptions {
    fn default() -> Self {
        Self {
            percentile: DEFAULT_PERCENTILE,
        }
    }
}

impl QualityOptions {
    #[must_use]
    pub fn with_percentile(mut self, percentile: f64) -> Self {
        self.percentile = percentile;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_percentile(self.percentile)
    }
}

/// Reject percentiles outside the open interval `(0, 1)`, including NaN.
pub fn validate_percentile(percentile: f64) -> Result<()> {
    if percentile > 0.0 && percentile < 1.0 {
        return Ok(());
    }
    Err(QualityError::InvalidArgument {
        name: "percentile",
        value: percentile.to_string(),
        reason: "must be strictly between 0 and 1",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_p99() {
        assert_eq!(QualityOptions::default().percentile, 0.99);
        assert!(QualityOptions::default().validate().is_ok());
    }

    #[test]
    fn bounds_are_exclusive() {
        assert!(validate_percentile(0.0).is_err());
        assert!(validate_percentile(1.0).is_err());
        assert!(validate_percentile(-0.5).is_err());
        assert!(validate_percentile(f64::NAN).is_err());
        assert!(validate_percentile(f64::MIN_POSITIVE).is_ok());
        assert!(validate_percentile(0.5).is_ok());
    }
}
