//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },
}

/// Validates an optional date range before any query executes.
///
/// # Errors
///
/// Returns `InvalidDateRange` when both bounds are present and inverted.
pub fn validate_range(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<(), ReportError> {
    if let (Some(start), Some(end)) = (from, to)
        && start > end
    {
        return Err(ReportError::InvalidDateRange { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        let jan = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let feb = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();

        assert!(validate_range(Some(jan), Some(feb)).is_ok());
        assert!(validate_range(Some(jan), Some(jan)).is_ok());
        assert!(validate_range(None, Some(jan)).is_ok());
        assert!(validate_range(Some(feb), None).is_ok());
        assert!(matches!(
            validate_range(Some(feb), Some(jan)),
            Err(ReportError::InvalidDateRange { .. })
        ));
    }
}
