// ⚠️ Calendar Errors
// Every fallible engine call returns CalendarError.
//
// Three kinds:
// 1. DataProviderUnavailable: feast/saint storage failed or is not initialized
// 2. InvalidDateInput: malformed or unsupported date (pre-Gregorian, bad key)
// 3. SeasonResolutionGap: boundary arithmetic left a date unclassified
//
// InvalidRecord covers reference rows the provider hands back malformed.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalendarError {
    /// Lookup against the feast/saint store failed
    #[error("feast/saint data provider unavailable: {0}")]
    DataProviderUnavailable(String),

    /// Date or key outside what the engine can classify
    #[error("invalid date input: {0}")]
    InvalidDateInput(String),

    /// Stored feast/saint row that cannot be decoded
    #[error("malformed reference record: {0}")]
    InvalidRecord(String),

    /// No season range contained the date. Resolution falls back to
    /// Ordinary Time I, so this is only ever reported, never returned.
    #[error("no liturgical season contains {date}")]
    SeasonResolutionGap { date: NaiveDate },
}

impl CalendarError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        CalendarError::DataProviderUnavailable(msg.into())
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        CalendarError::InvalidDateInput(msg.into())
    }

    pub fn record(msg: impl Into<String>) -> Self {
        CalendarError::InvalidRecord(msg.into())
    }
}

impl From<rusqlite::Error> for CalendarError {
    fn from(err: rusqlite::Error) -> Self {
        CalendarError::DataProviderUnavailable(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_error_maps_to_unavailable() {
        let err: CalendarError = rusqlite::Error::InvalidQuery.into();
        assert!(matches!(err, CalendarError::DataProviderUnavailable(_)));
    }

    #[test]
    fn test_gap_message_names_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let err = CalendarError::SeasonResolutionGap { date };
        assert_eq!(err.to_string(), "no liturgical season contains 2025-03-01");
    }
}
