use chrono::NaiveDate;
use thiserror::Error;

/// What exactly was wrong with a rejected input row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordFault {
    #[error("unparsable dteday '{0}'")]
    InvalidDate(String),

    #[error("season must be 1-4, got '{0}'")]
    InvalidSeason(String),

    #[error("yr must be a non-negative integer, got '{0}'")]
    InvalidYear(String),

    #[error("mnth must be 1-12, got '{0}'")]
    InvalidMonth(String),

    #[error("cnt must be an integer, got '{0}'")]
    InvalidCount(String),

    #[error("cnt must not be negative, got {0}")]
    NegativeCount(i64),

    #[error("duplicate dteday {0}")]
    DuplicateDate(NaiveDate),

    #[error("malformed row: {0}")]
    Malformed(String),
}

/// A malformed row. Loading stops at the first one and the whole batch is
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid record on line {line}: {fault}")]
pub struct InvalidRecordError {
    /// 1-based line number in the input file (the header is line 1).
    pub line: usize,
    pub fault: RecordFault,
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidRecord(#[from] InvalidRecordError),

    #[error("input is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("dataset contains no rows")]
    EmptyDataset,

    #[error("start date {start} is after end date {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("range {start}..={end} is outside the dataset bounds {min}..={max}")]
    OutOfBounds {
        start: NaiveDate,
        end: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_messages() {
        let fault = RecordFault::Malformed("expected 6 fields, found 4".to_string());
        let as_error: &dyn std::error::Error = &fault;
        assert_eq!(as_error.to_string(), "malformed row: expected 6 fields, found 4");
        assert_eq!(
            RecordFault::NegativeCount(-4).to_string(),
            "cnt must not be negative, got -4"
        );
    }

    #[test]
    fn test_invalid_record_message_carries_line_and_fault() {
        let err: ReportError = InvalidRecordError {
            line: 7,
            fault: RecordFault::InvalidMonth("13".to_string()),
        }
        .into();
        assert_eq!(err.to_string(), "invalid record on line 7: mnth must be 1-12, got '13'");
    }
}
