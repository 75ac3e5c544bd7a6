use crate::dataset::Dataset;
use crate::error::{InvalidRecordError, RecordFault, ReportError, Result};
use crate::types::{RawRow, Record, Season};
use crate::util::{parse_code_in, parse_date_safe, parse_i64_safe};
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use std::collections::HashSet;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

const REQUIRED_COLUMNS: [&str; 5] = ["dteday", "season", "yr", "mnth", "cnt"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub min_date: NaiveDate,
    pub max_date: NaiveDate,
}

pub fn load_and_validate(path: &Path) -> Result<(Dataset, LoadReport)> {
    info!("Loading dataset from {}", path.display());
    let file = std::fs::File::open(path)?;
    load_from_reader(file)
}

/// Read every row, validate it, and build the dataset. The first malformed
/// row aborts the load; nothing is dropped silently.
pub fn load_from_reader<R: Read>(reader: R) -> Result<(Dataset, LoadReport)> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    for col in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == col) {
            return Err(ReportError::MissingColumn(col));
        }
    }

    let mut seen: HashSet<NaiveDate> = HashSet::new();
    let mut records: Vec<Record> = Vec::new();

    for (idx, result) in rdr.records().enumerate() {
        let raw = result.map_err(|e| row_error(e, idx + 2))?;
        let line = raw.position().map(|p| p.line() as usize).unwrap_or(idx + 2);
        let row: RawRow = raw
            .deserialize(Some(&headers))
            .map_err(|e| row_error(e, line))?;
        let record = validate_row(&row).map_err(|fault| InvalidRecordError { line, fault })?;
        if !seen.insert(record.date) {
            return Err(InvalidRecordError {
                line,
                fault: RecordFault::DuplicateDate(record.date),
            }
            .into());
        }
        records.push(record);
    }

    let total_rows = records.len();
    let dataset = Dataset::new(records)?;
    let (min_date, max_date) = dataset.bounds();
    debug!("Loaded {} rows spanning {}..={}", total_rows, min_date, max_date);

    Ok((
        dataset,
        LoadReport {
            total_rows,
            min_date,
            max_date,
        },
    ))
}

/// Per-row csv failures are record faults; anything else (I/O) stays a
/// csv error.
fn row_error(err: csv::Error, fallback_line: usize) -> ReportError {
    let line = err
        .position()
        .map(|p| p.line() as usize)
        .unwrap_or(fallback_line);
    let fault = match err.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => RecordFault::Malformed(format!("expected {} fields, found {}", expected_len, len)),
        csv::ErrorKind::Utf8 { .. } => RecordFault::Malformed("invalid UTF-8".to_string()),
        csv::ErrorKind::Deserialize { err: de, .. } => RecordFault::Malformed(de.to_string()),
        _ => return ReportError::Csv(err),
    };
    InvalidRecordError { line, fault }.into()
}

fn validate_row(row: &RawRow) -> std::result::Result<Record, RecordFault> {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    let date = parse_date_safe(row.dteday.as_deref())
        .ok_or_else(|| RecordFault::InvalidDate(text(&row.dteday)))?;
    let season = parse_code_in(row.season.as_deref(), 1..=4)
        .and_then(Season::from_code)
        .ok_or_else(|| RecordFault::InvalidSeason(text(&row.season)))?;
    let year = parse_code_in(row.yr.as_deref(), 0..=u8::MAX as i64)
        .ok_or_else(|| RecordFault::InvalidYear(text(&row.yr)))?;
    let month = parse_code_in(row.mnth.as_deref(), 1..=12)
        .ok_or_else(|| RecordFault::InvalidMonth(text(&row.mnth)))?;
    let count = match parse_i64_safe(row.cnt.as_deref()) {
        Some(c) if c < 0 => return Err(RecordFault::NegativeCount(c)),
        Some(c) => u32::try_from(c).map_err(|_| RecordFault::InvalidCount(text(&row.cnt)))?,
        None => return Err(RecordFault::InvalidCount(text(&row.cnt))),
    };

    Ok(Record {
        date,
        season,
        year,
        month,
        count,
    })
}
