// The loaded dataset and date-range filtering.
//
// A `Dataset` is built once at startup and never mutated afterwards. The
// controller owns it and lends it to each render pass.

use crate::error::{ReportError, Result};
use crate::types::Record;
use chrono::NaiveDate;

/// Inclusive `[start, end]` calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(ReportError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
    min: NaiveDate,
    max: NaiveDate,
}

impl Dataset {
    /// Sort `records` by date and capture the bounds. Fails on an empty batch
    /// since there is nothing to bound the date picker with.
    pub fn new(mut records: Vec<Record>) -> Result<Self> {
        records.sort_by_key(|r| r.date);
        let (min, max) = match (records.first(), records.last()) {
            (Some(first), Some(last)) => (first.date, last.date),
            _ => return Err(ReportError::EmptyDataset),
        };
        Ok(Self { records, min, max })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        (self.min, self.max)
    }

    pub fn full_range(&self) -> DateRange {
        DateRange {
            start: self.min,
            end: self.max,
        }
    }

    /// Build a range from optional ends, defaulting each to the dataset bound
    /// and rejecting anything outside the bounds.
    pub fn range(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<DateRange> {
        let range = DateRange::new(start.unwrap_or(self.min), end.unwrap_or(self.max))?;
        self.check_range(&range)?;
        Ok(range)
    }

    pub fn check_range(&self, range: &DateRange) -> Result<()> {
        if range.start < self.min || range.end > self.max {
            return Err(ReportError::OutOfBounds {
                start: range.start,
                end: range.end,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Records whose date falls within `range`, both ends included.
    ///
    /// Records are sorted, so this is a contiguous slice.
    pub fn filter(&self, range: &DateRange) -> &[Record] {
        let lo = self.records.partition_point(|r| r.date < range.start);
        let hi = self.records.partition_point(|r| r.date <= range.end);
        &self.records[lo..hi.max(lo)]
    }
}
