//! Inclusive calendar date ranges and date-based record selection.

use chrono::NaiveDate;
use nutrition_sheet_client::RawRecord;
use nutrition_sheet_client::dates::parse_record_date;
use serde::Serialize;

use crate::error::{ReportError, ReportResult};

/// Closed interval `[start, end]` of calendar dates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Build a range from user-supplied bounds. Both are required.
    ///
    /// A start after the end is accepted and simply matches nothing.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> ReportResult<Self> {
        let start = parse_bound("start", start)?;
        let end = parse_bound("end", end)?;
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

fn parse_bound(name: &str, value: Option<&str>) -> ReportResult<NaiveDate> {
    let value = value.map(str::trim).unwrap_or_default();
    if value.is_empty() {
        return Err(ReportError::InvalidRange(format!(
            "please select both start and end dates ({name} date is missing)"
        )));
    }
    parse_record_date(value).ok_or_else(|| {
        ReportError::InvalidRange(format!("unrecognised {name} date '{value}'"))
    })
}

/// Records whose parsed date falls inside `range`, in input order.
///
/// Records with unparseable dates never match.
pub fn filter_by_range(records: &[RawRecord], range: &DateRange) -> Vec<RawRecord> {
    records
        .iter()
        .filter(|r| r.date().is_some_and(|d| range.contains(d)))
        .cloned()
        .collect()
}

/// Dated records paired with their date, oldest first.
///
/// Undated records are dropped. The sort is stable, so same-day rows keep
/// their sheet order.
pub fn dated_ascending(records: &[RawRecord]) -> Vec<(NaiveDate, &RawRecord)> {
    let mut dated: Vec<(NaiveDate, &RawRecord)> = records
        .iter()
        .filter_map(|r| r.date().map(|d| (d, r)))
        .collect();
    dated.sort_by_key(|(d, _)| *d);
    dated
}
