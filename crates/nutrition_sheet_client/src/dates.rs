//! Date parsing for the sheet's `Date` column.
//!
//! Sheet exports are not consistent about date formats: form submissions come
//! back as `M/D/YYYY`, hand-entered rows are often ISO, and the values API may
//! return full timestamps. Each strategy below is tried in order and the first
//! one that yields a valid calendar date wins.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

type DateStrategy = fn(&str) -> Option<NaiveDate>;

const STRATEGIES: &[DateStrategy] = &[
    iso_date,
    rfc3339_date,
    naive_datetime,
    long_form_date,
    slash_month_day_year,
];

/// Parse a `Date` cell.
///
/// Returns `None` for blank or unrecognised text; that is not an error.
pub fn parse_record_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    STRATEGIES.iter().find_map(|strategy| strategy(s))
}

fn iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn rfc3339_date(s: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

fn naive_datetime(s: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

fn long_form_date(s: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 4] = ["%B %d, %Y", "%b %d, %Y", "%B %d %Y", "%a %b %d %Y"];
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Explicit `month/day/year` split. Anything after the first whitespace is
/// ignored so form timestamps like `1/15/2024 8:02:11` still resolve.
fn slash_month_day_year(s: &str) -> Option<NaiveDate> {
    let date_part = s.split_whitespace().next()?;
    let mut parts = date_part.split('/');
    let month: u32 = parts.next()?.trim().parse().ok()?;
    let day: u32 = parts.next()?.trim().parse().ok()?;
    let year_text = parts.next()?.trim();
    if parts.next().is_some() {
        return None;
    }
    let mut year: i32 = year_text.parse().ok()?;
    if year_text.len() <= 2 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}
