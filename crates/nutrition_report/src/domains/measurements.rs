//! Chart series for the body-measurements tab.

use nutrition_sheet_client::{RawRecord, columns};
use serde::Serialize;

use crate::metric::parse_whole_number;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeasurementLine {
    pub field: &'static str,
    pub points: Vec<Option<f64>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MeasurementSeries {
    pub labels: Vec<String>,
    pub series: Vec<MeasurementLine>,
}

/// One point per row, labelled with the row's first column. Only the
/// measured fields the tab actually has get a line. Blank and non-numeric
/// cells are gaps; a recorded zero is kept.
pub fn measurement_series(records: &[RawRecord]) -> MeasurementSeries {
    let labels = records.iter().map(|r| r.first_text().to_string()).collect();
    let series = columns::MEASUREMENTS
        .iter()
        .filter(|&&field| records.iter().any(|r| r.get(field).is_some()))
        .map(|&field| MeasurementLine {
            field,
            points: records.iter().map(|r| point(r, field)).collect(),
        })
        .collect();
    MeasurementSeries { labels, series }
}

fn point(record: &RawRecord, field: &str) -> Option<f64> {
    record
        .get(field)
        .filter(|text| !text.trim().is_empty())
        .and_then(parse_whole_number)
        .filter(|v| v.is_finite())
}
