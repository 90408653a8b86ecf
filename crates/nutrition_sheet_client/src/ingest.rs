//! Row ingestion: turn a header-first table into [`RawRecord`]s.
//!
//! Parsing is lenient. Columns with an empty header are dropped. Columns
//! outside the tracking form are logged at debug level and kept, so the same
//! path reads any header-first tab. Ragged rows are accepted and no cell is
//! type-checked here.

use tracing::debug;

use crate::{RawRecord, SheetError, columns};

/// Parse CSV text whose first row is the header row.
pub fn parse_csv(text: &str) -> Result<Vec<RawRecord>, SheetError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| SheetError::DataLoad(format!("malformed csv: {e}")))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    records_from_rows(rows)
}

/// Build records from a header-first cell matrix, as returned by the
/// spreadsheet values API.
pub fn records_from_rows(rows: Vec<Vec<String>>) -> Result<Vec<RawRecord>, SheetError> {
    let mut rows = rows.into_iter();
    let header_row = rows
        .next()
        .ok_or_else(|| SheetError::DataLoad("table has no header row".into()))?;

    let headers: Vec<Option<String>> = header_row
        .iter()
        .map(|h| {
            let h = h.trim();
            (!h.is_empty()).then(|| h.to_string())
        })
        .collect();
    if headers.iter().all(Option::is_none) {
        return Err(SheetError::DataLoad("header row is empty".into()));
    }

    let unknown: Vec<&str> = headers
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|h| !columns::is_known(h))
        .collect();
    if !unknown.is_empty() {
        debug!(?unknown, "sheet has columns outside the tracking form");
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let mut record = RawRecord::new();
        for (header, cell) in headers.iter().zip(row) {
            if let Some(header) = header {
                record.insert(header.clone(), cell.trim());
            }
        }
        if record.is_blank() {
            skipped += 1;
            continue;
        }
        records.push(record);
    }

    debug!(
        records = records.len(),
        skipped_blank = skipped,
        "ingested sheet rows"
    );
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Timestamp,Date,Morning Weight,Sleep Hours,Energy Level,Total Calories,Daily Notes
1/1/2024 7:00:00,1/1/2024,180.4,7.5,7,2100,\"felt good, slept well\"
1/2/2024 7:05:00,1/2/2024,,6,5,abc,
";

    #[test]
    fn parses_rows_in_order_keyed_by_header() {
        let records = parse_csv(SAMPLE).expect("parse");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(columns::DATE), Some("1/1/2024"));
        assert_eq!(records[0].get(columns::DAILY_NOTES), Some("felt good, slept well"));
        assert_eq!(records[1].get(columns::DATE), Some("1/2/2024"));
    }

    #[test]
    fn keeps_malformed_cells_as_text() {
        let records = parse_csv(SAMPLE).expect("parse");
        assert_eq!(records[1].get(columns::TOTAL_CALORIES), Some("abc"));
        assert_eq!(records[1].get(columns::MORNING_WEIGHT), Some(""));
    }

    #[test]
    fn ignores_empty_header_columns() {
        let csv = "Date,,Energy Level\n2024-01-01,junk,8\n";
        let records = parse_csv(csv).expect("parse");
        assert_eq!(records[0].len(), 2);
        assert_eq!(records[0].get(columns::ENERGY_LEVEL), Some("8"));
    }

    #[test]
    fn keeps_unknown_columns_in_sheet_order() {
        let csv = "Date,Mood,Energy Level\n2024-01-01,calm,8\n";
        let records = parse_csv(csv).expect("parse");
        assert_eq!(records[0].get("Mood"), Some("calm"));
        let headers: Vec<&str> = records[0].iter().map(|(h, _)| h).collect();
        assert_eq!(headers, vec![columns::DATE, "Mood", columns::ENERGY_LEVEL]);
    }

    #[test]
    fn accepts_ragged_rows() {
        let csv = "Date,Energy Level,Daily Notes\n2024-01-01\n2024-01-02,6,ok,extra\n";
        let records = parse_csv(csv).expect("parse");
        assert_eq!(records.len(), 2);
        assert!(records[0].get(columns::ENERGY_LEVEL).is_none());
        assert_eq!(records[1].get(columns::DAILY_NOTES), Some("ok"));
    }

    #[test]
    fn skips_blank_rows() {
        let csv = "Date,Energy Level\n\n2024-01-01,7\n,\n\"\",\"\"\n";
        let records = parse_csv(csv).expect("parse");
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn strips_byte_order_mark() {
        let csv = "\u{feff}Date,Energy Level\n2024-01-01,7\n";
        let records = parse_csv(csv).expect("parse");
        assert_eq!(records[0].get(columns::DATE), Some("2024-01-01"));
    }

    #[test]
    fn header_only_table_yields_no_records() {
        let records = parse_csv("Date,Energy Level\n").expect("parse");
        assert!(records.is_empty());
    }

    #[test]
    fn missing_header_is_data_load_error() {
        let err = parse_csv("").unwrap_err();
        assert!(matches!(err, SheetError::DataLoad(_)));
        let err = records_from_rows(vec![vec![" ".into(), "".into()]]).unwrap_err();
        assert!(matches!(err, SheetError::DataLoad(_)));
    }

    #[test]
    fn rows_matrix_is_trimmed() {
        let rows = vec![
            vec![" Date ".to_string(), "Exercise".to_string()],
            vec!["2024-01-01".to_string(), "  Run ".to_string()],
        ];
        let records = records_from_rows(rows).expect("rows");
        assert_eq!(records[0].get(columns::EXERCISE), Some("Run"));
    }
}
