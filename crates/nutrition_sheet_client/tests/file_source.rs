use std::io::Write;

use nutrition_sheet_client::file_source::CsvFileSource;
use nutrition_sheet_client::{SheetClient, SheetError, columns};

#[tokio::test]
async fn reads_records_from_exported_csv() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(file, "Date,Exercise,Exercise Duration (minutes)").unwrap();
    writeln!(file, "2024-01-01,Run,45").unwrap();
    writeln!(file, "2024-01-02,,").unwrap();

    let source = CsvFileSource::new(file.path());
    let records = source.fetch_records().await.expect("records");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get(columns::EXERCISE), Some("Run"));
    assert_eq!(records[1].get(columns::EXERCISE_DURATION), Some(""));
}

#[tokio::test]
async fn missing_file_is_data_load_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = CsvFileSource::new(dir.path().join("absent.csv"));
    let err = source.fetch_records().await.unwrap_err();
    assert!(matches!(err, SheetError::DataLoad(_)));
}

#[tokio::test]
async fn measurements_come_from_their_own_export() {
    let mut responses = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(responses, "Date,Exercise").unwrap();
    writeln!(responses, "2024-01-01,Run").unwrap();
    let mut tape = tempfile::NamedTempFile::new().expect("tempfile");
    writeln!(tape, "Date,Waist,Chest,Arms").unwrap();
    writeln!(tape, "2024-01-01,34.5,41,14").unwrap();

    let without = CsvFileSource::new(responses.path());
    let err = without.fetch_measurements().await.unwrap_err();
    assert!(matches!(err, SheetError::Config(_)));

    let source = CsvFileSource::new(responses.path()).with_measurements(tape.path());
    let rows = source.fetch_measurements().await.expect("measurements");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(columns::WAIST), Some("34.5"));
    assert_eq!(source.fetch_records().await.expect("records").len(), 1);
}
