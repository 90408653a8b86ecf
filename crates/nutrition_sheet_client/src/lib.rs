//! `SheetClient` trait, raw row model and the reqwest-based sheet transport.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use thiserror::Error;

pub mod columns;
pub mod config;
pub mod dates;
pub mod file_source;
pub mod http_client;
pub mod ingest;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("sheet request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("failed to load data: {0}")]
    DataLoad(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl SheetError {
    /// Short label used for metrics and log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            SheetError::Http(_) => "http",
            SheetError::Status { .. } => "status",
            SheetError::DataLoad(_) => "data_load",
            SheetError::Config(_) => "config",
        }
    }
}

/// One data row of the tracking sheet, keyed by the exact header text.
///
/// Cells are kept as text in sheet column order; numeric coercion belongs to
/// whoever consumes the record. Serializes as a flat JSON object in that same
/// order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: Vec<(String, String)>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut record = Self::new();
        for (header, value) in pairs {
            record.insert(header, value);
        }
        record
    }

    /// Set a cell. A header seen before keeps its position and takes the new
    /// value; a new header is appended.
    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        let header = header.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(h, _)| *h == header) {
            Some((_, existing)) => *existing = value,
            None => self.fields.push((header, value)),
        }
    }

    /// Cell text for `header`, if the row has that column.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Cell text for `header`, or `""` when the column is absent.
    pub fn text(&self, header: &str) -> &str {
        self.get(header).unwrap_or_default()
    }

    /// The raw `Date` cell.
    pub fn date_text(&self) -> &str {
        self.text(columns::DATE)
    }

    /// Parsed `Date` cell, `None` when it matches no known format.
    pub fn date(&self) -> Option<NaiveDate> {
        dates::parse_record_date(self.date_text())
    }

    /// The cell of the leftmost column, `""` for a record with no cells.
    pub fn first_text(&self) -> &str {
        self.fields.first().map_or("", |(_, v)| v.as_str())
    }

    pub fn is_blank(&self) -> bool {
        self.fields.iter().all(|(_, v)| v.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Serialize for RawRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

#[async_trait]
pub trait SheetClient: Send + Sync + 'static {
    /// Fetch the tracking sheet and parse it into records, in sheet order.
    ///
    /// This is the only suspend point of a report run. Failures are reported
    /// once; callers decide whether to try again.
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, SheetError>;

    /// Fetch the body-measurements tab, in sheet order. Sources without one
    /// report a `Config` error.
    async fn fetch_measurements(&self) -> Result<Vec<RawRecord>, SheetError> {
        Err(SheetError::Config("this source has no measurements tab".into()))
    }
}
