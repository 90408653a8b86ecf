//! A [`SheetClient`] over CSV files exported from the sheet.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::{RawRecord, SheetClient, SheetError, ingest};

#[derive(Clone, Debug)]
pub struct CsvFileSource {
    path: PathBuf,
    measurements: Option<PathBuf>,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            measurements: None,
        }
    }

    /// Also serve the measurements tab, exported to its own file.
    pub fn with_measurements(mut self, path: impl Into<PathBuf>) -> Self {
        self.measurements = Some(path.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

async fn read_export(path: &Path) -> Result<Vec<RawRecord>, SheetError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| SheetError::DataLoad(format!("reading {}: {e}", path.display())))?;
    ingest::parse_csv(&text)
}

#[async_trait]
impl SheetClient for CsvFileSource {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, SheetError> {
        read_export(&self.path).await
    }

    async fn fetch_measurements(&self) -> Result<Vec<RawRecord>, SheetError> {
        match &self.measurements {
            Some(path) => read_export(path).await,
            None => Err(SheetError::Config(
                "no measurements export given for this CSV source".into(),
            )),
        }
    }
}
