//! Shared mock `SheetClient` used by unit tests.
#![cfg(test)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use nutrition_sheet_client::{RawRecord, SheetClient, SheetError};

/// Returns a fixed set of records, or a `DataLoad` error, and counts calls.
pub struct MockSheetClient {
    records: Vec<RawRecord>,
    measurements: Vec<RawRecord>,
    failure: Option<String>,
    calls: Arc<AtomicUsize>,
}

impl MockSheetClient {
    pub fn with_records(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            measurements: Vec::new(),
            failure: None,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            records: Vec::new(),
            measurements: Vec::new(),
            failure: Some(message.to_string()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_measurements(mut self, rows: Vec<RawRecord>) -> Self {
        self.measurements = rows;
        self
    }

    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

#[async_trait]
impl SheetClient for MockSheetClient {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, SheetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(msg) => Err(SheetError::DataLoad(msg.clone())),
            None => Ok(self.records.clone()),
        }
    }

    async fn fetch_measurements(&self) -> Result<Vec<RawRecord>, SheetError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(msg) => Err(SheetError::DataLoad(msg.clone())),
            None => Ok(self.measurements.clone()),
        }
    }
}
