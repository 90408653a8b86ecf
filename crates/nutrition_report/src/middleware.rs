//! Middleware layer for cross-cutting concerns around the sheet source.

use std::sync::Arc;
use std::time::Instant;

use nutrition_sheet_client::{RawRecord, SheetClient, SheetError};
use tracing::debug;

/// Wraps any [`SheetClient`] and logs each fetch with its duration and outcome.
#[derive(Clone)]
pub struct LoggingSheetClient<C: SheetClient> {
    inner: Arc<C>,
}

impl<C: SheetClient> LoggingSheetClient<C> {
    pub fn new(client: C) -> Self {
        Self {
            inner: Arc::new(client),
        }
    }

    /// Execute a fallible operation with logging.
    async fn with_logging<F, Fut, T>(&self, operation: F, name: &str) -> Result<T, SheetError>
    where
        F: FnOnce(Arc<C>) -> Fut,
        Fut: std::future::Future<Output = Result<T, SheetError>>,
    {
        let start = Instant::now();
        debug!("Starting operation: {}", name);

        let result = operation(self.inner.clone()).await;

        let duration = start.elapsed();
        match &result {
            Ok(_) => debug!("Operation completed successfully: {} in {:?}", name, duration),
            Err(e) => debug!("Operation failed: {} in {:?} - error: {}", name, duration, e),
        }
        result
    }
}

#[async_trait::async_trait]
impl<C: SheetClient> SheetClient for LoggingSheetClient<C> {
    async fn fetch_records(&self) -> Result<Vec<RawRecord>, SheetError> {
        let records = self
            .with_logging(
                |client| async move { client.fetch_records().await },
                "fetch_records",
            )
            .await?;
        debug!(records = records.len(), "sheet records loaded");
        Ok(records)
    }

    async fn fetch_measurements(&self) -> Result<Vec<RawRecord>, SheetError> {
        let rows = self
            .with_logging(
                |client| async move { client.fetch_measurements().await },
                "fetch_measurements",
            )
            .await?;
        debug!(rows = rows.len(), "measurement rows loaded");
        Ok(rows)
    }
}
