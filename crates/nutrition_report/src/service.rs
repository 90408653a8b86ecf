use std::sync::Arc;

use nutrition_sheet_client::{RawRecord, SheetClient};

use crate::domains::{Dashboard, MeasurementSeries, build_dashboard, measurement_series};
use crate::error::{ReportError, ReportResult};
use crate::range::DateRange;
use crate::report::{Report, build_report, record_error};

/// Loads the sheet on every call and runs the pure aggregation over it.
///
/// Nothing is cached between calls, so concurrent requests share only the
/// client handle.
#[derive(Clone)]
pub struct ReportService {
    client: Arc<dyn SheetClient>,
}

impl ReportService {
    pub fn new(client: Arc<dyn SheetClient>) -> Self {
        Self { client }
    }

    pub async fn load_records(&self) -> ReportResult<Vec<RawRecord>> {
        Ok(self.client.fetch_records().await?)
    }

    /// The range is validated before any data is fetched. Every failure is
    /// counted in `report_errors_total`.
    pub async fn weekly_report(
        &self,
        start: Option<&str>,
        end: Option<&str>,
    ) -> ReportResult<Report> {
        let range = DateRange::parse(start, end).inspect_err(record_error)?;
        let records = self.load_records().await.inspect_err(record_error)?;
        build_report(&records, range)
    }

    pub async fn dashboard(&self) -> ReportResult<Dashboard> {
        let records = self.load_records().await.inspect_err(record_error)?;
        Ok(build_dashboard(&records))
    }

    pub async fn measurements(&self) -> ReportResult<MeasurementSeries> {
        let rows = self
            .client
            .fetch_measurements()
            .await
            .map_err(ReportError::from)
            .inspect_err(record_error)?;
        Ok(measurement_series(&rows))
    }
}
