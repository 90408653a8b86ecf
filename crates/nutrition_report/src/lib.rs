//! Weekly nutrition report engine over a tracking sheet.
//!
//! Records come from any [`SheetClient`](nutrition_sheet_client::SheetClient).
//! The engine filters them to a date range, averages each metric over its
//! valid values, derives the macro split and scans for day-over-day and
//! whole-range patterns. Aggregation is synchronous and pure; fetching is the
//! only async step.

pub mod domains;
pub mod error;
pub mod http;
pub mod metric;
pub mod middleware;
pub mod range;
pub mod render;
pub mod report;
pub mod service;

mod test_utils;

pub use domains::{Dashboard, Insight, InsightKind, MacroBreakdown, MeasurementSeries, Severity};
pub use error::{ReportError, ReportResult};
pub use metric::Metric;
pub use middleware::LoggingSheetClient;
pub use range::{DateRange, filter_by_range};
pub use report::{Report, build_report, generate_report};
pub use service::ReportService;
