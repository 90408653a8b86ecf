//! Weekly report assembly: filter, average, derive macros, scan for insights.

use std::time::Instant;

use nutrition_sheet_client::RawRecord;
use serde::Serialize;
use tracing::debug;

use crate::domains::{Averages, Insight, MacroBreakdown, compute_averages, generate_insights};
use crate::error::{ReportError, ReportResult};
use crate::range::{DateRange, filter_by_range};

/// Snapshot of one aggregation over a closed date range.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    pub range: DateRange,
    pub days_included: usize,
    pub averages: Averages,
    pub macros: MacroBreakdown,
    pub insights: Vec<Insight>,
    pub records: Vec<RawRecord>,
}

/// Parse the bounds, then build the report for them.
pub fn generate_report(
    records: &[RawRecord],
    start: Option<&str>,
    end: Option<&str>,
) -> ReportResult<Report> {
    let range = DateRange::parse(start, end).inspect_err(record_error)?;
    build_report(records, range)
}

pub fn build_report(records: &[RawRecord], range: DateRange) -> ReportResult<Report> {
    let started = Instant::now();
    let result = aggregate(records, range);
    match &result {
        Ok(report) => {
            metrics::counter!("reports_generated_total").increment(1);
            metrics::histogram!("report_insights").record(report.insights.len() as f64);
            debug!(
                start = %range.start,
                end = %range.end,
                days = report.days_included,
                insights = report.insights.len(),
                elapsed = ?started.elapsed(),
                "report generated"
            );
        }
        Err(e) => record_error(e),
    }
    result
}

fn aggregate(records: &[RawRecord], range: DateRange) -> ReportResult<Report> {
    let subset = filter_by_range(records, &range);
    let averages = compute_averages(&subset)?;
    let macros = MacroBreakdown::from_averages(&averages);
    let insights = generate_insights(&subset);
    Ok(Report {
        range,
        days_included: subset.len(),
        averages,
        macros,
        insights,
        records: subset,
    })
}

/// Count a failed run under `report_errors_total{kind}`.
pub(crate) fn record_error(e: &ReportError) {
    metrics::counter!("report_errors_total", "kind" => e.kind()).increment(1);
    debug!(error = %e, "report not generated");
}
