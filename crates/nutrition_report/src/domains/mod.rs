//! Domain logic over borrowed sheet records.
//!
//! # Modules
//!
//! - [`averages`]: per-metric averages and macro breakdown
//! - [`insights`]: day-pair and whole-range pattern observations
//! - [`dashboard`]: chart series, tag counts and recent-days summary
//! - [`measurements`]: chart series for the body-measurements tab

pub mod averages;
pub mod dashboard;
pub mod insights;
pub mod measurements;

pub use averages::{Averages, MacroBreakdown, MetricAverage, compute_averages};
pub use dashboard::{Dashboard, build_dashboard};
pub use insights::{Insight, InsightKind, Severity, generate_insights};
pub use measurements::{MeasurementSeries, measurement_series};
