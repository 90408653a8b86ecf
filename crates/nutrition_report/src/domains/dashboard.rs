//! Whole-sheet projections for the dashboard: chart series, situation tag
//! counts, note and exercise listings, and a short recent-days summary.

use nutrition_sheet_client::{RawRecord, columns};
use serde::Serialize;

use crate::metric::Metric;

/// Metrics drawn as charts, in display order.
pub const CHARTED: [Metric; 8] = [
    Metric::Weight,
    Metric::Sleep,
    Metric::Energy,
    Metric::Steps,
    Metric::Calories,
    Metric::Protein,
    Metric::Carbs,
    Metric::Fat,
];

pub const DEFAULT_RECENT_DAYS: usize = 7;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Series {
    pub metric: Metric,
    pub label: &'static str,
    pub points: Vec<Option<f64>>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub series: Vec<Series>,
}

/// One point per record, labelled with the raw `Date` cell. Missing,
/// unparseable and zero values are gaps.
pub fn chart_series(records: &[RawRecord]) -> ChartSeries {
    let labels = records.iter().map(|r| r.date_text().to_string()).collect();
    let series = CHARTED
        .iter()
        .map(|&metric| Series {
            metric,
            label: metric.header(),
            points: records
                .iter()
                .map(|r| metric.read(r).filter(|v| *v != 0.0))
                .collect(),
        })
        .collect();
    ChartSeries { labels, series }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Occurrences of each comma-separated situation tag, first-seen order.
pub fn situation_counts(records: &[RawRecord]) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    let tags = records
        .iter()
        .flat_map(|r| r.text(columns::SITUATIONS).split(','))
        .map(str::trim)
        .filter(|t| !t.is_empty());
    for tag in tags {
        match counts.iter_mut().find(|c| c.tag == tag) {
            Some(existing) => existing.count += 1,
            None => counts.push(TagCount {
                tag: tag.to_string(),
                count: 1,
            }),
        }
    }
    counts
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NoteRow {
    pub date: String,
    pub exercise: String,
    pub exercise_duration: String,
    pub notes: String,
}

impl NoteRow {
    fn from_record(record: &RawRecord) -> Self {
        Self {
            date: record.date_text().to_string(),
            exercise: record.text(columns::EXERCISE).to_string(),
            exercise_duration: record.text(columns::EXERCISE_DURATION).to_string(),
            notes: record.text(columns::DAILY_NOTES).to_string(),
        }
    }
}

pub fn daily_notes(records: &[RawRecord]) -> Vec<NoteRow> {
    records.iter().map(NoteRow::from_record).collect()
}

/// Rows where an exercise or a duration was entered.
pub fn exercise_log(records: &[RawRecord]) -> Vec<NoteRow> {
    records
        .iter()
        .filter(|r| {
            !r.text(columns::EXERCISE).trim().is_empty()
                || !r.text(columns::EXERCISE_DURATION).trim().is_empty()
        })
        .map(NoteRow::from_record)
        .collect()
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecentSummary {
    pub days: usize,
    pub avg_weight: Option<f64>,
    pub avg_calories: Option<f64>,
    pub avg_sleep: Option<f64>,
    pub workouts: usize,
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Summary of the newest `days` dated records. Averages are `None` when no
/// record in the window has a usable value.
pub fn recent_summary(records: &[RawRecord], days: usize) -> RecentSummary {
    let mut dated: Vec<_> = records
        .iter()
        .filter_map(|r| r.date().map(|d| (d, r)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    let window: Vec<&RawRecord> = dated.into_iter().take(days).map(|(_, r)| r).collect();

    let avg = |metric: Metric| mean(window.iter().filter_map(|r| metric.valid_value(r)));
    RecentSummary {
        days: window.len(),
        avg_weight: avg(Metric::Weight).map(|v| round_to(v, 1)),
        avg_calories: avg(Metric::Calories).map(f64::round),
        avg_sleep: avg(Metric::Sleep).map(|v| round_to(v, 1)),
        workouts: window
            .iter()
            .filter(|r| !r.text(columns::EXERCISE).trim().is_empty())
            .count(),
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Dashboard {
    pub records: usize,
    pub charts: ChartSeries,
    pub situations: Vec<TagCount>,
    pub notes: Vec<NoteRow>,
    pub exercise: Vec<NoteRow>,
    pub recent: RecentSummary,
}

pub fn build_dashboard(records: &[RawRecord]) -> Dashboard {
    Dashboard {
        records: records.len(),
        charts: chart_series(records),
        situations: situation_counts(records),
        notes: daily_notes(records),
        exercise: exercise_log(records),
        recent: recent_summary(records, DEFAULT_RECENT_DAYS),
    }
}
