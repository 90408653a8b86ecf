use std::collections::BTreeMap;

use nutrition_sheet_client::RawRecord;
use serde::Serialize;

use crate::error::{ReportError, ReportResult};
use crate::metric::Metric;

pub const PROTEIN_KCAL_PER_GRAM: f64 = 4.0;
pub const CARBS_KCAL_PER_GRAM: f64 = 4.0;
pub const FAT_KCAL_PER_GRAM: f64 = 9.0;

/// Mean of one metric over the records where it was valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MetricAverage {
    pub average: f64,
    pub valid_days: usize,
}

impl MetricAverage {
    /// Fold a metric's valid values into a mean; no valid values gives 0.
    pub fn over(metric: Metric, records: &[RawRecord]) -> Self {
        let (sum, count) = records
            .iter()
            .filter_map(|r| metric.valid_value(r))
            .fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
        let average = if count == 0 { 0.0 } else { sum / count as f64 };
        Self {
            average,
            valid_days: count,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Averages {
    by_metric: BTreeMap<Metric, MetricAverage>,
}

impl Averages {
    pub fn get(&self, metric: Metric) -> MetricAverage {
        self.by_metric.get(&metric).copied().unwrap_or_default()
    }

    /// The average alone, 0 for a metric with no valid values.
    pub fn average(&self, metric: Metric) -> f64 {
        self.get(metric).average
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, MetricAverage)> + '_ {
        self.by_metric.iter().map(|(m, a)| (*m, *a))
    }
}

/// Per-metric averages over a date-filtered subset.
pub fn compute_averages(records: &[RawRecord]) -> ReportResult<Averages> {
    if records.is_empty() {
        return Err(ReportError::EmptyResult);
    }
    let by_metric = Metric::ALL
        .iter()
        .map(|&m| (m, MetricAverage::over(m, records)))
        .collect();
    Ok(Averages { by_metric })
}

/// Share of macro calories per nutrient, in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct MacroBreakdown {
    pub protein_pct: f64,
    pub carbs_pct: f64,
    pub fat_pct: f64,
    pub total_macro_calories: f64,
}

impl MacroBreakdown {
    /// All percentages are 0 when the grams add up to no calories.
    pub fn from_grams(protein: f64, carbs: f64, fat: f64) -> Self {
        let protein_kcal = protein * PROTEIN_KCAL_PER_GRAM;
        let carbs_kcal = carbs * CARBS_KCAL_PER_GRAM;
        let fat_kcal = fat * FAT_KCAL_PER_GRAM;
        let total = protein_kcal + carbs_kcal + fat_kcal;
        if total <= 0.0 {
            return Self {
                total_macro_calories: total.max(0.0),
                ..Self::default()
            };
        }
        Self {
            protein_pct: protein_kcal / total * 100.0,
            carbs_pct: carbs_kcal / total * 100.0,
            fat_pct: fat_kcal / total * 100.0,
            total_macro_calories: total,
        }
    }

    pub fn from_averages(averages: &Averages) -> Self {
        Self::from_grams(
            averages.average(Metric::Protein),
            averages.average(Metric::Carbs),
            averages.average(Metric::Fat),
        )
    }
}
