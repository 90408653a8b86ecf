//! Heuristic day-over-day and whole-range pattern observations.
//!
//! Two passes run over a date-filtered subset:
//!
//! - consecutive-day pairs, after dropping undated rows and sorting by date;
//! - whole-range means over every record in the subset.
//!
//! Both passes read absent or unparseable cells as zero. That is looser than
//! [`compute_averages`](super::averages::compute_averages), which skips
//! invalid values, and the two are kept apart on purpose. The one exception
//! is the exercise duration in the recovery rule, which is read as a whole
//! cell: `"30.5"` counts as 30.5 minutes and `"45 min"` does not count.

use chrono::NaiveDate;
use nutrition_sheet_client::{RawRecord, columns};
use serde::Serialize;

use super::averages::MacroBreakdown;
use crate::metric::{Metric, parse_whole_number};
use crate::range::dated_ascending;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsightKind {
    NutritionEnergy,
    ProteinRecovery,
    SleepWeight,
    CalorieCompensation,
    PositivePattern,
    WeeklyPattern,
    MacroBalance,
}

impl InsightKind {
    pub fn title(self) -> &'static str {
        match self {
            InsightKind::NutritionEnergy => "Energy & Nutrition",
            InsightKind::ProteinRecovery => "Recovery & Protein",
            InsightKind::SleepWeight => "Sleep & Weight",
            InsightKind::CalorieCompensation => "Eating Patterns",
            InsightKind::PositivePattern => "Positive Patterns",
            InsightKind::WeeklyPattern => "Weekly Trends",
            InsightKind::MacroBalance => "Macro Balance",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Positive,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Positive => "positive",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub observation: String,
}

impl Insight {
    fn dated(kind: InsightKind, severity: Severity, date: NaiveDate, observation: String) -> Self {
        Self {
            kind,
            severity,
            date: Some(date),
            observation,
        }
    }

    fn undated(kind: InsightKind, severity: Severity, observation: String) -> Self {
        Self {
            kind,
            severity,
            date: None,
            observation,
        }
    }
}

/// Run both passes; pair insights come first, in date order.
pub fn generate_insights(records: &[RawRecord]) -> Vec<Insight> {
    let mut insights = consecutive_day_insights(records);
    insights.extend(whole_range_insights(records));
    insights
}

struct Day<'a> {
    date: NaiveDate,
    record: &'a RawRecord,
    carbs: f64,
    protein: f64,
    calories: f64,
    sleep: f64,
    energy: f64,
    weight: f64,
    exercise_minutes: Option<f64>,
}

impl<'a> Day<'a> {
    fn new(date: NaiveDate, record: &'a RawRecord) -> Self {
        Self {
            date,
            record,
            carbs: Metric::Carbs.value_or_zero(record),
            protein: Metric::Protein.value_or_zero(record),
            calories: Metric::Calories.value_or_zero(record),
            sleep: Metric::Sleep.value_or_zero(record),
            energy: Metric::Energy.value_or_zero(record),
            weight: Metric::Weight.value_or_zero(record),
            exercise_minutes: record
                .get(columns::EXERCISE_DURATION)
                .and_then(parse_whole_number),
        }
    }

    fn label(&self) -> &str {
        self.record.date_text()
    }
}

/// Every day-pair rule is checked for every adjacent pair of dated days.
pub fn consecutive_day_insights(records: &[RawRecord]) -> Vec<Insight> {
    let days: Vec<Day<'_>> = dated_ascending(records)
        .into_iter()
        .map(|(date, record)| Day::new(date, record))
        .collect();

    let mut insights = Vec::new();
    for pair in days.windows(2) {
        let (today, tomorrow) = (&pair[0], &pair[1]);

        if today.carbs < 100.0 && tomorrow.energy < today.energy && tomorrow.energy < 6.0 {
            insights.push(Insight::dated(
                InsightKind::NutritionEnergy,
                Severity::Medium,
                tomorrow.date,
                format!(
                    "Low carb intake ({}g) on {} may have contributed to lower energy ({}/10) on {}.",
                    today.carbs,
                    today.label(),
                    tomorrow.energy,
                    tomorrow.label()
                ),
            ));
        }

        if today.protein < 80.0
            && today.exercise_minutes.is_some_and(|m| m > 30.0)
            && tomorrow.energy < 6.0
        {
            insights.push(Insight::dated(
                InsightKind::ProteinRecovery,
                Severity::Medium,
                tomorrow.date,
                format!(
                    "Low protein intake ({}g) after {} minutes of exercise on {} may have affected recovery and energy ({}/10) the next day.",
                    today.protein,
                    today.record.text(columns::EXERCISE_DURATION),
                    today.label(),
                    tomorrow.energy
                ),
            ));
        }

        let weight_delta = tomorrow.weight - today.weight;
        if today.sleep < 6.5 && weight_delta.abs() > 2.0 {
            let direction = if weight_delta > 0.0 { "increase" } else { "decrease" };
            insights.push(Insight::dated(
                InsightKind::SleepWeight,
                Severity::Low,
                tomorrow.date,
                format!(
                    "Poor sleep ({} hours) on {} may be related to weight {} (+{:.1} lbs) on {}.",
                    today.sleep,
                    today.label(),
                    direction,
                    weight_delta.abs(),
                    tomorrow.label()
                ),
            ));
        }

        let next_calories = Metric::Calories.read(tomorrow.record);
        if today.calories < 1200.0 && next_calories.is_some_and(|c| c > today.calories + 500.0) {
            insights.push(Insight::dated(
                InsightKind::CalorieCompensation,
                Severity::Medium,
                tomorrow.date,
                format!(
                    "Very low calorie intake ({} kcal) on {} followed by higher intake ({} kcal) suggests potential compensation eating.",
                    today.calories,
                    today.label(),
                    tomorrow.record.text(columns::TOTAL_CALORIES)
                ),
            ));
        }

        if today.sleep >= 7.5 && today.carbs >= 150.0 && tomorrow.energy >= 8.0 {
            insights.push(Insight::dated(
                InsightKind::PositivePattern,
                Severity::Positive,
                tomorrow.date,
                format!(
                    "Good sleep ({} hours) and adequate carbs ({}g) on {} corresponded with high energy ({}/10) on {}.",
                    today.sleep,
                    today.carbs,
                    today.label(),
                    tomorrow.energy,
                    tomorrow.label()
                ),
            ));
        }
    }
    insights
}

fn mean_or_zero(metric: Metric, records: &[RawRecord]) -> f64 {
    let sum: f64 = records.iter().map(|r| metric.value_or_zero(r)).sum();
    sum / records.len() as f64
}

/// Trend rules over the whole subset. An empty subset has no trend.
pub fn whole_range_insights(records: &[RawRecord]) -> Vec<Insight> {
    if records.is_empty() {
        return Vec::new();
    }
    let carbs = mean_or_zero(Metric::Carbs, records);
    let protein = mean_or_zero(Metric::Protein, records);
    let fat = mean_or_zero(Metric::Fat, records);
    let energy = mean_or_zero(Metric::Energy, records);
    let sleep = mean_or_zero(Metric::Sleep, records);

    let mut insights = Vec::new();
    let low_energy = energy < 6.5;

    if carbs < 120.0 && low_energy {
        insights.push(Insight::undated(
            InsightKind::WeeklyPattern,
            Severity::Medium,
            format!(
                "Overall low carbohydrate intake ({carbs:.0}g average) this week may be contributing to consistently lower energy levels ({energy:.1}/10 average)."
            ),
        ));
    }

    if protein < 100.0 && low_energy {
        insights.push(Insight::undated(
            InsightKind::WeeklyPattern,
            Severity::Medium,
            format!(
                "Low protein intake ({protein:.0}g average) may be affecting energy and recovery throughout the week."
            ),
        ));
    }

    if sleep < 7.0 && low_energy {
        insights.push(Insight::undated(
            InsightKind::WeeklyPattern,
            Severity::High,
            format!(
                "Insufficient sleep ({sleep:.1} hours average) appears to be significantly impacting energy levels ({energy:.1}/10 average) throughout the week."
            ),
        ));
    }

    let macros = MacroBreakdown::from_grams(protein, carbs, fat);
    if macros.total_macro_calories > 0.0 && macros.protein_pct < 15.0 && low_energy {
        insights.push(Insight::undated(
            InsightKind::MacroBalance,
            Severity::Medium,
            format!(
                "Protein intake is below 15% of total calories ({:.1}%), which may be contributing to lower energy and satiety.",
                macros.protein_pct
            ),
        ));
    }

    insights
}
