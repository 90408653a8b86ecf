//! Plain-text rendering of reports and dashboards for the terminal.

use serde::Serialize;

use crate::domains::{Dashboard, MeasurementSeries};
use crate::error::ReportResult;
use crate::metric::Metric;
use crate::report::Report;

/// Integer with `,` thousands separators, e.g. `12,345`.
fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_text(report: &Report) -> String {
    let avg = |m: Metric| report.averages.average(m);
    let mut lines = vec![
        "Nutrition Coaching Weekly Report".to_string(),
        format!("{} - {}", report.range.start, report.range.end),
        format!("({} days of data)", report.days_included),
        String::new(),
        "Physical Metrics".to_string(),
        format!("  Average Weight:            {:.1} lbs", avg(Metric::Weight)),
        format!("  Average Sleep:             {:.1} hours", avg(Metric::Sleep)),
        format!("  Average Energy Level:      {:.1}/10", avg(Metric::Energy)),
        format!("  Average Steps:             {}", group_thousands(avg(Metric::Steps))),
        format!(
            "  Average Exercise Duration: {:.0} minutes",
            avg(Metric::ExerciseDuration)
        ),
        String::new(),
        "Nutrition Metrics".to_string(),
        format!("  Average Daily Calories:    {:.0} kcal", avg(Metric::Calories)),
        format!("  Average Protein:           {:.0}g", avg(Metric::Protein)),
        format!("  Average Carbohydrates:     {:.0}g", avg(Metric::Carbs)),
        format!("  Average Fat:               {:.0}g", avg(Metric::Fat)),
        String::new(),
        "Macro Distribution".to_string(),
        format!("  Protein: {:.1}%", report.macros.protein_pct),
        format!("  Carbs:   {:.1}%", report.macros.carbs_pct),
        format!("  Fat:     {:.1}%", report.macros.fat_pct),
    ];

    if !report.insights.is_empty() {
        lines.push(String::new());
        lines.push("Data Insights & Patterns".to_string());
        for insight in &report.insights {
            let heading = format!("[{}] {}", insight.severity.label(), insight.kind.title());
            lines.push(match insight.date {
                Some(date) => format!("  {heading} ({date})"),
                None => format!("  {heading}"),
            });
            lines.push(format!("    {}", insight.observation));
        }
    }
    lines.join("\n") + "\n"
}

/// Pretty JSON for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> ReportResult<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn opt(value: Option<f64>, places: usize) -> String {
    value.map_or_else(|| "--".to_string(), |v| format!("{v:.places$}"))
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let recent = &dashboard.recent;
    let mut lines = vec![
        format!("Last {} days", recent.days),
        format!("  Average Weight:   {}", opt(recent.avg_weight, 1)),
        format!("  Average Calories: {}", opt(recent.avg_calories, 0)),
        format!("  Average Sleep:    {}", opt(recent.avg_sleep, 1)),
        format!("  Workouts:         {}", recent.workouts),
    ];

    if !dashboard.situations.is_empty() {
        lines.push(String::new());
        lines.push("Situations affecting eating".to_string());
        lines.extend(
            dashboard
                .situations
                .iter()
                .map(|tag| format!("  {:<24} {}", tag.tag, tag.count)),
        );
    }

    if !dashboard.exercise.is_empty() {
        lines.push(String::new());
        lines.push("Exercise".to_string());
        lines.extend(dashboard.exercise.iter().map(|row| {
            format!("  {:<12} {:<20} {}", row.date, row.exercise, row.exercise_duration)
        }));
    }

    lines.push(String::new());
    lines.push(format!("{} records", dashboard.records));
    lines.join("\n") + "\n"
}

/// One row per date with a column per measured field; gaps show as `--`.
pub fn render_measurements(charts: &MeasurementSeries) -> String {
    if charts.series.is_empty() {
        return "No measurements recorded\n".to_string();
    }
    let header = charts
        .series
        .iter()
        .fold(format!("{:<12}", "Date"), |acc, line| acc + &format!(" {:>8}", line.field));
    let rows = charts.labels.iter().enumerate().map(|(i, label)| {
        charts.series.iter().fold(format!("{label:<12}"), |acc, line| {
            let point = line.points.get(i).copied().flatten();
            acc + &format!(" {:>8}", opt(point, 2))
        })
    });
    std::iter::once(header)
        .chain(rows)
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::{build_dashboard, measurement_series};
    use crate::report::generate_report;
    use nutrition_sheet_client::{RawRecord, columns};

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.4), "999");
        assert_eq!(group_thousands(8500.6), "8,501");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
    }

    #[test]
    fn report_text_has_all_sections() {
        let records = vec![
            RawRecord::from_pairs([
                (columns::DATE, "2024-01-01"),
                (columns::MORNING_WEIGHT, "180.44"),
                (columns::STEP_COUNT, "10500"),
                (columns::CARBOHYDRATES, "50"),
                (columns::ENERGY_LEVEL, "7"),
            ]),
            RawRecord::from_pairs([
                (columns::DATE, "2024-01-02"),
                (columns::CARBOHYDRATES, "200"),
                (columns::ENERGY_LEVEL, "5"),
            ]),
        ];
        let report =
            generate_report(&records, Some("2024-01-01"), Some("2024-01-02")).expect("report");
        let text = render_text(&report);
        assert!(text.contains("2024-01-01 - 2024-01-02"));
        assert!(text.contains("(2 days of data)"));
        assert!(text.contains("180.4 lbs"));
        assert!(text.contains("10,500"));
        assert!(text.contains("Energy & Nutrition (2024-01-02)"));
        assert!(text.contains("[medium]"));
    }

    #[test]
    fn dashboard_text_shows_placeholders() {
        let records = vec![RawRecord::from_pairs([
            (columns::DATE, "2024-01-01"),
            (columns::SITUATIONS, "Stress"),
        ])];
        let text = render_dashboard(&build_dashboard(&records));
        assert!(text.contains("Average Weight:   --"));
        assert!(text.contains("Stress"));
        assert!(text.contains("1 records"));
    }

    #[test]
    fn measurements_table_has_a_column_per_field() {
        let rows = vec![
            RawRecord::from_pairs([(columns::DATE, "1/1/2024"), (columns::WAIST, "34.5")]),
            RawRecord::from_pairs([(columns::DATE, "1/8/2024"), (columns::WAIST, "")]),
        ];
        let text = render_measurements(&measurement_series(&rows));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Date            Waist");
        assert_eq!(lines[1], "1/1/2024        34.50");
        assert_eq!(lines[2], "1/8/2024           --");
        assert_eq!(render_measurements(&measurement_series(&[])), "No measurements recorded\n");
    }

    #[test]
    fn json_output_is_pretty() {
        let dashboard = build_dashboard(&[]);
        let json = to_json(&dashboard).expect("json");
        assert!(json.contains("\n  \"records\": 0"));
    }
}
