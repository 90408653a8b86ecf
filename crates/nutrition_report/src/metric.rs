//! The nine tracked numeric metrics and how their cells become numbers.
//!
//! Sheet cells are free text. A cell is read by taking its longest leading
//! numeric prefix (`"7.5 hrs"` reads as `7.5`), and integer-valued columns
//! truncate toward zero (`"82.9"` reads as `82`). Anything without a leading
//! number reads as absent.

use nutrition_sheet_client::{RawRecord, columns};
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    Weight,
    Calories,
    Protein,
    Carbs,
    Fat,
    Sleep,
    Energy,
    Steps,
    ExerciseDuration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberKind {
    Decimal,
    Integer,
}

/// Which parsed values count toward a metric's average.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Validity {
    /// Strictly greater than zero.
    Positive,
    /// Zero allowed; a zero-gram macro day is a real day.
    NonNegative,
}

impl Validity {
    pub fn accepts(self, value: f64) -> bool {
        match self {
            Validity::Positive => value > 0.0,
            Validity::NonNegative => value >= 0.0,
        }
    }
}

impl Metric {
    pub const ALL: [Metric; 9] = [
        Metric::Weight,
        Metric::Calories,
        Metric::Protein,
        Metric::Carbs,
        Metric::Fat,
        Metric::Sleep,
        Metric::Energy,
        Metric::Steps,
        Metric::ExerciseDuration,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Metric::Weight => columns::MORNING_WEIGHT,
            Metric::Calories => columns::TOTAL_CALORIES,
            Metric::Protein => columns::PROTEIN,
            Metric::Carbs => columns::CARBOHYDRATES,
            Metric::Fat => columns::FAT,
            Metric::Sleep => columns::SLEEP_HOURS,
            Metric::Energy => columns::ENERGY_LEVEL,
            Metric::Steps => columns::STEP_COUNT,
            Metric::ExerciseDuration => columns::EXERCISE_DURATION,
        }
    }

    pub fn kind(self) -> NumberKind {
        match self {
            Metric::Weight | Metric::Sleep | Metric::Energy => NumberKind::Decimal,
            _ => NumberKind::Integer,
        }
    }

    pub fn validity(self) -> Validity {
        match self {
            Metric::Protein | Metric::Carbs | Metric::Fat => Validity::NonNegative,
            _ => Validity::Positive,
        }
    }

    /// The record's cell for this metric as a number, if it has one.
    pub fn read(self, record: &RawRecord) -> Option<f64> {
        let text = record.get(self.header())?;
        match self.kind() {
            NumberKind::Decimal => parse_leading_decimal(text),
            NumberKind::Integer => parse_leading_integer(text),
        }
    }

    /// The record's value if it counts toward this metric's average.
    pub fn valid_value(self, record: &RawRecord) -> Option<f64> {
        self.read(record).filter(|v| self.validity().accepts(*v))
    }

    /// The record's value with absent or unparseable cells read as zero.
    pub fn value_or_zero(self, record: &RawRecord) -> f64 {
        self.read(record).unwrap_or(0.0)
    }
}

/// Longest leading decimal number in `s`, ignoring leading whitespace.
pub fn parse_leading_decimal(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = sign_len(bytes);

    let int_end = skip_digits(bytes, end);
    let mut has_digits = int_end > end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        if has_digits || frac_end > end + 1 {
            has_digits |= frac_end > end + 1;
            end = frac_end;
        }
    }
    if !has_digits {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = skip_digits(bytes, exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Longest leading base-10 integer in `s`, ignoring leading whitespace.
pub fn parse_leading_integer(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let start = sign_len(bytes);
    let end = skip_digits(bytes, start);
    if end == start {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Whole-cell numeric reading: surrounding whitespace is ignored, a blank
/// cell is `0`, and any trailing text makes the cell unreadable.
pub fn parse_whole_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return Some(0.0);
    }
    s.parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn sign_len(bytes: &[u8]) -> usize {
    usize::from(matches!(bytes.first(), Some(b'+' | b'-')))
}

fn skip_digits(bytes: &[u8], from: usize) -> usize {
    let mut i = from;
    while bytes.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    i
}
