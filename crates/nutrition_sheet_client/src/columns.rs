//! Header names of the "Form Responses" tracking sheet.

pub const TIMESTAMP: &str = "Timestamp";
pub const DATE: &str = "Date";
pub const MORNING_WEIGHT: &str = "Morning Weight";
pub const SLEEP_HOURS: &str = "Sleep Hours";
pub const ENERGY_LEVEL: &str = "Energy Level";
pub const STEP_COUNT: &str = "Step Count";
pub const TOTAL_CALORIES: &str = "Total Calories";
pub const PROTEIN: &str = "Protein (grams)";
pub const CARBOHYDRATES: &str = "Carbohydrates (grams)";
pub const FAT: &str = "Fat (grams)";
pub const EXERCISE: &str = "Exercise";
pub const EXERCISE_DURATION: &str = "Exercise Duration (minutes)";
pub const SITUATIONS: &str = "Did any of these situations affect your eating yesterday?";
pub const DAILY_NOTES: &str = "Daily Notes";

/// Every column the form produces, in sheet order.
pub const ALL: [&str; 14] = [
    TIMESTAMP,
    DATE,
    MORNING_WEIGHT,
    SLEEP_HOURS,
    ENERGY_LEVEL,
    STEP_COUNT,
    TOTAL_CALORIES,
    PROTEIN,
    CARBOHYDRATES,
    FAT,
    EXERCISE,
    EXERCISE_DURATION,
    SITUATIONS,
    DAILY_NOTES,
];

/// Tape measurements charted from the measurements tab, in display order.
pub const WAIST: &str = "Waist";
pub const CHEST: &str = "Chest";
pub const ARMS: &str = "Arms";

pub const MEASUREMENTS: [&str; 3] = [WAIST, CHEST, ARMS];

pub fn is_known(header: &str) -> bool {
    ALL.contains(&header)
}
