use crate::SheetError;
use secrecy::SecretString;

pub const DEFAULT_SHEET_NAME: &str = "Form Responses";
pub const DEFAULT_MEASUREMENTS_SHEET: &str = "Measurements";
pub const DEFAULT_BASE_URL: &str = "https://docs.google.com";
pub const DEFAULT_API_URL: &str = "https://sheets.googleapis.com";

#[derive(Clone, Debug)]
pub struct Config {
    pub sheet_id: String,
    pub sheet_name: String,
    /// Host serving the public CSV export.
    pub base_url: String,
    /// Host serving the v4 values API.
    pub api_url: String,
    /// When set, rows are read through the values API instead of the CSV export.
    pub api_key: Option<SecretString>,
    /// A1 range requested from the values API.
    pub range: String,
    /// Tab holding body measurements, read like the main tab.
    pub measurements_sheet: String,
    pub measurements_range: String,
}

impl Config {
    pub fn new(sheet_id: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            sheet_name: DEFAULT_SHEET_NAME.into(),
            base_url: DEFAULT_BASE_URL.into(),
            api_url: DEFAULT_API_URL.into(),
            api_key: None,
            range: default_range(DEFAULT_SHEET_NAME),
            measurements_sheet: DEFAULT_MEASUREMENTS_SHEET.into(),
            measurements_range: default_range(DEFAULT_MEASUREMENTS_SHEET),
        }
    }

    pub fn from_env() -> Result<Self, SheetError> {
        Self::from_env_with(|k| std::env::var(k).ok())
    }

    /// Testable helper that reads configuration values using the provided
    /// function, so tests never touch the process environment.
    pub fn from_env_with<F>(mut get: F) -> Result<Self, SheetError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let sheet_id = get("NUTRITION_SHEET_ID")
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| SheetError::Config("NUTRITION_SHEET_ID missing".into()))?;
        let sheet_name =
            get("NUTRITION_SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string());
        let base_url =
            get("NUTRITION_SHEET_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let api_url =
            get("NUTRITION_SHEETS_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_key = get("NUTRITION_SHEETS_API_KEY")
            .filter(|k| !k.is_empty())
            .map(|k| SecretString::new(k.into()));
        let range = get("NUTRITION_SHEET_RANGE").unwrap_or_else(|| default_range(&sheet_name));
        let measurements_sheet = get("NUTRITION_MEASUREMENTS_SHEET")
            .unwrap_or_else(|| DEFAULT_MEASUREMENTS_SHEET.to_string());
        let measurements_range = get("NUTRITION_MEASUREMENTS_RANGE")
            .unwrap_or_else(|| default_range(&measurements_sheet));
        Ok(Self {
            sheet_id,
            sheet_name,
            base_url,
            api_url,
            api_key,
            range,
            measurements_sheet,
            measurements_range,
        })
    }

    pub fn uses_values_api(&self) -> bool {
        self.api_key.is_some()
    }
}

fn default_range(sheet_name: &str) -> String {
    format!("{sheet_name}!A1:Z")
}
