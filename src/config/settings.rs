//! Application settings loaded from `config.toml`.
//!
//! The file carries the church identity printed on receipts, report defaults,
//! and the category lists used to seed empty category tables on first run.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    /// Church identity used on receipts
    #[serde(default)]
    pub church: ChurchConfig,
    /// Report defaults
    #[serde(default)]
    pub reports: ReportConfig,
    /// Income categories to seed
    #[serde(default)]
    pub income_categories: Vec<CategoryConfig>,
    /// Expense categories to seed
    #[serde(default)]
    pub expense_categories: Vec<CategoryConfig>,
}

/// Church identity block
#[derive(Debug, Clone, Deserialize)]
pub struct ChurchConfig {
    /// Church name
    pub name: String,
    /// Postal address, printed under the name
    #[serde(default)]
    pub address: Option<String>,
    /// Charity or tax registration number
    #[serde(default)]
    pub tax_id: Option<String>,
    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

impl Default for ChurchConfig {
    fn default() -> Self {
        Self {
            name: "Our Church".to_string(),
            address: None,
            tax_id: None,
            currency_symbol: default_currency(),
        }
    }
}

fn default_currency() -> String {
    "$".to_string()
}

/// Report defaults
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportConfig {
    /// Trailing window, in months, used when the caller does not pick one
    #[serde(default = "default_window_months")]
    pub default_window_months: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_window_months: default_window_months(),
        }
    }
}

const fn default_window_months() -> u32 {
    6
}

/// A category to seed
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    debug!("Attempting to load settings from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_settings(&contents)
}

/// Parses settings from TOML text.
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if settings.reports.default_window_months == 0 {
        return Err(Error::Config {
            message: "reports.default_window_months must be at least 1".to_string(),
        });
    }

    Ok(settings)
}

/// Loads `config.toml` from the working directory, falling back to defaults
/// when the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new("config.toml");
    if path.exists() {
        load_settings(path)
    } else {
        debug!("config.toml not found, using default settings");
        Ok(Settings::default())
    }
}
