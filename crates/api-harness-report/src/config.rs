//! Report settings and file naming.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::ReportError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Standard,
    Dark,
}

/// Settings for one report session.
///
/// Every field has a default, so a TOML file only lists what it changes:
///
/// ```
/// use api_harness_report::ReportConfig;
///
/// let config = ReportConfig::from_toml_str(r#"
///     report_name = "Charges API"
///     output_dir = "target/reports"
/// "#).unwrap();
/// assert_eq!(config.report_name, "Charges API");
/// assert_eq!(config.document_title, "QA Automation API Report");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub report_name: String,
    pub document_title: String,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub extension: String,
    pub theme: Theme,
    pub encoding: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_name: "QA Automation API Report".to_string(),
            document_title: "QA Automation API Report".to_string(),
            output_dir: PathBuf::from("extent.reports"),
            file_prefix: "QA_Automation_Extent_Report_".to_string(),
            extension: "json".to_string(),
            theme: Theme::Standard,
            encoding: "UTF-8".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ReportError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// File name for a report started at `timestamp`.
    pub fn file_name(&self, timestamp: &NaiveDateTime) -> String {
        report_file_name(&self.file_prefix, timestamp, &self.extension)
    }
}

/// `<prefix>yyyy_MM_dd_HH_mm_ss.<extension>`
///
/// ```
/// use api_harness_report::report_file_name;
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap().and_hms_opt(9, 5, 0).unwrap();
/// assert_eq!(
///     report_file_name("QA_Automation_Extent_Report_", &at, "html"),
///     "QA_Automation_Extent_Report_2024_03_07_09_05_00.html"
/// );
/// ```
pub fn report_file_name(prefix: &str, timestamp: &NaiveDateTime, extension: &str) -> String {
    format!("{prefix}{}.{extension}", timestamp.format("%Y_%m_%d_%H_%M_%S"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(ReportConfig::from_toml_str("").unwrap(), ReportConfig::default());
    }

    #[test]
    fn test_theme_parses_lowercase() {
        let config = ReportConfig::from_toml_str("theme = \"dark\"").unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert!(ReportConfig::from_toml_str("theme = \"neon\"").is_err());
    }

    #[test]
    fn test_unknown_type_is_config_error() {
        let err = ReportConfig::from_toml_str("output_dir = 5").unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }
}
