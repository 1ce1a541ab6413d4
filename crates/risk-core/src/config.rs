//! Configuration for register generation and dashboard output
//!
//! Loaded from TOML; every field has a default so partial files work.

use crate::error::{RiskError, RiskResult};
use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Widest identification window accepted, about a century
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// Settings that shape the generated register
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of records in the register
    #[serde(default = "default_record_count")]
    pub record_count: usize,

    /// Records are dated within this many days before the reference date
    #[serde(default = "default_window_days")]
    pub window_days: u32,

    /// Chance that a record carries a mitigation plan (0.0-1.0)
    #[serde(default = "default_mitigation_probability")]
    pub mitigation_probability: f64,

    /// Fixed seed; a fresh one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// "Today" for dating records; the current UTC date when absent
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,
}

fn default_record_count() -> usize {
    25
}
fn default_window_days() -> u32 {
    90
}
fn default_mitigation_probability() -> f64 {
    0.7
}
fn default_recent_count() -> usize {
    5
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            record_count: default_record_count(),
            window_days: default_window_days(),
            mitigation_probability: default_mitigation_probability(),
            seed: None,
            reference_date: None,
        }
    }
}

impl GeneratorConfig {
    pub fn reference_date(&self) -> NaiveDate {
        self.reference_date
            .unwrap_or_else(|| Utc::now().date_naive())
    }

    pub fn validate(&self) -> RiskResult<()> {
        if self.window_days == 0 {
            return Err(RiskError::ConfigInvalid(
                "window_days must be at least 1".to_string(),
            ));
        }
        if self.window_days > MAX_WINDOW_DAYS {
            return Err(RiskError::ConfigInvalid(format!(
                "window_days must be at most {}, got {}",
                MAX_WINDOW_DAYS, self.window_days
            )));
        }
        let reference = self.reference_date();
        if reference
            .checked_sub_signed(Duration::days(i64::from(self.window_days)))
            .is_none()
        {
            return Err(RiskError::ConfigInvalid(format!(
                "a {}-day window before {} falls outside the supported date range",
                self.window_days, reference
            )));
        }
        if !(0.0..=1.0).contains(&self.mitigation_probability) {
            return Err(RiskError::ConfigInvalid(format!(
                "mitigation_probability must be within 0.0-1.0, got {}",
                self.mitigation_probability
            )));
        }
        Ok(())
    }
}

/// Output format for dashboard reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    #[default]
    Markdown,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Markdown => "md",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Entries shown in the recent-risks list
    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    #[serde(default)]
    pub report_format: ReportFormat,

    #[serde(default)]
    pub generator: GeneratorConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_count: default_recent_count(),
            report_format: ReportFormat::default(),
            generator: GeneratorConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> RiskResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| RiskError::ConfigIo(e.to_string()))?;
        let config: Self =
            toml::from_str(&content).map_err(|e| RiskError::ConfigParse(e.to_string()))?;
        config.generator.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> RiskResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| RiskError::ConfigSerialize(e.to_string()))?;
        fs::write(path, content).map_err(|e| RiskError::ConfigIo(e.to_string()))
    }

    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder pattern for configuration
#[derive(Default)]
pub struct ConfigBuilder {
    config: DashboardConfig,
}

impl ConfigBuilder {
    pub fn record_count(mut self, count: usize) -> Self {
        self.config.generator.record_count = count;
        self
    }

    pub fn window_days(mut self, days: u32) -> Self {
        self.config.generator.window_days = days;
        self
    }

    pub fn mitigation_probability(mut self, probability: f64) -> Self {
        self.config.generator.mitigation_probability = probability;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.generator.seed = Some(seed);
        self
    }

    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.config.generator.reference_date = Some(date);
        self
    }

    pub fn recent_count(mut self, count: usize) -> Self {
        self.config.recent_count = count;
        self
    }

    pub fn report_format(mut self, format: ReportFormat) -> Self {
        self.config.report_format = format;
        self
    }

    pub fn build(self) -> RiskResult<DashboardConfig> {
        self.config.generator.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.generator.record_count, 25);
        assert_eq!(config.generator.window_days, 90);
        assert_eq!(config.recent_count, 5);
        assert_eq!(config.report_format, ReportFormat::Markdown);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DashboardConfig = toml::from_str(
            r#"
            [generator]
            seed = 42
            reference_date = "2026-10-18"
            "#,
        )
        .unwrap();
        assert_eq!(config.generator.seed, Some(42));
        assert_eq!(config.generator.record_count, 25);
        assert_eq!(config.recent_count, 5);
        assert_eq!(
            config.generator.reference_date(),
            NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
        );
    }

    #[test]
    fn test_builder_validation() {
        assert!(DashboardConfig::builder().window_days(0).build().is_err());
        assert!(DashboardConfig::builder()
            .mitigation_probability(1.5)
            .build()
            .is_err());

        let config = DashboardConfig::builder()
            .seed(7)
            .recent_count(3)
            .report_format(ReportFormat::Json)
            .build()
            .unwrap();
        assert_eq!(config.generator.seed, Some(7));
        assert_eq!(config.recent_count, 3);
    }

    #[test]
    fn test_window_bounds() {
        let oversized = GeneratorConfig {
            window_days: u32::MAX,
            seed: Some(1),
            ..Default::default()
        };
        assert!(matches!(
            oversized.validate(),
            Err(RiskError::ConfigInvalid(_))
        ));
        assert!(DashboardConfig::builder()
            .window_days(MAX_WINDOW_DAYS + 1)
            .build()
            .is_err());
        assert!(DashboardConfig::builder()
            .window_days(MAX_WINDOW_DAYS)
            .build()
            .is_ok());

        let near_min = GeneratorConfig {
            window_days: 30,
            reference_date: NaiveDate::MIN.checked_add_signed(Duration::days(10)),
            ..Default::default()
        };
        assert!(near_min.validate().is_err());
    }

    #[test]
    fn test_load_rejects_oversized_window() {
        let path = std::env::temp_dir().join(format!(
            "risk-core-window-{}.toml",
            std::process::id()
        ));
        fs::write(&path, "[generator]\nwindow_days = 4000000000\nseed = 1\n").unwrap();
        let result = DashboardConfig::load(&path);
        fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(RiskError::ConfigInvalid(_))));
    }

    #[test]
    fn test_report_format_parse() {
        assert_eq!(ReportFormat::parse("JSON"), Some(ReportFormat::Json));
        assert_eq!(ReportFormat::parse("md"), Some(ReportFormat::Markdown));
        assert_eq!(ReportFormat::parse("pdf"), None);
    }
}
