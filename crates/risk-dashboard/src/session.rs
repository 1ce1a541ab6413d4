//! Per-run session setup: configuration layering and the data service

use anyhow::{Context, Result};
use risk_core::assessment::{AnalysisDetails, RiskBasics};
use risk_core::{
    AssessmentOutcome, AssessmentWorkflow, Category, DashboardConfig, Rating, RiskDataService,
};
use std::path::Path;
use tracing::{debug, info};

/// Command-line values that take precedence over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub records: Option<usize>,
}

/// Load the config file when one is given, then apply CLI overrides
pub fn resolve_config(path: Option<&Path>, overrides: &Overrides) -> Result<DashboardConfig> {
    let mut config = match path {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            DashboardConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => DashboardConfig::default(),
    };

    if let Some(seed) = overrides.seed {
        config.generator.seed = Some(seed);
    }
    if let Some(records) = overrides.records {
        config.generator.record_count = records;
    }
    config.generator.validate()?;
    debug!("Effective configuration: {:?}", config);
    Ok(config)
}

pub fn open_session(config: &DashboardConfig) -> Result<RiskDataService> {
    RiskDataService::generate(config.generator.clone())
        .context("failed to generate the risk register")
}

/// Fields collected by the `assess` command
#[derive(Debug, Clone)]
pub struct AssessmentInput {
    pub name: String,
    pub category: Category,
    pub owner: String,
    pub description: String,
    pub likelihood: u8,
    pub impact: u8,
    pub controls: String,
    pub context: String,
}

/// Drive a fresh workflow from basics to the scored result
pub fn run_assessment(input: AssessmentInput) -> Result<AssessmentOutcome> {
    let basics = RiskBasics {
        name: input.name,
        category: input.category,
        owner: input.owner,
        description: input.description,
    };
    let details = AnalysisDetails {
        likelihood: Rating::new(input.likelihood).context("invalid likelihood")?,
        impact: Rating::new(input.impact).context("invalid impact")?,
        current_controls: input.controls,
        additional_context: input.context,
    };

    let mut workflow = AssessmentWorkflow::new();
    let outcome = workflow.run(basics, details)?;
    Ok(outcome.clone())
}

/// clap value parser for category names
pub fn parse_category(value: &str) -> std::result::Result<Category, String> {
    Category::parse(value).ok_or_else(|| {
        let names: Vec<_> = Category::ALL.iter().map(|c| c.label()).collect();
        format!("unknown category '{}' (expected one of {})", value, names.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use risk_core::RiskLevel;

    fn input(likelihood: u8, impact: u8) -> AssessmentInput {
        AssessmentInput {
            name: "IT System Failure".to_string(),
            category: Category::Operational,
            owner: "Robert Wilson".to_string(),
            description: String::new(),
            likelihood,
            impact,
            controls: "Nightly backups".to_string(),
            context: String::new(),
        }
    }

    #[test]
    fn test_overrides_apply_without_file() {
        let config = resolve_config(
            None,
            &Overrides {
                seed: Some(5),
                records: Some(40),
            },
        )
        .unwrap();
        assert_eq!(config.generator.seed, Some(5));
        assert_eq!(config.generator.record_count, 40);
        assert_eq!(config.recent_count, 5);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let err = resolve_config(Some(Path::new("/nonexistent/risk.toml")), &Overrides::default())
            .unwrap_err();
        assert!(err.to_string().contains("failed to load config"));
    }

    #[test]
    fn test_session_uses_seed() {
        let config = resolve_config(
            None,
            &Overrides {
                seed: Some(77),
                records: None,
            },
        )
        .unwrap();
        let service = open_session(&config).unwrap();
        assert_eq!(service.seed(), Some(77));
        assert_eq!(service.risks().len(), 25);
    }

    #[test]
    fn test_run_assessment() {
        let outcome = run_assessment(input(3, 3)).unwrap();
        assert_eq!(outcome.risk_score, 9);
        assert_eq!(outcome.level, RiskLevel::Medium);

        assert!(run_assessment(input(0, 3)).is_err());
        let mut blank = input(2, 2);
        blank.owner = "  ".to_string();
        assert!(run_assessment(blank).is_err());
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(parse_category("strategic"), Ok(Category::Strategic));
        let err = parse_category("Reputational").unwrap_err();
        assert!(err.contains("Financial, Operational, Compliance, Strategic"));
    }
}
