//! Dashboard snapshot reports in JSON and Markdown

use crate::aggregator::{CategoryCounts, Heatmap, LevelCounts, StatusCounts};
use crate::config::ReportFormat;
use crate::error::RiskResult;
use crate::metrics::{metric_names, METRICS};
use crate::model::{Category, Rating, Risk, RiskLevel, RiskMetric};
use crate::service::RiskDataService;
use crate::trends::TrendPoint;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Every dashboard aggregation for one session, frozen at build time
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub total_risks: usize,
    pub overall_score: u32,
    pub overall_level: RiskLevel,
    pub risks_by_category: CategoryCounts,
    pub risks_by_status: StatusCounts,
    pub risks_by_level: LevelCounts,
    pub heatmap: Heatmap,
    pub metrics: Vec<RiskMetric>,
    pub recent_risks: Vec<Risk>,
    pub trends: &'static [TrendPoint],
}

impl DashboardReport {
    pub fn build(service: &RiskDataService, recent_count: usize) -> Self {
        let report = Self {
            generated_at: Utc::now(),
            seed: service.seed(),
            total_risks: service.risks().len(),
            overall_score: service.overall_risk_score(),
            overall_level: service.overall_risk_level(),
            risks_by_category: service.risks_by_category(),
            risks_by_status: service.risks_by_status(),
            risks_by_level: service.risks_by_level(),
            heatmap: service.heatmap(),
            metrics: service.risk_metrics().to_vec(),
            recent_risks: service.recent_risks(recent_count),
            trends: service.risk_trend_data(),
        };
        METRICS.inc(metric_names::REPORTS_BUILT);
        info!(
            "Dashboard report built: {} risks, overall score {} ({})",
            report.total_risks, report.overall_score, report.overall_level
        );
        report
    }

    pub fn to_json(&self) -> RiskResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str("# Risk Dashboard Report\n\n");
        md.push_str(&format!(
            "- **Generated:** {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if let Some(seed) = self.seed {
            md.push_str(&format!("- **Seed:** {}\n", seed));
        }
        md.push_str(&format!("- **Total Risks:** {}\n", self.total_risks));
        md.push_str(&format!(
            "- **Overall Risk Score:** {} ({})\n\n",
            self.overall_score, self.overall_level
        ));

        md.push_str("## Risks by Category\n\n");
        md.push_str("| Category | Count |\n");
        md.push_str("|----------|-------|\n");
        for (category, count) in &self.risks_by_category {
            md.push_str(&format!("| {} | {} |\n", category, count));
        }
        md.push('\n');

        md.push_str("## Risks by Status\n\n");
        md.push_str("| Status | Count |\n");
        md.push_str("|--------|-------|\n");
        for (status, count) in &self.risks_by_status {
            md.push_str(&format!("| {} | {} |\n", status, count));
        }
        md.push('\n');

        md.push_str("## Risk Levels\n\n");
        md.push_str("| Level | Count |\n");
        md.push_str("|-------|-------|\n");
        for (level, count) in &self.risks_by_level {
            md.push_str(&format!("| {} | {} |\n", level, count));
        }
        md.push('\n');

        md.push_str("## Category Metrics\n\n");
        md.push_str("| Category | Score | Previous | Change | Trend |\n");
        md.push_str("|----------|-------|----------|--------|-------|\n");
        for metric in &self.metrics {
            md.push_str(&format!(
                "| {} | {} | {} | {:+} | {} |\n",
                metric.category, metric.score, metric.previous_score, metric.change, metric.trend
            ));
        }
        md.push('\n');

        md.push_str("## Heatmap (likelihood × impact)\n\n");
        md.push_str("| Likelihood \\ Impact |");
        for impact in Rating::MIN..=Rating::MAX {
            md.push_str(&format!(" {} |", impact));
        }
        md.push_str("\n|---|");
        for _ in Rating::MIN..=Rating::MAX {
            md.push_str("---|");
        }
        md.push('\n');
        // Highest likelihood on top, as on a risk matrix
        for (index, row) in self.heatmap.rows().iter().enumerate().rev() {
            md.push_str(&format!("| **{}** |", index + 1));
            for cell in row {
                md.push_str(&format!(" {} |", cell));
            }
            md.push('\n');
        }
        md.push('\n');

        md.push_str("## Recent Risks\n\n");
        if self.recent_risks.is_empty() {
            md.push_str("_No risks recorded._\n\n");
        } else {
            md.push_str("| ID | Name | Category | Score | Level | Status | Identified | Owner |\n");
            md.push_str("|----|------|----------|-------|-------|--------|------------|-------|\n");
            for risk in &self.recent_risks {
                md.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} | {} |\n",
                    risk.id(),
                    risk.name(),
                    risk.category(),
                    risk.risk_score(),
                    risk.level(),
                    risk.status(),
                    risk.date_identified(),
                    risk.owner()
                ));
            }
            md.push('\n');
        }

        md.push_str("## Twelve-Month Trend\n\n");
        md.push_str("| Month |");
        for category in Category::ALL {
            md.push_str(&format!(" {} |", category));
        }
        md.push_str("\n|-------|");
        for _ in Category::ALL {
            md.push_str("---|");
        }
        md.push('\n');
        for point in self.trends {
            md.push_str(&format!("| {} |", point.month));
            for category in Category::ALL {
                md.push_str(&format!(" {} |", point.value(category)));
            }
            md.push('\n');
        }

        md
    }

    pub fn render(&self, format: ReportFormat) -> RiskResult<String> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Markdown => Ok(self.to_markdown()),
        }
    }
}

/// Writes rendered reports to disk
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportWriter {
    pub format: ReportFormat,
}

impl ReportWriter {
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// `dashboard.json` or `dashboard.md`
    pub fn default_file_name(&self) -> String {
        format!("dashboard.{}", self.format.extension())
    }

    /// An existing directory receives the default file name
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_dir() {
            path.join(self.default_file_name())
        } else {
            path.to_path_buf()
        }
    }

    /// Render and write the report, returning the file actually written
    pub fn write(&self, report: &DashboardReport, path: &Path) -> RiskResult<PathBuf> {
        let content = report.render(self.format)?;
        let output_path = self.resolve_path(path);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&output_path, content)?;
        info!("Report written to {}", output_path.display());
        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use chrono::NaiveDate;

    fn service() -> RiskDataService {
        RiskDataService::generate(GeneratorConfig {
            seed: Some(99),
            reference_date: NaiveDate::from_ymd_opt(2026, 10, 18),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_report_matches_service() {
        let service = service();
        let report = DashboardReport::build(&service, 5);
        assert_eq!(report.total_risks, 25);
        assert_eq!(report.overall_score, service.overall_risk_score());
        assert_eq!(report.recent_risks, service.recent_risks(5));
        assert_eq!(report.heatmap.total(), 25);
        assert_eq!(report.seed, Some(99));
    }

    #[test]
    fn test_json_shape() {
        let report = DashboardReport::build(&service(), 3);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        let categories: Vec<_> = value["risksByCategory"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(categories.len(), 4);
        assert_eq!(value["recentRisks"].as_array().unwrap().len(), 3);
        assert_eq!(value["heatmap"].as_array().unwrap().len(), 5);
        assert_eq!(value["trends"].as_array().unwrap().len(), 12);
        assert!(value["overallLevel"].is_string());
    }

    #[test]
    fn test_markdown_sections() {
        let report = DashboardReport::build(&service(), 5);
        let md = report.to_markdown();
        assert!(md.starts_with("# Risk Dashboard Report"));
        for heading in [
            "## Risks by Category",
            "## Risks by Status",
            "## Category Metrics",
            "## Heatmap",
            "## Recent Risks",
            "## Twelve-Month Trend",
        ] {
            assert!(md.contains(heading), "missing {}", heading);
        }
        assert!(md.contains(report.recent_risks[0].id()));
        assert!(md.contains("| Dec | 65 | 65 | 60 | 70 |"));
    }

    #[test]
    fn test_writer_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("risk-report-{}", std::process::id()));
        let path = dir.join("nested").join("report.json");

        let report = DashboardReport::build(&service(), 5);
        ReportWriter::new(ReportFormat::Json)
            .write(&report, &path)
            .unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"totalRisks\": 25"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_directory_output_gets_default_name() {
        let dir = std::env::temp_dir().join(format!("risk-report-dir-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let report = DashboardReport::build(&service(), 5);
        let markdown = ReportWriter::new(ReportFormat::Markdown)
            .write(&report, &dir)
            .unwrap();
        let json = ReportWriter::new(ReportFormat::Json)
            .write(&report, &dir)
            .unwrap();

        assert_eq!(markdown, dir.join("dashboard.md"));
        assert_eq!(json, dir.join("dashboard.json"));
        assert!(fs::read_to_string(&markdown).unwrap().starts_with('#'));
        fs::remove_dir_all(&dir).unwrap();
    }
}
