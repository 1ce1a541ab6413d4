//! Integration Tests
//!
//! These tests run the aggregation layer end to end: a known register loaded
//! from the fixture file, seeded sessions, the assessment workflow and
//! report output.

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use risk_core::aggregator;
use risk_core::assessment::{AnalysisDetails, RiskBasics};
use risk_core::{
    AssessmentEvent, AssessmentWorkflow, Category, Conversation, DashboardConfig, DashboardReport,
    Rating, ReportFormat, ReportWriter, Risk, RiskDataService, RiskError,
    RiskLevel, RiskRegister, RiskStatus,
};
use std::fs;
use std::path::{Path, PathBuf};

fn fixture_register() -> RiskRegister {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/register.json");
    let content = fs::read_to_string(&path).expect("Should read register fixture");
    let risks: Vec<Risk> = serde_json::from_str(&content).expect("Fixture should be valid");
    RiskRegister::new(risks)
}

fn scratch_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("risk-core-{}-{}", name, std::process::id()))
}

#[test]
fn test_fixture_counts() {
    let register = fixture_register();
    assert_eq!(register.len(), 5);

    let by_category = aggregator::count_by_category(&register);
    assert_eq!(
        by_category.values().copied().collect::<Vec<_>>(),
        vec![2, 2, 1, 0]
    );

    let by_status = aggregator::count_by_status(&register);
    assert_eq!(by_status[&RiskStatus::Active], 3);
    assert_eq!(by_status[&RiskStatus::Mitigated], 1);
    assert_eq!(by_status[&RiskStatus::Monitoring], 1);

    let levels = aggregator::level_distribution(&register);
    assert_eq!(levels[&RiskLevel::Low], 1);
    assert_eq!(levels[&RiskLevel::Medium], 2);
    assert_eq!(levels[&RiskLevel::High], 2);
}

#[test]
fn test_fixture_heatmap() {
    let map = aggregator::heatmap(&fixture_register());
    let rating = |v| Rating::new(v).unwrap();

    assert_eq!(map.total(), 5);
    assert_eq!(map.get(rating(4), rating(4)), 1);
    assert_eq!(map.get(rating(5), rating(4)), 1);
    assert_eq!(map.get(rating(2), rating(5)), 1);
    assert_eq!(map.get(rating(1), rating(3)), 1);
    assert_eq!(map.get(rating(3), rating(3)), 1);
    assert_eq!(map.get(rating(5), rating(5)), 0);
}

#[test]
fn test_fixture_category_metrics() {
    let register = fixture_register();
    // Financial (16 + 3) / 2 = 9.5 and Operational (20 + 9) / 2 = 14.5 round up
    let scores = aggregator::category_scores(&register);
    assert_eq!(
        scores,
        vec![
            (Category::Financial, 10),
            (Category::Operational, 15),
            (Category::Compliance, 10),
            (Category::Strategic, 0),
        ]
    );

    let mut rng = StdRng::seed_from_u64(1);
    let service = RiskDataService::new(register, &mut rng);
    assert_eq!(service.overall_risk_score(), 9);
    assert_eq!(service.overall_risk_level(), RiskLevel::Medium);
}

#[test]
fn test_fixture_recent_risks() {
    let register = fixture_register();
    let recent = aggregator::recent_risks(&register, 3);
    let ids: Vec<_> = recent.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec!["RISK-2023-005", "RISK-2023-002", "RISK-2023-003"]);
}

#[test]
fn test_fixture_descriptions() {
    let register = fixture_register();
    assert_eq!(
        register.find("RISK-2023-001").unwrap().description(),
        "This is a financial risk related to currency exchange fluctuation."
    );
    assert_eq!(
        register.find("RISK-2023-003").unwrap().description(),
        "Customer records held beyond the retention period."
    );
    assert!(register.find("RISK-2023-002").unwrap().mitigation_plan().is_none());
}

#[test]
fn test_drifted_score_is_rejected() {
    let json = r#"{
        "id": "RISK-2023-009",
        "name": "IT System Failure",
        "category": "Operational",
        "likelihood": 3,
        "impact": 4,
        "riskScore": 13,
        "status": "Active",
        "dateIdentified": "2023-12-01",
        "owner": "Robert Wilson",
        "trend": "stable"
    }"#;
    let err = serde_json::from_str::<Risk>(json).unwrap_err();
    assert!(err.to_string().contains("Risk score mismatch"));

    let out_of_range = json.replace("\"impact\": 4", "\"impact\": 6");
    assert!(serde_json::from_str::<Risk>(&out_of_range).is_err());
}

#[test]
fn test_seeded_session_end_to_end() {
    let config = DashboardConfig::builder()
        .seed(2024)
        .reference_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
        .build()
        .unwrap();

    let service = RiskDataService::generate(config.generator.clone()).unwrap();
    let again = RiskDataService::generate(config.generator).unwrap();

    assert_eq!(service.risks(), again.risks());
    assert_eq!(service.risk_metrics(), again.risk_metrics());
    assert_eq!(service.overall_risk_score(), again.overall_risk_score());
    assert_eq!(service.risks().len(), 25);
    assert_eq!(service.risks()[24].id(), "RISK-2026-025");

    let recent = service.recent_risks(config.recent_count);
    assert_eq!(recent.len(), 5);
    assert!(recent
        .windows(2)
        .all(|w| w[0].date_identified() >= w[1].date_identified()));
}

#[test]
fn test_assessment_workflow_end_to_end() {
    let mut workflow = AssessmentWorkflow::new();
    let basics = RiskBasics {
        name: "Regulatory Change Impact".to_string(),
        category: Category::Compliance,
        owner: "Compliance Office".to_string(),
        description: "New reporting rules take effect next year".to_string(),
    };
    let details = AnalysisDetails {
        likelihood: Rating::new(4).unwrap(),
        impact: Rating::new(4).unwrap(),
        current_controls: "Quarterly regulatory review".to_string(),
        additional_context: String::new(),
    };

    // Submitting before the basics are entered is rejected
    let err = workflow
        .fire(AssessmentEvent::Submit(details.clone()))
        .unwrap_err();
    assert!(matches!(err, RiskError::InvalidTransition { .. }));
    assert_eq!(workflow.state().step(), 1);

    let outcome = workflow.run(basics, details).unwrap();
    assert_eq!(outcome.risk_score, 16);
    assert_eq!(outcome.level, RiskLevel::High);
    assert!(outcome
        .summary
        .starts_with("This compliance risk has been classified as High (Risk Score: 16/25)"));

    workflow.fire(AssessmentEvent::Restart).unwrap();
    assert_eq!(workflow.state().step(), 1);
    assert!(workflow.outcome().is_none());
}

#[test]
fn test_assistant_conversation() {
    let mut conversation = Conversation::new();
    conversation.send("What are the top risks in my organization?");
    conversation.send("thanks");

    let messages = conversation.messages();
    assert_eq!(messages.len(), 5);
    assert!(messages[2].content.contains("Supply Chain Disruption"));
    assert!(messages[4].content.contains("\"thanks\""));
}

#[test]
fn test_report_files() {
    let dir = scratch_dir("reports");
    let mut rng = StdRng::seed_from_u64(3);
    let service = RiskDataService::new(fixture_register(), &mut rng);
    let report = DashboardReport::build(&service, 5);

    let json_path = dir.join("out").join("dashboard.json");
    let md_path = dir.join("out").join("dashboard.md");
    ReportWriter::new(ReportFormat::Json)
        .write(&report, &json_path)
        .unwrap();
    ReportWriter::new(ReportFormat::Markdown)
        .write(&report, &md_path)
        .unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["totalRisks"], 5);
    assert_eq!(json["risksByCategory"]["Strategic"], 0);
    assert_eq!(json["recentRisks"][0]["id"], "RISK-2023-005");
    assert!(json.get("seed").is_none());

    let markdown = fs::read_to_string(&md_path).unwrap();
    assert!(markdown.contains("| Strategic | 0 |"));
    assert!(markdown.contains("RISK-2023-005"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_config_file_round_trip() {
    let dir = scratch_dir("config");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("risk.toml");

    let config = DashboardConfig::builder()
        .record_count(40)
        .seed(11)
        .report_format(ReportFormat::Json)
        .build()
        .unwrap();
    config.save(&path).unwrap();

    let loaded = DashboardConfig::load(&path).unwrap();
    assert_eq!(loaded, config);

    fs::write(&path, "[generator]\nwindow_days = 0\n").unwrap();
    assert!(matches!(
        DashboardConfig::load(&path),
        Err(RiskError::ConfigInvalid(_))
    ));

    fs::remove_dir_all(&dir).unwrap();
    assert!(matches!(
        DashboardConfig::load(&dir.join("absent.toml")),
        Err(RiskError::ConfigIo(_))
    ));
}

#[test]
fn test_oversized_window_fails_before_generation() {
    let config = risk_core::GeneratorConfig {
        window_days: u32::MAX,
        seed: Some(1),
        ..Default::default()
    };
    assert!(matches!(
        RiskDataService::generate(config),
        Err(RiskError::ConfigInvalid(_))
    ));
}
