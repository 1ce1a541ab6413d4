//! Risk register data model
//!
//! Records are immutable once built: the risk score is derived from the
//! likelihood and impact ratings at construction and the fields are private,
//! so the product can never drift from its inputs.

use crate::error::{RiskError, RiskResult};
use chrono::NaiveDate;
use rand::Rng;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// Risk category, in dashboard order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Financial,
    Operational,
    Compliance,
    Strategic,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Financial,
        Category::Operational,
        Category::Compliance,
        Category::Strategic,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Category::Financial => "Financial",
            Category::Operational => "Operational",
            Category::Compliance => "Compliance",
            Category::Strategic => "Strategic",
        }
    }

    /// Parse a category name case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(value.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle status of a risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskStatus {
    Active,
    Mitigated,
    Monitoring,
}

impl RiskStatus {
    pub const ALL: [RiskStatus; 3] = [
        RiskStatus::Active,
        RiskStatus::Mitigated,
        RiskStatus::Monitoring,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskStatus::Active => "Active",
            RiskStatus::Mitigated => "Mitigated",
            RiskStatus::Monitoring => "Monitoring",
        }
    }
}

impl fmt::Display for RiskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction a risk or metric is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Stable,
    Decreasing,
}

impl Trend {
    pub const ALL: [Trend; 3] = [Trend::Increasing, Trend::Stable, Trend::Decreasing];

    /// Changes strictly beyond this band are a trend, anything inside is stable
    pub const THRESHOLD: i32 = 3;

    pub fn from_change(change: i32) -> Self {
        if change > Self::THRESHOLD {
            Trend::Increasing
        } else if change < -Self::THRESHOLD {
            Trend::Decreasing
        } else {
            Trend::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Stable => "stable",
            Trend::Decreasing => "decreasing",
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Likelihood or impact rating on the 1-5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> RiskResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RiskError::RatingOutOfRange { value })
        }
    }

    /// Uniform draw over the 1-5 scale
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.gen_range(Self::MIN..=Self::MAX))
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Zero-based position on the heatmap axis
    pub fn index(&self) -> usize {
        (self.0 - Self::MIN) as usize
    }
}

impl TryFrom<u8> for Rating {
    type Error = RiskError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Severity band used to colour-code scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High];

    /// Lowest score classified as Medium
    pub const MEDIUM_FROM: u32 = 9;
    /// Lowest score classified as High
    pub const HIGH_FROM: u32 = 16;

    pub fn from_score(score: u32) -> Self {
        if score < Self::MEDIUM_FROM {
            RiskLevel::Low
        } else if score < Self::HIGH_FROM {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "green",
            RiskLevel::Medium => "yellow",
            RiskLevel::High => "red",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inputs for building a [`Risk`]
#[derive(Debug, Clone)]
pub struct RiskDraft {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub likelihood: Rating,
    pub impact: Rating,
    pub status: RiskStatus,
    pub date_identified: NaiveDate,
    pub owner: String,
    pub mitigation_plan: Option<String>,
    pub trend: Trend,
}

/// A single risk record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RiskRecord")]
pub struct Risk {
    id: String,
    name: String,
    category: Category,
    description: String,
    likelihood: Rating,
    impact: Rating,
    risk_score: u8,
    status: RiskStatus,
    date_identified: NaiveDate,
    owner: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    mitigation_plan: Option<String>,
    trend: Trend,
}

impl Risk {
    pub fn new(draft: RiskDraft) -> Self {
        let description = format!(
            "This is a {} risk related to {}.",
            draft.category.label().to_lowercase(),
            draft.name.to_lowercase()
        );
        Self {
            risk_score: draft.likelihood.value() * draft.impact.value(),
            description,
            id: draft.id,
            name: draft.name,
            category: draft.category,
            likelihood: draft.likelihood,
            impact: draft.impact,
            status: draft.status,
            date_identified: draft.date_identified,
            owner: draft.owner,
            mitigation_plan: draft.mitigation_plan,
            trend: draft.trend,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn likelihood(&self) -> Rating {
        self.likelihood
    }

    pub fn impact(&self) -> Rating {
        self.impact
    }

    /// `likelihood × impact`, always in 1..=25
    pub fn risk_score(&self) -> u8 {
        self.risk_score
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.risk_score as u32)
    }

    pub fn status(&self) -> RiskStatus {
        self.status
    }

    pub fn date_identified(&self) -> NaiveDate {
        self.date_identified
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn mitigation_plan(&self) -> Option<&str> {
        self.mitigation_plan.as_deref()
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }
}

/// Wire form of a risk, checked before it becomes a [`Risk`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RiskRecord {
    id: String,
    name: String,
    category: Category,
    #[serde(default)]
    description: Option<String>,
    likelihood: Rating,
    impact: Rating,
    risk_score: u8,
    status: RiskStatus,
    date_identified: NaiveDate,
    owner: String,
    #[serde(default)]
    mitigation_plan: Option<String>,
    trend: Trend,
}

impl TryFrom<RiskRecord> for Risk {
    type Error = RiskError;

    fn try_from(record: RiskRecord) -> Result<Self, Self::Error> {
        if record.likelihood.value() * record.impact.value() != record.risk_score {
            return Err(RiskError::ScoreMismatch {
                id: record.id,
                likelihood: record.likelihood.value(),
                impact: record.impact.value(),
                score: record.risk_score,
            });
        }

        let mut risk = Risk::new(RiskDraft {
            id: record.id,
            name: record.name,
            category: record.category,
            likelihood: record.likelihood,
            impact: record.impact,
            status: record.status,
            date_identified: record.date_identified,
            owner: record.owner,
            mitigation_plan: record.mitigation_plan,
            trend: record.trend,
        });
        if let Some(description) = record.description {
            risk.description = description;
        }
        Ok(risk)
    }
}

/// Per-category score with a trend against a baseline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskMetric {
    pub category: Category,
    pub score: u32,
    pub previous_score: u32,
    pub change: i32,
    pub trend: Trend,
}

impl RiskMetric {
    pub fn new(category: Category, score: u32, previous_score: u32) -> Self {
        let change = score as i32 - previous_score as i32;
        Self {
            category,
            score,
            previous_score,
            change,
            trend: Trend::from_change(change),
        }
    }

    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score)
    }
}

/// Fixed-size, read-only collection of risks.
///
/// Clones share the same backing storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskRegister {
    risks: Arc<[Risk]>,
}

impl RiskRegister {
    pub fn new(risks: Vec<Risk>) -> Self {
        Self {
            risks: risks.into(),
        }
    }

    pub fn as_slice(&self) -> &[Risk] {
        &self.risks
    }

    pub fn find(&self, id: &str) -> Option<&Risk> {
        self.risks.iter().find(|r| r.id() == id)
    }
}

impl From<Vec<Risk>> for RiskRegister {
    fn from(risks: Vec<Risk>) -> Self {
        Self::new(risks)
    }
}

impl Deref for RiskRegister {
    type Target = [Risk];

    fn deref(&self) -> &Self::Target {
        &self.risks
    }
}

impl Serialize for RiskRegister {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.risks.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rating(v: u8) -> Rating {
        Rating::new(v).unwrap()
    }

    fn sample(likelihood: u8, impact: u8) -> Risk {
        Risk::new(RiskDraft {
            id: "RISK-2026-001".to_string(),
            name: "Liquidity Shortage".to_string(),
            category: Category::Financial,
            likelihood: rating(likelihood),
            impact: rating(impact),
            status: RiskStatus::Active,
            date_identified: NaiveDate::from_ymd_opt(2026, 10, 1).unwrap(),
            owner: "Sarah Johnson".to_string(),
            mitigation_plan: None,
            trend: Trend::Stable,
        })
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(1).unwrap().index(), 0);
        assert_eq!(Rating::new(5).unwrap().index(), 4);
    }

    #[test]
    fn test_random_rating_covers_scale() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(8);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let rating = Rating::random(&mut rng);
            assert!(Rating::new(rating.value()).is_ok());
            seen[rating.index()] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn test_score_is_product() {
        let risk = sample(4, 3);
        assert_eq!(risk.risk_score(), 12);
        assert_eq!(risk.level(), RiskLevel::Medium);
        assert_eq!(
            risk.description(),
            "This is a financial risk related to liquidity shortage."
        );
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(RiskLevel::from_score(8), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(9), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(15), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(16), RiskLevel::High);
    }

    #[test]
    fn test_trend_threshold() {
        assert_eq!(Trend::from_change(4), Trend::Increasing);
        assert_eq!(Trend::from_change(3), Trend::Stable);
        assert_eq!(Trend::from_change(-3), Trend::Stable);
        assert_eq!(Trend::from_change(-4), Trend::Decreasing);
    }

    #[test]
    fn test_metric_change() {
        let metric = RiskMetric::new(Category::Strategic, 10, 16);
        assert_eq!(metric.change, -6);
        assert_eq!(metric.trend, Trend::Decreasing);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(sample(2, 5)).unwrap();
        assert_eq!(json["riskScore"], 10);
        assert_eq!(json["category"], "Financial");
        assert_eq!(json["dateIdentified"], "2026-10-01");
        assert_eq!(json["trend"], "stable");
        assert!(json.get("mitigationPlan").is_none());
    }

    #[test]
    fn test_deserialize_rejects_drifted_score() {
        let mut json = serde_json::to_value(sample(2, 5)).unwrap();
        json["riskScore"] = serde_json::json!(11);
        let err = serde_json::from_value::<Risk>(json).unwrap_err();
        assert!(err.to_string().contains("mismatch"));
    }

    #[test]
    fn test_deserialize_accepts_consistent_record() {
        let risk = sample(3, 3);
        let json = serde_json::to_string(&risk).unwrap();
        let back: Risk = serde_json::from_str(&json).unwrap();
        assert_eq!(back, risk);
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("compliance"), Some(Category::Compliance));
        assert_eq!(Category::parse(" Strategic "), Some(Category::Strategic));
        assert_eq!(Category::parse("reputational"), None);
    }

    #[test]
    fn test_register_lookup() {
        let register = RiskRegister::new(vec![sample(1, 1)]);
        assert_eq!(register.len(), 1);
        assert!(register.find("RISK-2026-001").is_some());
        assert!(register.find("RISK-2026-002").is_none());
    }
}
