//! Dashboard aggregations over a risk register
//!
//! Everything here is a total function of its inputs. The only randomness is
//! the synthetic baseline in [`metrics_by_category`], drawn from the caller's
//! [`Rng`]. Maps are keyed by the model enums, so they iterate and serialize
//! in the fixed dashboard order.

use crate::metrics::{metric_names, METRICS};
use crate::model::{Category, Rating, Risk, RiskLevel, RiskMetric, RiskStatus};
use rand::Rng;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

pub type CategoryCounts = BTreeMap<Category, usize>;
pub type StatusCounts = BTreeMap<RiskStatus, usize>;
pub type LevelCounts = BTreeMap<RiskLevel, usize>;

/// Largest distance of a synthetic baseline from the current score
pub const BASELINE_SPREAD: i32 = 10;

/// Rows (likelihood) and columns (impact) of the heatmap
pub const HEATMAP_SIZE: usize = Rating::MAX as usize;

/// Likelihood × impact frequency matrix, row-major by likelihood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Heatmap {
    cells: [[usize; HEATMAP_SIZE]; HEATMAP_SIZE],
}

impl Heatmap {
    pub fn rows(&self) -> &[[usize; HEATMAP_SIZE]; HEATMAP_SIZE] {
        &self.cells
    }

    pub fn get(&self, likelihood: Rating, impact: Rating) -> usize {
        self.cells[likelihood.index()][impact.index()]
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    fn record(&mut self, risk: &Risk) {
        self.cells[risk.likelihood().index()][risk.impact().index()] += 1;
    }
}

impl Serialize for Heatmap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.cells.serialize(serializer)
    }
}

/// Classify a score: below 9 Low, below 16 Medium, otherwise High
pub fn classify(score: u32) -> RiskLevel {
    RiskLevel::from_score(score)
}

pub fn count_by_category(risks: &[Risk]) -> CategoryCounts {
    let mut counts: CategoryCounts = Category::ALL.iter().map(|c| (*c, 0)).collect();
    for risk in risks {
        *counts.entry(risk.category()).or_insert(0) += 1;
    }
    counts
}

pub fn count_by_status(risks: &[Risk]) -> StatusCounts {
    let mut counts: StatusCounts = RiskStatus::ALL.iter().map(|s| (*s, 0)).collect();
    for risk in risks {
        *counts.entry(risk.status()).or_insert(0) += 1;
    }
    counts
}

/// Low/Medium/High tallies of individual risk scores
pub fn level_distribution(risks: &[Risk]) -> LevelCounts {
    let mut counts: LevelCounts = RiskLevel::ALL.iter().map(|l| (*l, 0)).collect();
    for risk in risks {
        *counts.entry(risk.level()).or_insert(0) += 1;
    }
    counts
}

pub fn heatmap(risks: &[Risk]) -> Heatmap {
    let mut map = Heatmap::default();
    for risk in risks {
        map.record(risk);
    }
    map
}

/// Mean risk score rounded half up; 0 when there is nothing to average
pub fn mean_score(risks: &[Risk]) -> u32 {
    let sum: u64 = risks.iter().map(|r| u64::from(r.risk_score())).sum();
    rounded_mean(sum, risks.len() as u64)
}

/// Mean score of each category, in category order
pub fn category_scores(risks: &[Risk]) -> Vec<(Category, u32)> {
    Category::ALL
        .iter()
        .map(|category| {
            let (sum, count) = risks
                .iter()
                .filter(|r| r.category() == *category)
                .fold((0u64, 0u64), |(sum, count), r| {
                    (sum + u64::from(r.risk_score()), count + 1)
                });
            (*category, rounded_mean(sum, count))
        })
        .collect()
}

/// One metric per category with a synthetic baseline within
/// ±[`BASELINE_SPREAD`] of the score, floored at zero
pub fn metrics_by_category<R: Rng>(risks: &[Risk], rng: &mut R) -> Vec<RiskMetric> {
    METRICS.time(metric_names::METRICS_DURATION, || {
        category_scores(risks)
            .into_iter()
            .map(|(category, score)| {
                let offset = rng.gen_range(-BASELINE_SPREAD..=BASELINE_SPREAD);
                let previous = (score as i32 + offset).max(0) as u32;
                RiskMetric::new(category, score, previous)
            })
            .collect()
    })
}

/// Rounded mean of the category scores
pub fn overall_score(metrics: &[RiskMetric]) -> u32 {
    let sum: u64 = metrics.iter().map(|m| u64::from(m.score)).sum();
    rounded_mean(sum, metrics.len() as u64)
}

/// The `count` most recently identified risks, newest first.
///
/// Ties keep register order.
pub fn recent_risks(risks: &[Risk], count: usize) -> Vec<&Risk> {
    let mut sorted: Vec<&Risk> = risks.iter().collect();
    sorted.sort_by(|a, b| b.date_identified().cmp(&a.date_identified()));
    sorted.truncate(count);
    sorted
}

pub fn risk_by_id<'a>(risks: &'a [Risk], id: &str) -> Option<&'a Risk> {
    risks.iter().find(|r| r.id() == id)
}

fn rounded_mean(sum: u64, count: u64) -> u32 {
    if count == 0 {
        return 0;
    }
    ((2 * sum + count) / (2 * count)) as u32
}
