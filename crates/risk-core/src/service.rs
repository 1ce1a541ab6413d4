//! Session-scoped access to one risk register and its derived views

use crate::aggregator::{self, CategoryCounts, Heatmap, LevelCounts, StatusCounts};
use crate::assessment::{self, AssessmentResponse};
use crate::config::GeneratorConfig;
use crate::error::RiskResult;
use crate::generator::RiskGenerator;
use crate::model::{Risk, RiskLevel, RiskMetric, RiskRegister};
use crate::trends::{self, TrendPoint};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::info;

/// Recent-risk list length when none is given
pub const DEFAULT_RECENT_COUNT: usize = 5;

struct Snapshot {
    register: RiskRegister,
    metrics: Vec<RiskMetric>,
    seed: Option<u64>,
}

/// Read-only data service over one register.
///
/// The register and its category metrics are fixed when the service is
/// built, so every call on the same service (or any clone of it) returns the
/// same answer.
#[derive(Clone)]
pub struct RiskDataService {
    inner: Arc<Snapshot>,
}

impl RiskDataService {
    /// Wrap an existing register, drawing metric baselines from `rng`
    pub fn new<R: Rng>(register: RiskRegister, rng: &mut R) -> Self {
        let metrics = aggregator::metrics_by_category(&register, rng);
        Self::from_parts(register, metrics, None)
    }

    pub fn from_parts(
        register: RiskRegister,
        metrics: Vec<RiskMetric>,
        seed: Option<u64>,
    ) -> Self {
        Self {
            inner: Arc::new(Snapshot {
                register,
                metrics,
                seed,
            }),
        }
    }

    /// Generate a register and its metrics from one seeded stream. Without
    /// a configured seed a random one is drawn and kept for reproduction.
    pub fn generate(config: GeneratorConfig) -> RiskResult<Self> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let generator = RiskGenerator::new(config)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let register = generator.generate(&mut rng);
        let metrics = aggregator::metrics_by_category(&register, &mut rng);
        info!(
            "Risk data service ready: {} risks, seed {}",
            register.len(),
            seed
        );

        Ok(Self::from_parts(register, metrics, Some(seed)))
    }

    /// Seed the session was generated from, if it was generated here
    pub fn seed(&self) -> Option<u64> {
        self.inner.seed
    }

    pub fn register(&self) -> &RiskRegister {
        &self.inner.register
    }

    pub fn risks(&self) -> &[Risk] {
        &self.inner.register
    }

    pub fn risk_by_id(&self, id: &str) -> Option<&Risk> {
        aggregator::risk_by_id(self.risks(), id)
    }

    pub fn recent_risks(&self, count: usize) -> Vec<Risk> {
        aggregator::recent_risks(self.risks(), count)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn risk_metrics(&self) -> &[RiskMetric] {
        &self.inner.metrics
    }

    pub fn overall_risk_score(&self) -> u32 {
        aggregator::overall_score(self.risk_metrics())
    }

    pub fn overall_risk_level(&self) -> RiskLevel {
        aggregator::classify(self.overall_risk_score())
    }

    pub fn heatmap(&self) -> Heatmap {
        aggregator::heatmap(self.risks())
    }

    pub fn risk_trend_data(&self) -> &'static [TrendPoint] {
        trends::risk_trend_data()
    }

    pub fn assessment_responses(&self) -> &'static [AssessmentResponse] {
        assessment::assessment_responses()
    }

    pub fn risks_by_category(&self) -> CategoryCounts {
        aggregator::count_by_category(self.risks())
    }

    pub fn risks_by_status(&self) -> StatusCounts {
        aggregator::count_by_status(self.risks())
    }

    pub fn risks_by_level(&self) -> LevelCounts {
        aggregator::level_distribution(self.risks())
    }
}

impl std::fmt::Debug for RiskDataService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskDataService")
            .field("risks", &self.inner.register.len())
            .field("seed", &self.inner.seed)
            .finish()
    }
}
