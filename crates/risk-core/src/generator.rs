//! Synthetic risk register generation
//!
//! Every random draw goes through the caller's [`Rng`], so a seeded
//! [`StdRng`] and a fixed reference date reproduce a register exactly.

use crate::catalog::{risk_names, OWNERS};
use crate::config::GeneratorConfig;
use crate::error::RiskResult;
use crate::metrics::{metric_names, METRICS};
use crate::model::{Category, Rating, Risk, RiskDraft, RiskRegister, RiskStatus, Trend};
use chrono::{Datelike, Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info};

/// Builds fixed-size registers of synthetic risks
#[derive(Debug, Clone)]
pub struct RiskGenerator {
    config: GeneratorConfig,
    today: NaiveDate,
}

impl RiskGenerator {
    pub fn new(config: GeneratorConfig) -> RiskResult<Self> {
        config.validate()?;
        let today = config.reference_date();
        Ok(Self { config, today })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Reference date records are dated back from
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Generate a register from a fresh [`StdRng`] seeded with `seed`
    pub fn generate_seeded(&self, seed: u64) -> RiskRegister {
        let mut rng = StdRng::seed_from_u64(seed);
        self.generate(&mut rng)
    }

    pub fn generate<R: Rng>(&self, rng: &mut R) -> RiskRegister {
        let start = Instant::now();
        let count = self.config.record_count;

        let risks: Vec<Risk> = (1..=count)
            .map(|index| self.generate_one(index, &mut *rng))
            .collect();

        METRICS.inc(metric_names::REGISTERS_GENERATED);
        METRICS.inc_by(metric_names::RISKS_GENERATED, risks.len() as u64);
        METRICS.observe(metric_names::GENERATION_DURATION, start.elapsed());
        info!(
            "Generated risk register: {} records dated within {} days of {}",
            risks.len(),
            self.config.window_days,
            self.today
        );

        RiskRegister::new(risks)
    }

    fn generate_one<R: Rng>(&self, index: usize, rng: &mut R) -> Risk {
        let category = Category::ALL[rng.gen_range(0..Category::ALL.len())];
        let names = risk_names(category);
        let name = names[rng.gen_range(0..names.len())];

        let likelihood = Rating::random(rng);
        let impact = Rating::random(rng);

        let days_ago = rng.gen_range(0..self.config.window_days);
        let date_identified = self.today - Duration::days(i64::from(days_ago));

        let status = RiskStatus::ALL[rng.gen_range(0..RiskStatus::ALL.len())];
        let owner = OWNERS[rng.gen_range(0..OWNERS.len())];
        let mitigation_plan = rng
            .gen_bool(self.config.mitigation_probability)
            .then(|| format!("Mitigation plan for {}", name));
        let trend = Trend::ALL[rng.gen_range(0..Trend::ALL.len())];

        let id = format!("RISK-{}-{:03}", self.today.year(), index);
        debug!("{}: {} ({}) L{} x I{}", id, name, category, likelihood, impact);

        Risk::new(RiskDraft {
            id,
            name: name.to_string(),
            category,
            likelihood,
            impact,
            status,
            date_identified,
            owner: owner.to_string(),
            mitigation_plan,
            trend,
        })
    }
}
