//! Generation and aggregation instrumentation
//!
//! Counters and timing summaries, readable from any thread. Timings are kept
//! in microseconds since aggregation over an in-memory register is fast.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use std::time::{Duration, Instant};

/// Process-wide registry used by the generator and the data service
pub static METRICS: once_cell::sync::Lazy<MetricsRegistry> =
    once_cell::sync::Lazy::new(MetricsRegistry::new);

pub struct MetricsRegistry {
    counters: RwLock<BTreeMap<String, AtomicU64>>,
    timings: RwLock<BTreeMap<String, Timing>>,
    start_time: Instant,
}

struct Timing {
    count: AtomicU64,
    sum_us: AtomicU64,
    min_us: AtomicU64,
    max_us: AtomicU64,
}

impl Timing {
    fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
            sum_us: AtomicU64::new(0),
            min_us: AtomicU64::new(u64::MAX),
            max_us: AtomicU64::new(0),
        }
    }

    fn record(&self, us: u64) {
        self.count.fetch_add(1, Ordering::Relaxed);
        self.sum_us.fetch_add(us, Ordering::Relaxed);
        self.min_us.fetch_min(us, Ordering::Relaxed);
        self.max_us.fetch_max(us, Ordering::Relaxed);
    }

    fn stats(&self) -> TimingStats {
        let count = self.count.load(Ordering::Relaxed);
        let sum_us = self.sum_us.load(Ordering::Relaxed);
        TimingStats {
            count,
            sum_us,
            avg_us: if count > 0 { sum_us / count } else { 0 },
            min_us: self.min_us.load(Ordering::Relaxed),
            max_us: self.max_us.load(Ordering::Relaxed),
        }
    }
}

/// Snapshot of one timing series
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimingStats {
    pub count: u64,
    pub sum_us: u64,
    pub avg_us: u64,
    pub min_us: u64,
    pub max_us: u64,
}

impl MetricsRegistry {
    pub fn new() -> Self {
        Self {
            counters: RwLock::new(BTreeMap::new()),
            timings: RwLock::new(BTreeMap::new()),
            start_time: Instant::now(),
        }
    }

    pub fn inc(&self, name: &str) {
        self.inc_by(name, 1);
    }

    pub fn inc_by(&self, name: &str, amount: u64) {
        {
            let counters = self.counters.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(counter) = counters.get(name) {
                counter.fetch_add(amount, Ordering::Relaxed);
                return;
            }
        }

        self.counters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_insert_with(|| AtomicU64::new(0))
            .fetch_add(amount, Ordering::Relaxed);
    }

    pub fn observe(&self, name: &str, duration: Duration) {
        let us = duration.as_micros() as u64;
        {
            let timings = self.timings.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(timing) = timings.get(name) {
                timing.record(us);
                return;
            }
        }

        self.timings
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_insert_with(Timing::new)
            .record(us);
    }

    /// Run `f` and record how long it took under `name`
    pub fn time<F, T>(&self, name: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        self.observe(name, start.elapsed());
        result
    }

    pub fn counter(&self, name: &str) -> u64 {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn timing(&self, name: &str) -> Option<TimingStats> {
        self.timings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(Timing::stats)
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Export all metrics as JSON, keys sorted
    pub fn export_json(&self) -> serde_json::Value {
        let counters: BTreeMap<String, u64> = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.load(Ordering::Relaxed)))
            .collect();

        let timings: BTreeMap<String, serde_json::Value> = self
            .timings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, t)| {
                let stats = t.stats();
                (
                    k.clone(),
                    serde_json::json!({
                        "count": stats.count,
                        "sum_us": stats.sum_us,
                        "avg_us": stats.avg_us,
                        "min_us": stats.min_us,
                        "max_us": stats.max_us,
                    }),
                )
            })
            .collect();

        serde_json::json!({
            "uptime_seconds": self.uptime().as_secs(),
            "counters": counters,
            "timings": timings,
        })
    }
}

impl Default for MetricsRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Metric names used throughout the crate
pub mod metric_names {
    pub const REGISTERS_GENERATED: &str = "registers_generated_total";
    pub const RISKS_GENERATED: &str = "risks_generated_total";
    pub const GENERATION_DURATION: &str = "generation_duration_us";
    pub const METRICS_DURATION: &str = "category_metrics_duration_us";
    pub const REPORTS_BUILT: &str = "reports_built_total";
    pub const ASSESSMENTS_COMPLETED: &str = "assessments_completed_total";
}
