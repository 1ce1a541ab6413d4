//! # Risk Core
//!
//! Synthetic risk register generation and the aggregation layer behind the
//! risk dashboard.
//!
//! ## Key Features
//!
//! - **Seedable generator**: builds a register of 25 records (configurable)
//!   from any [`rand::Rng`]; the same seed and reference date always give the
//!   same register.
//! - **Aggregations**: counts by category, status and level, the 5×5
//!   likelihood × impact heatmap, per-category metrics with trends, the
//!   overall score and the recent-risk list.
//! - **Session service**: [`RiskDataService`] freezes one register and its
//!   metrics so repeated reads agree.
//! - **Assessment workflow**: an explicit state machine from risk basics to a
//!   scored outcome.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use risk_core::{GeneratorConfig, RiskDataService};
//!
//! let service = RiskDataService::generate(GeneratorConfig {
//!     seed: Some(42),
//!     ..Default::default()
//! })?;
//!
//! for metric in service.risk_metrics() {
//!     println!("{}: {} ({})", metric.category, metric.score, metric.trend);
//! }
//! println!("overall: {}", service.overall_risk_score());
//! ```
//!
//! ## Classification
//!
//! | Score | Level |
//! |-------|-------|
//! | below 9 | Low |
//! | 9 to 15 | Medium |
//! | 16 and above | High |

pub mod aggregator;
pub mod assessment;
pub mod assistant;
pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod metrics;
pub mod model;
pub mod report;
pub mod service;
pub mod trends;

pub use aggregator::{classify, Heatmap};
pub use assessment::{AssessmentEvent, AssessmentOutcome, AssessmentState, AssessmentWorkflow};
pub use assistant::Conversation;
pub use config::{ConfigBuilder, DashboardConfig, GeneratorConfig, ReportFormat, MAX_WINDOW_DAYS};
pub use error::{RiskError, RiskResult};
pub use generator::RiskGenerator;
pub use metrics::{MetricsRegistry, METRICS};
pub use model::{Category, Rating, Risk, RiskLevel, RiskMetric, RiskRegister, RiskStatus, Trend};
pub use report::{DashboardReport, ReportWriter};
pub use service::{RiskDataService, DEFAULT_RECENT_COUNT};
pub use trends::TrendPoint;
