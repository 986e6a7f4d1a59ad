//! # echelor
//!
//! Virtual CFO core for early-stage startups: cash position, burn rate,
//! runway, rule-based alerts, scenario planning, and an LLM assistant that
//! explains the numbers.
//!
//! ## Flow
//!
//! ```text
//! ┌────────────────┐   ┌───────────────┐   ┌──────────────────┐   ┌─────────────┐
//! │ SnapshotSource │──▶│ MetricsEngine │──▶│ AssistantGateway │──▶│ LlmProvider │
//! │  (accounting)  │   │ metrics+alerts│   │ summary / Q&A    │   │  (OpenAI)   │
//! └────────────────┘   └───────────────┘   └──────────────────┘   └─────────────┘
//! ```
//!
//! ## Example: demo snapshot
//!
//! ```text
//! Cash on hand      $120,000
//! Revenue (Mar)      $27,000
//! Expenses (Mar)     $35,000
//! Burn rate           $8,000 / month
//! Runway               15.0 months
//! Alerts              none
//! ```
//!
//! Runway is `cash / burn_rate` rounded half-to-even to one decimal place.
//! A company at break-even or better has no finite runway and reports
//! [`Runway::NotApplicable`].

pub mod alerts;
pub mod assistant;
pub mod config;
pub mod error;
pub mod metrics;
pub mod model;
pub mod scenario;
pub mod source;
pub mod test_support;
pub mod trend;

pub use alerts::{compute_alerts, Alert, AlertKind, AlertThresholds};
pub use assistant::AssistantGateway;
pub use config::{AssistantConfig, EchelorConfig};
pub use error::{FinanceError, Result};
pub use metrics::{compute_metrics, Dashboard, MetricsEngine};
pub use model::{DerivedMetrics, FinancialSnapshot, Runway};
pub use scenario::{plan_scenario, ScenarioInput, ScenarioOutcome};
pub use source::{SnapshotSource, StaticSnapshotSource};
pub use trend::{trend, TrendPoint};

pub use tokio_util::sync::CancellationToken;
