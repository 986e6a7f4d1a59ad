//! Smart Alerts
//!
//! Fixed rule set evaluated against derived metrics. Rules are independent
//! and always reported in the same order.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::model::DerivedMetrics;

/// Alert thresholds
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertThresholds {
    /// Cash strictly below this raises [`AlertKind::LowCash`]
    #[serde(default = "default_low_cash")]
    pub low_cash_threshold: Decimal,

    /// Burn rate strictly above this raises [`AlertKind::HighBurn`]
    #[serde(default = "default_high_burn")]
    pub high_burn_threshold: Decimal,
}

fn default_low_cash() -> Decimal {
    dec!(50000)
}

fn default_high_burn() -> Decimal {
    dec!(30000)
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            low_cash_threshold: default_low_cash(),
            high_burn_threshold: default_high_burn(),
        }
    }
}

impl AlertThresholds {
    /// Read `ECHELOR_LOW_CASH_THRESHOLD` and `ECHELOR_HIGH_BURN_THRESHOLD`,
    /// falling back to the defaults when unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            low_cash_threshold: decimal_env("ECHELOR_LOW_CASH_THRESHOLD")
                .unwrap_or_else(default_low_cash),
            high_burn_threshold: decimal_env("ECHELOR_HIGH_BURN_THRESHOLD")
                .unwrap_or_else(default_high_burn),
        }
    }
}

fn decimal_env(key: &str) -> Option<Decimal> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<Decimal>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Ignoring {}={:?}: {}", key, raw, e);
            None
        }
    }
}

/// Which rule fired
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    LowCash,
    HighBurn,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::LowCash => "low cash reserves",
            AlertKind::HighBurn => "high burn rate",
        }
    }

    /// Advisory text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            AlertKind::LowCash => "Low cash reserves. Consider reducing spend or raising capital.",
            AlertKind::HighBurn => "Burn rate is high. Monitor expenses closely.",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fired alert
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl From<AlertKind> for Alert {
    fn from(kind: AlertKind) -> Self {
        Self {
            kind,
            message: kind.message().to_string(),
        }
    }
}

/// Evaluate every rule against `metrics`. An empty result means healthy.
pub fn compute_alerts(metrics: &DerivedMetrics, thresholds: &AlertThresholds) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if metrics.cash < thresholds.low_cash_threshold {
        alerts.push(AlertKind::LowCash.into());
    }

    if metrics.burn_rate > thresholds.high_burn_threshold {
        alerts.push(AlertKind::HighBurn.into());
    }

    alerts
}
