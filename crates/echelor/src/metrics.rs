//! Metrics Engine
//!
//! Derives cash, burn rate and runway from a snapshot and evaluates alerts.
//! Everything here is a pure function of its input; nothing is cached.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::alerts::{compute_alerts, Alert, AlertThresholds};
use crate::error::{FinanceError, Result};
use crate::model::{DerivedMetrics, FinancialSnapshot, Runway};
use crate::trend::{trend, TrendPoint};

/// Monthly expenses minus monthly revenue. Positive means losing cash.
///
/// Fails with [`FinanceError::InvalidSnapshot`] when the difference does not
/// fit in a `Decimal`.
pub fn burn_rate(revenue: Decimal, expenses: Decimal) -> Result<Decimal> {
    expenses
        .checked_sub(revenue)
        .ok_or_else(|| FinanceError::InvalidSnapshot("burn rate out of range".into()))
}

/// Cash divided by burn rate, rounded half-to-even to one decimal place.
///
/// A zero or negative burn rate has no finite runway and yields
/// [`Runway::NotApplicable`]; the division is never attempted.
pub fn runway(cash: Decimal, burn_rate: Decimal) -> Result<Runway> {
    if burn_rate <= Decimal::ZERO {
        return Ok(Runway::NotApplicable);
    }

    let months = cash
        .checked_div(burn_rate)
        .ok_or_else(|| FinanceError::InvalidSnapshot("runway out of range".into()))?;
    let mut months = months.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven);
    months.rescale(1);
    Ok(Runway::Months(months))
}

/// Derive metrics from the most recent month of `snapshot`.
///
/// Earlier months only feed the trend series.
pub fn compute_metrics(snapshot: &FinancialSnapshot) -> Result<DerivedMetrics> {
    snapshot.validate()?;

    let revenue = *snapshot
        .monthly_revenue
        .last()
        .ok_or_else(|| FinanceError::InvalidSnapshot("monthly_revenue is empty".into()))?;
    let expenses = *snapshot
        .monthly_expenses
        .last()
        .ok_or_else(|| FinanceError::InvalidSnapshot("monthly_expenses is empty".into()))?;

    let cash = snapshot.cash_on_hand;
    let burn_rate = burn_rate(revenue, expenses)?;

    Ok(DerivedMetrics {
        cash,
        revenue,
        expenses,
        burn_rate,
        runway: runway(cash, burn_rate)?,
    })
}

/// Everything the dashboard shows for one snapshot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dashboard {
    pub metrics: DerivedMetrics,
    pub alerts: Vec<Alert>,
    pub trend: Vec<TrendPoint>,
}

impl Dashboard {
    /// True when no alert fired
    pub fn is_healthy(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Stateless engine carrying the configured alert thresholds
#[derive(Clone, Debug, Default)]
pub struct MetricsEngine {
    thresholds: AlertThresholds,
}

impl MetricsEngine {
    pub fn new(thresholds: AlertThresholds) -> Self {
        Self { thresholds }
    }

    pub fn compute_metrics(&self, snapshot: &FinancialSnapshot) -> Result<DerivedMetrics> {
        compute_metrics(snapshot)
    }

    pub fn compute_alerts(&self, metrics: &DerivedMetrics) -> Vec<Alert> {
        compute_alerts(metrics, &self.thresholds)
    }

    /// Metrics, alerts and trend in one pass
    pub fn dashboard(&self, snapshot: &FinancialSnapshot) -> Result<Dashboard> {
        let metrics = self.compute_metrics(snapshot)?;
        let alerts = self.compute_alerts(&metrics);
        let trend = trend(snapshot)?;

        tracing::debug!(
            burn_rate = %metrics.burn_rate,
            runway = %metrics.runway,
            alerts = alerts.len(),
            "Dashboard computed"
        );

        Ok(Dashboard { metrics, alerts, trend })
    }
}
