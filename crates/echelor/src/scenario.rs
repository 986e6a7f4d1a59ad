//! Scenario Planning
//!
//! What-if burn rate and runway for assumed monthly revenue and expenses,
//! measured against the current cash balance.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::{burn_rate, runway};
use crate::model::{DerivedMetrics, Runway};

/// Assumed monthly figures
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub assumed_revenue: Decimal,
    pub assumed_expenses: Decimal,
}

/// Result of a what-if run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub assumed_revenue: Decimal,
    pub assumed_expenses: Decimal,
    pub burn_rate: Decimal,
    pub runway: Runway,
}

/// Same burn and runway rules as the live metrics, including the
/// out-of-range checks
pub fn plan_scenario(cash: Decimal, input: ScenarioInput) -> Result<ScenarioOutcome> {
    let burn_rate = burn_rate(input.assumed_revenue, input.assumed_expenses)?;

    Ok(ScenarioOutcome {
        assumed_revenue: input.assumed_revenue,
        assumed_expenses: input.assumed_expenses,
        burn_rate,
        runway: runway(cash, burn_rate)?,
    })
}

impl DerivedMetrics {
    /// Run a scenario against this snapshot's cash
    pub fn scenario(&self, input: ScenarioInput) -> Result<ScenarioOutcome> {
        plan_scenario(self.cash, input)
    }

    /// The planner's starting point: the current month's figures
    pub fn baseline_scenario(&self) -> ScenarioInput {
        ScenarioInput {
            assumed_revenue: self.revenue,
            assumed_expenses: self.expenses,
        }
    }
}
