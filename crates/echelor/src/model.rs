//! Domain Models
//!
//! Core data types for the cash-position dashboard.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, Result};

/// The complete set of financial figures used as computation input at one
/// point in time. Sequences are chronological; the last element is the most
/// recent month.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Bank balance
    pub cash_on_hand: Decimal,

    /// Revenue per month, oldest first
    pub monthly_revenue: Vec<Decimal>,

    /// Expenses per month, aligned with `monthly_revenue`
    pub monthly_expenses: Vec<Decimal>,

    /// Display label per month (e.g. "Jan")
    pub month_labels: Vec<String>,
}

impl FinancialSnapshot {
    pub fn new(
        cash_on_hand: Decimal,
        monthly_revenue: Vec<Decimal>,
        monthly_expenses: Vec<Decimal>,
        month_labels: Vec<String>,
    ) -> Self {
        Self {
            cash_on_hand,
            monthly_revenue,
            monthly_expenses,
            month_labels,
        }
    }

    /// Check the shape invariants: non-empty, equal-length sequences and a
    /// non-negative cash balance.
    pub fn validate(&self) -> Result<()> {
        if self.cash_on_hand < Decimal::ZERO {
            return Err(FinanceError::InvalidSnapshot(format!(
                "cash on hand is negative ({})",
                self.cash_on_hand
            )));
        }

        let sequences = [
            ("monthly_revenue", self.monthly_revenue.len()),
            ("monthly_expenses", self.monthly_expenses.len()),
            ("month_labels", self.month_labels.len()),
        ];

        if let Some((name, _)) = sequences.iter().find(|(_, len)| *len == 0) {
            return Err(FinanceError::InvalidSnapshot(format!("{} is empty", name)));
        }

        let expected = self.monthly_revenue.len();
        if let Some((name, len)) = sequences.iter().find(|(_, len)| *len != expected) {
            return Err(FinanceError::InvalidSnapshot(format!(
                "{} has {} entries, expected {}",
                name, len, expected
            )));
        }

        Ok(())
    }

    /// Number of months covered
    pub fn months(&self) -> usize {
        self.monthly_revenue.len()
    }
}

/// Months of operation left at the current burn rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Runway {
    /// Cash divided by burn rate, one decimal place
    Months(Decimal),

    /// Burn rate is zero or negative: no finite runway under this model
    NotApplicable,
}

impl std::fmt::Display for Runway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Runway::Months(m) => write!(f, "{:.1}", m),
            Runway::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Metrics derived from the most recent month of a snapshot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Cash on hand
    pub cash: Decimal,

    /// Latest month's revenue
    pub revenue: Decimal,

    /// Latest month's expenses
    pub expenses: Decimal,

    /// expenses - revenue; negative means cash-flow positive
    pub burn_rate: Decimal,

    pub runway: Runway,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn snapshot() -> FinancialSnapshot {
        FinancialSnapshot::new(
            dec!(120000),
            vec![dec!(22000), dec!(25000), dec!(27000)],
            vec![dec!(30000), dec!(32000), dec!(35000)],
            vec!["Jan".into(), "Feb".into(), "Mar".into()],
        )
    }

    #[test]
    fn test_valid_snapshot() {
        assert!(snapshot().validate().is_ok());
        assert_eq!(snapshot().months(), 3);
    }

    #[test]
    fn test_empty_sequence_rejected() {
        let mut s = snapshot();
        s.monthly_expenses.clear();
        let err = s.validate().unwrap_err();
        assert!(matches!(
            err,
            FinanceError::InvalidSnapshot(ref m) if m.contains("monthly_expenses")
        ));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let mut s = snapshot();
        s.month_labels.pop();
        assert!(matches!(s.validate(), Err(FinanceError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_negative_cash_rejected() {
        let mut s = snapshot();
        s.cash_on_hand = dec!(-1);
        assert!(matches!(s.validate(), Err(FinanceError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_runway_display() {
        assert_eq!(Runway::Months(dec!(15)).to_string(), "15.0");
        assert_eq!(Runway::Months(dec!(3.4)).to_string(), "3.4");
        assert_eq!(Runway::NotApplicable.to_string(), "N/A");
    }

    #[test]
    fn test_runway_serialization() {
        assert_eq!(
            serde_json::to_value(Runway::NotApplicable).unwrap(),
            serde_json::json!("not_applicable")
        );
        assert_eq!(
            serde_json::to_value(Runway::Months(dec!(15.0))).unwrap(),
            serde_json::json!({"months": "15.0"})
        );
    }

    #[test]
    fn test_snapshot_json_roundtrip_uses_string_decimals() {
        let json = serde_json::to_value(snapshot()).unwrap();
        assert_eq!(json["cash_on_hand"], serde_json::json!("120000"));
        let back: FinancialSnapshot = serde_json::from_value(json).unwrap();
        assert_eq!(back, snapshot());
    }
}
