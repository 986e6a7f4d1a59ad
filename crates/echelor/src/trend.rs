//! Monthly revenue vs. expenses series for the trend chart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, Result};
use crate::model::FinancialSnapshot;

/// One month on the trend chart
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub label: String,
    pub revenue: Decimal,
    pub expenses: Decimal,
    /// revenue - expenses
    pub net: Decimal,
}

/// Chronological trend points, oldest first
pub fn trend(snapshot: &FinancialSnapshot) -> Result<Vec<TrendPoint>> {
    snapshot.validate()?;

    snapshot
        .month_labels
        .iter()
        .zip(&snapshot.monthly_revenue)
        .zip(&snapshot.monthly_expenses)
        .map(|((label, &revenue), &expenses)| {
            let net = revenue.checked_sub(expenses).ok_or_else(|| {
                FinanceError::InvalidSnapshot(format!("net for {} out of range", label))
            })?;
            Ok(TrendPoint {
                label: label.clone(),
                revenue,
                expenses,
                net,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_trend_points() {
        let snapshot = FinancialSnapshot::new(
            dec!(120000),
            vec![dec!(22000), dec!(25000), dec!(27000)],
            vec![dec!(30000), dec!(32000), dec!(35000)],
            vec!["Jan".into(), "Feb".into(), "Mar".into()],
        );

        let points = trend(&snapshot).unwrap();
        let labels: Vec<_> = points.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["Jan", "Feb", "Mar"]);
        assert_eq!(points[0].net, dec!(-8000));
        assert_eq!(points[1].net, dec!(-7000));
        assert_eq!(points[2].revenue, dec!(27000));
    }

    #[test]
    fn test_trend_rejects_misaligned_snapshot() {
        let snapshot = FinancialSnapshot::new(dec!(1), vec![dec!(1)], vec![dec!(1)], vec![]);
        assert!(matches!(trend(&snapshot), Err(FinanceError::InvalidSnapshot(_))));
    }

    #[test]
    fn test_trend_rejects_overflowing_net() {
        let snapshot = FinancialSnapshot::new(
            dec!(1),
            vec![dec!(10), Decimal::MIN],
            vec![dec!(5), Decimal::MAX],
            vec!["Jan".into(), "Feb".into()],
        );
        let err = trend(&snapshot).unwrap_err();
        assert!(matches!(err, FinanceError::InvalidSnapshot(ref m) if m.contains("Feb")));
    }
}
