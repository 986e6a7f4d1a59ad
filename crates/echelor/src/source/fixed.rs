//! Static Snapshot Source
//!
//! For demos and tests. Serves one fixed snapshot.

use async_trait::async_trait;
use rust_decimal_macros::dec;

use super::SnapshotSource;
use crate::error::Result;
use crate::model::FinancialSnapshot;

/// Source that always returns the same snapshot
pub struct StaticSnapshotSource {
    snapshot: FinancialSnapshot,
}

impl Default for StaticSnapshotSource {
    fn default() -> Self {
        Self::demo()
    }
}

impl StaticSnapshotSource {
    pub fn new(snapshot: FinancialSnapshot) -> Self {
        Self { snapshot }
    }

    /// First-quarter figures for a seed-stage startup
    pub fn demo() -> Self {
        Self::new(FinancialSnapshot::new(
            dec!(120000),
            vec![dec!(22000), dec!(25000), dec!(27000)],
            vec![dec!(30000), dec!(32000), dec!(35000)],
            vec!["Jan".into(), "Feb".into(), "Mar".into()],
        ))
    }
}

#[async_trait]
impl SnapshotSource for StaticSnapshotSource {
    async fn fetch(&self) -> Result<FinancialSnapshot> {
        self.snapshot.validate()?;
        Ok(self.snapshot.clone())
    }

    fn name(&self) -> &str {
        "StaticSnapshot"
    }
}
