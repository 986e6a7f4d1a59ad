//! Snapshot Sources
//!
//! Abstractions over whatever supplies the financial figures: an accounting
//! system poll, a webhook cache, or the static demo data.

mod fixed;

pub use fixed::StaticSnapshotSource;

use async_trait::async_trait;

use crate::error::Result;
use crate::model::FinancialSnapshot;

/// Snapshot provider trait (Strategy pattern)
///
/// Implement this for each bookkeeping integration. Every call returns a
/// fresh snapshot; callers never hold on to a previous one.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current snapshot
    async fn fetch(&self) -> Result<FinancialSnapshot>;

    /// Source name for logs and health output
    fn name(&self) -> &str;
}
