//! Application State

use std::sync::Arc;

use echelor::{AssistantGateway, CancellationToken, MetricsEngine, SnapshotSource};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Metrics and alert evaluation
    pub engine: Arc<MetricsEngine>,

    /// Where the current snapshot comes from
    pub source: Arc<dyn SnapshotSource>,

    /// Assistant gateway (None if no provider credential is configured)
    pub assistant: Option<Arc<AssistantGateway>>,

    /// Cancelled on shutdown; in-flight assistant calls observe child tokens
    pub shutdown: CancellationToken,
}
