use super::errors::PortError;
use async_trait::async_trait;
use filedock_events::EventBus;
use filedock_models::PortConflict;
use std::sync::Arc;
use std::time::Duration;

/// Host process/socket table
#[async_trait]
pub trait ProcessTable: Send + Sync {
    /// Processes listening on `port`; empty when the port is free.
    async fn listeners(&self, port: u16) -> Result<Vec<u32>, PortError>;

    /// Forcibly terminates `pid`.
    async fn kill(&self, pid: u32) -> Result<(), PortError>;
}

/// Whoever answers the kill prompt
#[async_trait]
pub trait Operator: Send + Sync {
    async fn confirm_kill(&self, conflict: &PortConflict) -> Result<bool, PortError>;
}

/// Startup port reconciliation:
/// `Idle -> PromptedForKill -> Confirmed | Declined -> Resolved | Failed`
pub struct PortReconciler<P, O> {
    pub(super) processes: P,
    pub(super) operator: O,
    pub(super) events: Arc<EventBus>,
    pub(super) release_delay: Duration,
}

#[derive(Debug)]
pub enum ReconcileState {
    Idle,
    PromptedForKill(PortConflict),
    Confirmed(PortConflict),
    Declined(PortConflict),
    Resolved,
    Failed(PortError),
}
