use filedock_config::ServerSettings;
use filedock_events::EventBus;
use filedock_ports::{PortReconciler, StdinOperator, SystemProcessTable};
use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;

/// Offers to kill whatever listens on the configured port. An error means
/// startup must stop before binding.
pub async fn clear_port(settings: &ServerSettings, events: &Arc<EventBus>) -> Result<()> {
    if !settings.interactive_port_check {
        return Ok(());
    }

    let reconciler = PortReconciler::new(
        SystemProcessTable,
        StdinOperator,
        Arc::clone(events),
        Duration::from_millis(settings.port_release_delay_ms),
    );
    reconciler.reconcile(settings.port).await?;

    Ok(())
}
