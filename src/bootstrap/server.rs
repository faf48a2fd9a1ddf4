use filedock_config::ServerSettings;
use filedock_events::{AppEvent, EventBus};
use filedock_filesystem::FileSystem;
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;

pub async fn prepare_root(settings: &ServerSettings) -> Result<PathBuf> {
    let root = FileSystem::ensure_root_directory(&settings.root_dir).await?;
    tracing::debug!("Content root: {}", root.display());
    Ok(root)
}

pub async fn bind_server(settings: &ServerSettings, events: &Arc<EventBus>) -> Result<TcpListener> {
    let addr = settings.bind_addr();

    TcpListener::bind(&addr).await.map_err(|e| {
        events.emit(AppEvent::BindFailed {
            addr: addr.clone(),
            port: settings.port,
            in_use: e.kind() == std::io::ErrorKind::AddrInUse,
            error: e.to_string(),
        });
        anyhow::anyhow!("Failed to bind server on {}: {}", addr, e)
    })
}
