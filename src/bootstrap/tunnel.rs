use filedock_api::AppState;
use filedock_config::TunnelSettings;
use filedock_events::{AppEvent, EventBus};
use filedock_models::FileEntry;
use filedock_tunnel::{publisher_for, TunnelHandle, TunnelPublisher};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// The configured provider, or `None` when tunneling is disabled.
pub fn publisher(settings: &TunnelSettings) -> Option<Box<dyn TunnelPublisher>> {
    settings
        .enabled
        .then(|| publisher_for(settings.provider, Duration::from_secs(settings.timeout_secs)))
}

/// Publishes the server in the background and announces the download URLs.
/// The task yields the handle that keeps the tunnel open.
pub fn spawn(
    publisher: Option<Box<dyn TunnelPublisher>>,
    local_url: String,
    state: AppState,
    events: Arc<EventBus>,
) -> JoinHandle<Option<TunnelHandle>> {
    tokio::spawn(async move {
        let Some(publisher) = publisher else {
            events.emit(AppEvent::TunnelDisabled {
                local_url: local_url.clone(),
            });
            announce_files(&state, &events, &local_url).await;
            return None;
        };

        events.emit(AppEvent::TunnelStarting {
            provider: publisher.provider().to_string(),
        });

        match publisher.publish(state.port()).await {
            Ok((info, handle)) => {
                state.set_public_url(info.public_url.clone());
                events.emit(AppEvent::TunnelReady {
                    public_url: info.public_url.clone(),
                });
                announce_files(&state, &events, &info.public_url).await;
                Some(handle)
            }
            Err(e) => {
                events.emit(AppEvent::TunnelFailed {
                    error: e.to_string(),
                    local_url: local_url.clone(),
                });
                announce_files(&state, &events, &local_url).await;
                None
            }
        }
    })
}

async fn announce_files(state: &AppState, events: &EventBus, base_url: &str) {
    match state.available_files().await {
        Ok(files) => events.emit(AppEvent::FilesAvailable {
            base_url: base_url.trim_end_matches('/').to_string(),
            files: files.into_iter().map(FileEntry::into_path).collect(),
        }),
        Err(e) => events.emit(AppEvent::Error {
            context: "Listing files".to_string(),
            error: e.to_string(),
        }),
    }
}

/// Closes the tunnel, or abandons a publication still in progress.
pub async fn shutdown(task: JoinHandle<Option<TunnelHandle>>) {
    task.abort();
    if let Ok(Some(handle)) = task.await {
        handle.shutdown();
        tracing::info!("Tunnel closed");
    }
}
