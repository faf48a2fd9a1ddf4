mod bootstrap;

use filedock_api::AppState;
use filedock_events::{AppEvent, EventBus};
use crate::bootstrap::{config, logging, ports, router, server, tunnel};
use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let env_file = config::load_env_file();
    logging::initialize();
    if let Err(e) = env_file {
        tracing::debug!("No .env loaded: {}", e);
    }

    if let Err(e) = run().await {
        tracing::error!("Failed to start server: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let events = EventBus::new(false);
    events.emit(AppEvent::Starting);

    let config = config::load(&events).await?;
    let root_dir = server::prepare_root(&config.server).await?;

    ports::clear_port(&config.server, &events).await?;
    let listener = server::bind_server(&config.server, &events).await?;

    let app_state = AppState::new(root_dir.clone(), &config.server);
    let app = router::build(&config.server, app_state.clone());
    let local_url = config.server.local_url();

    events.emit(AppEvent::Ready {
        local_url: local_url.clone(),
        root_dir: root_dir.display().to_string(),
    });

    let tunnel_task = tunnel::spawn(
        tunnel::publisher(&config.tunnel),
        local_url,
        app_state,
        Arc::clone(&events),
    );

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received, initiating graceful shutdown...");
    };

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .tcp_nodelay(config.server.tcp_nodelay)
    .with_graceful_shutdown(shutdown_signal)
    .await?;

    tunnel::shutdown(tunnel_task).await;
    events.emit(AppEvent::Shutdown);
    Ok(())
}
