use filedock_config::Config;
use filedock_events::{AppEvent, EventBus};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

const CONFIG_ENV: &str = "FILEDOCK_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "filedock.toml";

/// Reads `.env` into the process environment. Runs before logging starts so
/// `RUST_LOG` can come from the file.
pub fn load_env_file() -> dotenv::Result<PathBuf> {
    dotenv::dotenv()
}

/// File values first, then the environment on top.
pub async fn load(events: &Arc<EventBus>) -> Result<Config> {
    let config_path = std::env::var(CONFIG_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let (mut config, source) = Config::from_file_or_default(&config_path).await?;
    config.apply_env()?;

    events.emit(AppEvent::ConfigLoaded {
        source: source.to_string(),
    });

    Ok(config)
}
