use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Ready { local_url: String, root_dir: String },
    Shutdown,

    // Configuration
    ConfigLoaded { source: String },

    // Port reconciliation
    PortConflict { port: u16, pids: String },
    ProcessKilling { pids: String },
    ProcessKilled,
    ProcessKillFailed { error: String },
    StartupCancelled,
    BindFailed { addr: String, port: u16, in_use: bool, error: String },

    // Tunnel
    TunnelStarting { provider: String },
    TunnelReady { public_url: String },
    TunnelFailed { error: String, local_url: String },
    TunnelDisabled { local_url: String },

    // Listing
    FilesAvailable { base_url: String, files: Vec<String> },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
