use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TunnelError {
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),

    #[error("Authentication rejected by {0}")]
    AuthRejected(String),

    #[error("{program} command not found. Install it from: {hint}")]
    AgentMissing {
        program: &'static str,
        hint: &'static str,
    },

    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited before the tunnel was ready ({status})")]
    AgentExited { program: &'static str, status: String },

    #[error("Timeout after {0:?} waiting for tunnel URL")]
    Timeout(Duration),

    #[error("Tunnel closed before reporting a URL")]
    Closed,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
