use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortError {
    #[error("Port {port} conflict - user chose not to kill process {pids}")]
    UserDeclined { port: u16, pids: String },

    #[error("Failed to kill process {pid}: {reason}")]
    KillFailed { pid: u32, reason: String },

    #[error("Failed to read operator response: {0}")]
    Prompt(#[source] std::io::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}
