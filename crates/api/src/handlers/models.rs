use filedock_scanner::FileScanner;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub(super) scanner: Arc<FileScanner>,
    pub(super) root_dir: Arc<PathBuf>,
    pub(super) public_dir: Arc<PathBuf>,
    pub(super) index_file: Arc<String>,
    pub(super) port: u16,
    pub(super) started_at: Instant,
    /// Set once the tunnel publisher reports a URL
    pub(super) public_url: Arc<RwLock<Option<String>>>,
    pub(super) streaming_threshold_bytes: u64,
    pub(super) cache_max_age_secs: u64,
}

/// How a file found on disk should be sent back
#[derive(Debug, Clone, Copy)]
pub struct ServeOptions {
    pub streaming_threshold_bytes: u64,
    pub cache_max_age_secs: u64,
}
