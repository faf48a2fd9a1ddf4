use super::models::{AppState, ServeOptions};
use crate::errors::ApiError;
use filedock_config::ServerSettings;
use filedock_models::{FileEntry, ScanConfig};
use filedock_scanner::FileScanner;
use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

impl AppState {
    /// `root_dir` must already be absolute. A relative `public_dir` is
    /// resolved against it.
    pub fn new(root_dir: PathBuf, settings: &ServerSettings) -> Self {
        let scanner = FileScanner::with_config(
            root_dir.clone(),
            Arc::new(ScanConfig::default()),
            settings.scan_max_depth,
        );
        let public_dir = root_dir.join(&settings.public_dir);

        Self {
            scanner: Arc::new(scanner),
            root_dir: Arc::new(root_dir),
            public_dir: Arc::new(public_dir),
            index_file: Arc::new(settings.index_file.clone()),
            port: settings.port,
            started_at: Instant::now(),
            public_url: Arc::new(RwLock::new(None)),
            streaming_threshold_bytes: settings.streaming_threshold_mb * 1024 * 1024,
            cache_max_age_secs: settings.cache_max_age_secs,
        }
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    pub fn set_public_url(&self, url: impl Into<String>) {
        *self.public_url.write() = Some(url.into());
    }

    pub fn public_url(&self) -> Option<String> {
        self.public_url.read().clone()
    }

    /// Rescans the root on every call so new uploads show up immediately.
    pub async fn available_files(&self) -> Result<Vec<FileEntry>, ApiError> {
        let scanner = Arc::clone(&self.scanner);
        let files = tokio::task::spawn_blocking(move || scanner.scan()).await?;
        Ok(files)
    }

    pub(crate) fn serve_options(&self) -> ServeOptions {
        ServeOptions {
            streaming_threshold_bytes: self.streaming_threshold_bytes,
            cache_max_age_secs: self.cache_max_age_secs,
        }
    }

    /// 404 body for `path`, listing what is currently downloadable.
    pub(crate) async fn not_found(&self, path: String) -> ApiError {
        match self.available_files().await {
            Ok(files) => ApiError::NotFound {
                path,
                available: files.into_iter().map(FileEntry::into_path).collect(),
            },
            Err(err) => err,
        }
    }
}
