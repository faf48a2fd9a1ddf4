use super::errors::ScanError;
use filedock_models::{FileEntry, ScanConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Walks a content root and lists downloadable files
#[derive(Debug, Clone)]
pub struct FileScanner {
    pub(super) root: PathBuf,
    pub(super) config: Arc<ScanConfig>,
    pub(super) max_depth: usize,
}

/// Result of one scan: the listed files plus every subtree that was dropped
#[derive(Debug, Default)]
pub struct ScanReport {
    pub files: Vec<FileEntry>,
    pub skipped: Vec<SkippedEntry>,
}

/// An entry the walk could not read; its whole subtree contributes nothing.
#[derive(Debug)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub error: ScanError,
}
