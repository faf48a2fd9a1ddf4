use super::models::{FileScanner, ScanReport, SkippedEntry};
use filedock_models::{FileEntry, ScanConfig};
use filedock_utils::to_url_path;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::{DirEntry, WalkDir};

const DEFAULT_MAX_DEPTH: usize = 16;

impl FileScanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_config(root, Arc::new(ScanConfig::default()), DEFAULT_MAX_DEPTH)
    }

    pub fn with_config(root: impl Into<PathBuf>, config: Arc<ScanConfig>, max_depth: usize) -> Self {
        Self {
            root: root.into(),
            config,
            max_depth,
        }
    }

    /// Sorted list of downloadable files. Unreadable directories are logged
    /// and left out.
    pub fn scan(&self) -> Vec<FileEntry> {
        let report = self.scan_report();

        for skipped in &report.skipped {
            tracing::warn!(
                "Error scanning directory {}: {}",
                skipped.path.display(),
                skipped.error
            );
        }

        report.files
    }

    /// Same walk as [`FileScanner::scan`], with the failures returned to the
    /// caller instead of logged.
    pub fn scan_report(&self) -> ScanReport {
        let mut report = ScanReport::default();

        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(self.max_depth)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.is_skipped(entry));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    report.skipped.push(SkippedEntry {
                        path,
                        error: err.into(),
                    });
                    continue;
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                tracing::debug!("Skipping non UTF-8 file name: {}", entry.path().display());
                continue;
            };

            if !self.config.is_listed(file_name) {
                continue;
            }

            match to_url_path(&self.root, entry.path()) {
                Ok(url_path) => report.files.push(FileEntry::new(url_path)),
                Err(err) => report.skipped.push(SkippedEntry {
                    path: entry.path().to_path_buf(),
                    error: err.into(),
                }),
            }
        }

        report.files.sort();
        report
    }

    fn is_skipped(&self, entry: &DirEntry) -> bool {
        // The root itself is never filtered, only what lies beneath it.
        entry.depth() > 0
            && entry
                .file_name()
                .to_str()
                .map_or(true, |name| self.config.is_skipped_name(name))
    }
}
