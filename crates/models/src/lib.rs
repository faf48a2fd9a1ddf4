use filedock_utils::has_any_extension;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Installer and archive suffixes eligible for listing.
pub const DOWNLOADABLE_EXTENSIONS: &[&str] = &[
    ".msi", ".exe", ".dmg", ".pkg", ".deb", ".rpm", ".zip", ".tar.gz", ".appimage",
];

/// Suffixes always served as attachments.
pub const BINARY_EXTENSIONS: &[&str] = &[".msi", ".exe", ".dmg", ".pkg", ".deb", ".rpm"];

pub const EXCLUDED_DIRS: &[&str] = &["node_modules", "public", ".git", ".vscode", ".idea"];

/// Project metadata that never shows up in listings.
pub const EXCLUDED_FILES: &[&str] = &[
    "Cargo.toml",
    "Cargo.lock",
    "package.json",
    "package-lock.json",
    "README.md",
    "server.js",
    "filedock.toml",
    ".env",
    ".gitignore",
];

/// A downloadable artifact, addressed by its URL path (`/1.1.0/App.msi`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileEntry(String);

impl FileEntry {
    pub fn new(url_path: impl Into<String>) -> Self {
        let url_path = url_path.into();
        if url_path.starts_with('/') {
            Self(url_path)
        } else {
            Self(format!("/{}", url_path))
        }
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    pub fn into_path(self) -> String {
        self.0
    }

    /// Joins the entry onto a base URL such as `https://abcd.lhr.life`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.0)
    }
}

impl fmt::Display for FileEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inclusion and exclusion rules applied by the scanner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    pub downloadable_extensions: Vec<String>,
    pub excluded_dirs: Vec<String>,
    pub excluded_files: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            downloadable_extensions: to_owned(DOWNLOADABLE_EXTENSIONS),
            excluded_dirs: to_owned(EXCLUDED_DIRS),
            excluded_files: to_owned(EXCLUDED_FILES),
        }
    }
}

impl ScanConfig {
    /// Hidden names and excluded directory names are never descended into or listed.
    pub fn is_skipped_name(&self, name: &str) -> bool {
        name.starts_with('.') || self.excluded_dirs.iter().any(|dir| dir == name)
    }

    pub fn is_downloadable(&self, file_name: &str) -> bool {
        has_any_extension(file_name, &self.downloadable_extensions)
    }

    pub fn is_excluded_file(&self, file_name: &str) -> bool {
        self.excluded_files.iter().any(|name| name == file_name)
    }

    pub fn is_listed(&self, file_name: &str) -> bool {
        self.is_downloadable(file_name) && !self.is_excluded_file(file_name)
    }
}

pub fn is_binary_file(file_name: &str) -> bool {
    has_any_extension(file_name, BINARY_EXTENSIONS)
}

/// A process currently listening on the port the server wants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortConflict {
    pub port: u16,
    pub pids: Vec<u32>,
}

impl PortConflict {
    pub fn pid_list(&self) -> String {
        self.pids
            .iter()
            .map(|pid| pid.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn to_owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
