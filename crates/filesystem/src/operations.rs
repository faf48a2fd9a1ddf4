use super::models::FileSystem;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

impl FileSystem {
    /// Makes sure the content root exists and returns its absolute form.
    pub async fn ensure_root_directory(root_dir: &str) -> Result<PathBuf> {
        let abs_path = Self::get_absolute_path(Path::new(root_dir))?;

        if !abs_path.exists() {
            fs::create_dir_all(&abs_path).await?;
            tracing::debug!("    Created: {} (Content root)", abs_path.display());
        } else if !abs_path.is_dir() {
            bail!("Content root is not a directory: {}", abs_path.display());
        } else {
            tracing::debug!("    Exists:  {} (Content root)", abs_path.display());
        }

        Ok(abs_path)
    }

    /// Joins already-validated URL path segments onto `root`.
    pub fn build_content_path<'a, I>(root: &Path, segments: I) -> PathBuf
    where
        I: IntoIterator<Item = &'a str>,
    {
        segments
            .into_iter()
            .filter(|segment| !segment.is_empty())
            .fold(root.to_path_buf(), |path, segment| path.join(segment))
    }

    pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }
}
