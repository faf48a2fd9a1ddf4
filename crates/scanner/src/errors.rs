use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read directory: {0}")]
    ReadDirectory(#[from] walkdir::Error),

    #[error("Utils error: {0}")]
    UtilsError(#[from] filedock_utils::UtilsError),
}
