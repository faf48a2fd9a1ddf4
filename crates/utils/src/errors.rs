use thiserror::Error;

#[derive(Error, Debug)]
pub enum UtilsError {
    #[error("Path {path} is not inside {root}")]
    OutsideRoot { path: String, root: String },

    #[error("Path conversion error: {0}")]
    PathConversionError(String),
}
