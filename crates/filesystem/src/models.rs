/// Filesystem helpers for the served content root
pub struct FileSystem;
