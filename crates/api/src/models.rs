use serde::{Deserialize, Serialize};

pub const HEALTHY: &str = "healthy";
pub const NOT_FOUND_ERROR: &str = "File not found";
pub const INTERNAL_ERROR: &str = "Internal server error";
pub const EMPTY_LISTING_HINT: &str = "(Add files to version directories like 1.1.0/)";

/// Version string reported by `/health` and `/api/files`
pub fn runtime_version() -> String {
    format!("filedock/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    /// Seconds since startup
    pub uptime: f64,
    pub timestamp: String,  // RFC 3339
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileListResponse {
    pub files: Vec<String>,
    pub version: String,
    pub port: u16,
    pub has_tunnel: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotFoundResponse {
    pub error: String,
    pub path: String,
    pub available_endpoints: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
