use super::validator::{is_hidden_component, validate_path_component};
use crate::errors::ApiError;

/// A request path that is safe to look up under the content root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub segments: Vec<String>,
}

impl ParsedRequest {
    pub fn file_name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }
}

/// Decodes and validates a URI path.
///
/// Returns `Ok(None)` when the path can never name a servable file: the root
/// itself, or anything going through a hidden segment.
pub fn parse_request_path(uri_path: &str) -> Result<Option<ParsedRequest>, ApiError> {
    let decoded = urlencoding::decode(uri_path)
        .map_err(|e| ApiError::InvalidPath(format!("Invalid percent-encoding: {}", e)))?;

    let mut segments = Vec::new();
    for segment in decoded.split('/') {
        if segment.is_empty() || segment == "." {
            continue;
        }
        validate_path_component(segment)?;
        if is_hidden_component(segment) {
            tracing::debug!("serve_file: refusing hidden path '{}'", uri_path);
            return Ok(None);
        }
        segments.push(segment.to_string());
    }

    if segments.is_empty() {
        return Ok(None);
    }

    Ok(Some(ParsedRequest { segments }))
}
