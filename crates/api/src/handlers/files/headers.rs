use axum::http::{header, HeaderMap, HeaderValue};
use filedock_models::is_binary_file;

/// Headers every static response carries, plus the attachment policy for
/// installer binaries.
pub fn apply_static_headers(headers: &mut HeaderMap, file_name: &str, cache_max_age_secs: u64) {
    if is_binary_file(file_name) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/octet-stream"),
        );
        headers.insert(header::CONTENT_DISPOSITION, content_disposition(file_name));
        headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    }

    if let Ok(value) = HeaderValue::from_str(&format!("public, max-age={}", cache_max_age_secs)) {
        headers.insert(header::CACHE_CONTROL, value);
    }
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
}

/// `attachment; filename="..."`, with an RFC 5987 `filename*` when the name
/// is not plain ASCII.
pub fn content_disposition(file_name: &str) -> HeaderValue {
    let plain = file_name
        .chars()
        .all(|c| c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\');

    let value = if plain {
        format!("attachment; filename=\"{}\"", file_name)
    } else {
        let fallback: String = file_name
            .chars()
            .map(|c| {
                if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!(
            "attachment; filename=\"{}\"; filename*=UTF-8''{}",
            fallback,
            urlencoding::encode(file_name)
        )
    };

    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}
