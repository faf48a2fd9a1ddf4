use super::headers::apply_static_headers;
use crate::errors::ApiError;
use crate::handlers::models::ServeOptions;
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use std::io::ErrorKind;
use std::path::Path;
use tokio_util::io::ReaderStream;

/// Serves a regular file from disk, either by streaming or loading into memory.
///
/// Returns `Ok(None)` when nothing servable exists at `full_path`; any other
/// I/O failure is an error.
pub async fn serve_from_disk(
    full_path: &Path,
    file_name: &str,
    options: ServeOptions,
) -> Result<Option<Response>, ApiError> {
    let metadata = match tokio::fs::metadata(full_path).await {
        Ok(metadata) => metadata,
        // Paths through a file or with over-long names cannot name anything servable.
        Err(e) if matches!(
            e.kind(),
            ErrorKind::NotFound | ErrorKind::NotADirectory | ErrorKind::InvalidFilename
        ) => {
            tracing::debug!("serve_file: No file at '{}': {}", full_path.display(), e);
            return Ok(None);
        }
        Err(e) => {
            tracing::error!(
                "serve_file: Failed to get metadata for '{}': {}",
                full_path.display(),
                e
            );
            return Err(e.into());
        }
    };

    if !metadata.is_file() {
        return Ok(None);
    }

    let mime_type = mime_guess::from_path(full_path)
        .first_or_octet_stream()
        .to_string();

    let file_size = metadata.len();
    let mut response = if file_size > options.streaming_threshold_bytes {
        stream_large_file(full_path, mime_type, file_size).await?
    } else {
        load_small_file(full_path, mime_type).await?
    };

    apply_static_headers(response.headers_mut(), file_name, options.cache_max_age_secs);
    Ok(Some(response))
}

/// Streams a large file
async fn stream_large_file(
    full_path: &Path,
    mime_type: String,
    file_size: u64,
) -> Result<Response, ApiError> {
    tracing::debug!(
        "serve_file: streaming large file ({:.2} MB)",
        file_size as f64 / 1024.0 / 1024.0
    );

    let file = tokio::fs::File::open(full_path).await.map_err(|e| {
        tracing::error!(
            "serve_file: Failed to open file '{}': {}",
            full_path.display(),
            e
        );
        ApiError::from(e)
    })?;

    // Headers are already on the wire once streaming starts; failures can only be logged.
    let display_path = full_path.display().to_string();
    let stream = ReaderStream::new(file).inspect_err(move |e| {
        tracing::error!("Error streaming '{}': {}", display_path, e);
    });

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime_type),
            (header::CONTENT_LENGTH, file_size.to_string()),
        ],
        Body::from_stream(stream),
    )
        .into_response())
}

/// Loads a small file into memory for better performance
async fn load_small_file(full_path: &Path, mime_type: String) -> Result<Response, ApiError> {
    let content = tokio::fs::read(full_path).await.map_err(|e| {
        tracing::error!(
            "serve_file: Failed to read file '{}': {}",
            full_path.display(),
            e
        );
        ApiError::from(e)
    })?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime_type)],
        content,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    const OPTIONS: ServeOptions = ServeOptions {
        streaming_threshold_bytes: 4,
        cache_max_age_secs: 60,
    };

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = serve_from_disk(&dir.path().join("nope.msi"), "nope.msi", OPTIONS)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_path_through_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("App.msi"), b"MSI").unwrap();

        let result = serve_from_disk(&dir.path().join("App.msi").join("extra"), "extra", OPTIONS)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_overlong_name_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let name = "a".repeat(1024);

        let result = serve_from_disk(&dir.path().join(&name), &name, OPTIONS)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_directory_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = serve_from_disk(dir.path(), "dir", OPTIONS).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_small_and_streamed_bodies_match_disk() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), b"abc").unwrap();
        std::fs::write(dir.path().join("b.msi"), b"0123456789").unwrap();

        let small = serve_from_disk(&dir.path().join("a.txt"), "a.txt", OPTIONS)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(small.headers()[header::CONTENT_TYPE], "text/plain");
        let body = small.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"abc");

        let large = serve_from_disk(&dir.path().join("b.msi"), "b.msi", OPTIONS)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(large.headers()[header::CONTENT_TYPE], "application/octet-stream");
        assert_eq!(large.headers()[header::CONTENT_LENGTH], "10");
        let body = large.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&body[..], b"0123456789");
    }
}
