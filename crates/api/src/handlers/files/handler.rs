use super::{disk, parser};
use crate::errors::ApiError;
use crate::handlers::models::AppState;
use axum::{
    extract::State,
    http::{Method, Uri},
    response::Response,
};
use filedock_filesystem::FileSystem;

/// Fallback route: any path under the content root, or the JSON 404.
pub async fn serve_file(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    let request_path = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    if method != Method::GET && method != Method::HEAD {
        return Err(state.not_found(request_path).await);
    }

    let Some(parsed) = parser::parse_request_path(uri.path())? else {
        return Err(state.not_found(request_path).await);
    };

    let full_path = FileSystem::build_content_path(
        &state.root_dir,
        parsed.segments.iter().map(String::as_str),
    );
    tracing::debug!("serve_file: resolved '{}'", full_path.display());

    match disk::serve_from_disk(&full_path, parsed.file_name(), state.serve_options()).await? {
        Some(response) => Ok(response),
        None => Err(state.not_found(request_path).await),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use filedock_config::ServerSettings;
    use http_body_util::BodyExt;
    use std::fs;

    fn state_for(root: &std::path::Path) -> AppState {
        AppState::new(root.to_path_buf(), &ServerSettings::default())
    }

    async fn json_body(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_serves_installer_as_attachment() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("1.1.0")).unwrap();
        fs::write(dir.path().join("1.1.0/App.msi"), b"MSI").unwrap();

        let response = serve_file(
            State(state_for(dir.path())),
            Method::GET,
            Uri::from_static("/1.1.0/App.msi"),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"App.msi\""
        );
    }

    #[tokio::test]
    async fn test_missing_file_lists_available() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("1.1.0")).unwrap();
        fs::write(dir.path().join("1.1.0/App.msi"), b"MSI").unwrap();

        let err = serve_file(
            State(state_for(dir.path())),
            Method::GET,
            Uri::from_static("/nope?x=1"),
        )
        .await
        .unwrap_err();

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "File not found");
        assert_eq!(body["path"], "/nope?x=1");
        assert_eq!(
            body["availableEndpoints"],
            serde_json::json!(["/1.1.0/App.msi", "/health"])
        );
    }

    #[tokio::test]
    async fn test_hidden_and_directories_are_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".env"), b"SECRET=1").unwrap();
        fs::create_dir(dir.path().join("1.1.0")).unwrap();
        let state = state_for(dir.path());

        for path in ["/.env", "/1.1.0", "/"] {
            let err = serve_file(State(state.clone()), Method::GET, Uri::from_static(path))
                .await
                .unwrap_err();
            assert!(matches!(err, ApiError::NotFound { .. }), "{}", path);
        }
    }

    #[tokio::test]
    async fn test_post_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("App.exe"), b"MZ").unwrap();

        let err = serve_file(
            State(state_for(dir.path())),
            Method::POST,
            Uri::from_static("/App.exe"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
