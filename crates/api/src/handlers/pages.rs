use super::files::{disk, serve_file};
use super::models::AppState;
use crate::errors::ApiError;
use axum::{
    extract::State,
    http::{Method, Uri},
    response::Response,
};

const STYLESHEET: &str = "style.css";

/// `GET /`: the index page from the public directory.
pub async fn index(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    let path = state.public_dir.join(state.index_file.as_str());
    match disk::serve_from_disk(&path, &state.index_file, state.serve_options()).await? {
        Some(response) => Ok(response),
        None => serve_file(State(state), method, uri).await,
    }
}

/// `GET /style.css`: public directory first, then the content root.
pub async fn stylesheet(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response, ApiError> {
    let path = state.public_dir.join(STYLESHEET);
    match disk::serve_from_disk(&path, STYLESHEET, state.serve_options()).await? {
        Some(response) => Ok(response),
        None => serve_file(State(state), method, uri).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use filedock_config::ServerSettings;
    use std::fs;

    #[tokio::test]
    async fn test_index_from_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("public")).unwrap();
        fs::write(dir.path().join("public/index.html"), b"<h1>hi</h1>").unwrap();
        fs::write(dir.path().join("public/style.css"), b"body{}").unwrap();
        let state = AppState::new(dir.path().to_path_buf(), &ServerSettings::default());

        let page = index(State(state.clone()), Method::GET, Uri::from_static("/"))
            .await
            .unwrap();
        assert_eq!(page.status(), StatusCode::OK);
        assert_eq!(page.headers()[header::CONTENT_TYPE], "text/html");

        let css = stylesheet(State(state), Method::GET, Uri::from_static("/style.css"))
            .await
            .unwrap();
        assert_eq!(css.headers()[header::CONTENT_TYPE], "text/css");
    }

    #[tokio::test]
    async fn test_missing_index_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf(), &ServerSettings::default());

        let err = index(State(state), Method::GET, Uri::from_static("/"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }
}
