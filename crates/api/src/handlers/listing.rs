use super::models::AppState;
use crate::errors::ApiError;
use crate::models::{runtime_version, FileListResponse};
use axum::{extract::State, response::Json};
use filedock_models::FileEntry;

pub async fn list_files(State(state): State<AppState>) -> Result<Json<FileListResponse>, ApiError> {
    let files = state.available_files().await?;
    let public_url = state.public_url();

    Ok(Json(FileListResponse {
        files: files.into_iter().map(FileEntry::into_path).collect(),
        version: runtime_version(),
        port: state.port,
        has_tunnel: public_url.is_some(),
        public_url,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedock_config::ServerSettings;
    use std::fs;

    #[tokio::test]
    async fn test_listing_reflects_tunnel_state() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("1.2.0")).unwrap();
        fs::write(dir.path().join("1.2.0/App.dmg"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();

        let settings = ServerSettings::default();
        let state = AppState::new(dir.path().to_path_buf(), &settings);

        let Json(before) = list_files(State(state.clone())).await.unwrap();
        assert_eq!(before.files, vec!["/1.2.0/App.dmg"]);
        assert_eq!(before.port, settings.port);
        assert!(!before.has_tunnel);
        assert!(before.public_url.is_none());

        state.set_public_url("https://abcd.lhr.life");
        let Json(after) = list_files(State(state)).await.unwrap();
        assert!(after.has_tunnel);
        assert_eq!(after.public_url.as_deref(), Some("https://abcd.lhr.life"));
    }

    #[tokio::test]
    async fn test_listing_picks_up_new_files() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf(), &ServerSettings::default());

        assert!(state.available_files().await.unwrap().is_empty());
        fs::write(dir.path().join("Setup.exe"), b"MZ").unwrap();
        let Json(listing) = list_files(State(state)).await.unwrap();
        assert_eq!(listing.files, vec!["/Setup.exe"]);
    }
}
