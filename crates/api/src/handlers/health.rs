use super::models::AppState;
use crate::models::{runtime_version, HealthResponse, HEALTHY};
use axum::{extract::State, response::Json};
use chrono::{SecondsFormat, Utc};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTHY.to_string(),
        uptime: state.uptime().as_secs_f64(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        version: runtime_version(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use filedock_config::ServerSettings;

    #[tokio::test]
    async fn test_health_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(dir.path().to_path_buf(), &ServerSettings::default());

        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "healthy");
        assert!(body.uptime >= 0.0);
        assert!(chrono::DateTime::parse_from_rfc3339(&body.timestamp).is_ok());
        assert_eq!(body.version, runtime_version());
    }
}
