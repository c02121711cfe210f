use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/config — the loaded `wpnav.yaml` plus its validation warnings.
///
/// Read-only: the file is edited by hand or with `wpnav init`.
pub async fn get_config(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let warnings = app.config.validate();
    Ok(Json(serde_json::json!({
        "config": serde_json::to_value(&*app.config)?,
        "warnings": warnings,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wpnav_core::config::Config;

    #[tokio::test]
    async fn get_config_returns_loaded_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let app = AppState::with_config(
            dir.path().to_path_buf(),
            Config::new("https://cms.example.com"),
        )
        .unwrap();
        let json = get_config(State(app)).await.unwrap().0;
        assert_eq!(json["config"]["backend"]["api_url"], "https://cms.example.com");
        assert_eq!(json["config"]["menus"]["secondary"], "second-menu");
        assert_eq!(json["warnings"], serde_json::json!([]));
    }
}
