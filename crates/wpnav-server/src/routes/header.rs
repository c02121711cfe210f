use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/header — composed navigation for every header surface.
///
/// Always 200: backend failures show up as empty menus and in `degraded`.
pub async fn get_header(State(app): State<AppState>) -> Result<Json<serde_json::Value>, AppError> {
    let data = app.client.load_header().await;
    if data.is_degraded() {
        tracing::info!(degraded = ?data.degraded, "serving degraded header");
    }
    let view = data.compose(&app.config);
    Ok(Json(serde_json::json!({
        "fetched_at": data.fetched_at,
        "header": serde_json::to_value(&view)?,
    })))
}
