use axum::extract::{Query, State};
use axum::Json;
use wpnav_core::index::{title_key, TitleIndex};
use wpnav_core::NavError;

use crate::error::AppError;
use crate::state::AppState;

#[derive(serde::Deserialize)]
pub struct MatchParams {
    pub title: String,
}

#[derive(serde::Deserialize)]
pub struct NormalizeParams {
    pub url: String,
}

/// GET /api/match?title=<menu item title>
///
/// Unlike the header routes this one reports backend failures (502) since
/// there is nothing sensible to fall back to.
pub async fn match_title(
    State(app): State<AppState>,
    Query(params): Query<MatchParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    if params.title.trim().is_empty() {
        return Err(AppError::bad_request("title must not be empty"));
    }

    let mega_menus = app.client.fetch_mega_menus().await?;
    let index = TitleIndex::build(&mega_menus);
    let mega = index
        .lookup(&params.title)
        .ok_or_else(|| NavError::MegaMenuNotFound(params.title.clone()))?;

    Ok(Json(serde_json::json!({
        "title": params.title,
        "key": title_key(&params.title),
        "mega_menu": mega,
    })))
}

/// GET /api/normalize-url?url=<menu url>
pub async fn normalize_url(
    State(app): State<AppState>,
    Query(params): Query<NormalizeParams>,
) -> Result<Json<serde_json::Value>, AppError> {
    if params.url.trim().is_empty() {
        return Err(NavError::InvalidUrl(params.url).into());
    }
    Ok(Json(serde_json::json!({
        "input": params.url,
        "url": app.urls.normalize(&params.url),
    })))
}
