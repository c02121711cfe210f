pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router with all API routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/config", get(routes::config::get_config))
        // Navigation data
        .route("/api/header", get(routes::header::get_header))
        .route("/api/match", get(routes::lookup::match_title))
        .route("/api/normalize-url", get(routes::lookup::normalize_url))
        // HTML fragments
        .route(
            "/fragments/header.html",
            get(routes::fragments::header_fragment),
        )
        .route(
            "/fragments/drawer.html",
            get(routes::fragments::drawer_fragment),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the navigation server on `0.0.0.0:{port}`.
pub async fn serve(app_state: state::AppState, port: u16, open_browser: bool) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(app_state, listener, open_browser).await
}

/// Start the navigation server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(
    app_state: state::AppState,
    listener: tokio::net::TcpListener,
    open_browser: bool,
) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    tracing::info!(
        backend = %app_state.config.backend.api_url,
        "wpnav server listening on http://localhost:{actual_port}"
    );

    let app = build_router(app_state);

    if open_browser {
        let url = format!("http://localhost:{actual_port}/fragments/header.html");
        let _ = open::that(&url);
    }

    axum::serve(listener, app).await?;
    Ok(())
}
