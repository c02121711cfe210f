use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use wpnav_core::error::NavError;

// ---------------------------------------------------------------------------
// Internal sentinel for explicit 400 Bad Request errors
// ---------------------------------------------------------------------------

/// Carries an explicit HTTP 400 through the `anyhow::Error` chain for
/// request problems that have no `NavError` counterpart.
#[derive(Debug)]
struct BadRequestError(String);

impl std::fmt::Display for BadRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for BadRequestError {}

// ---------------------------------------------------------------------------
// AppError
// ---------------------------------------------------------------------------

/// Unified error type for HTTP responses.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self(BadRequestError(msg.into()).into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(b) = self.0.downcast_ref::<BadRequestError>() {
            let body = serde_json::json!({ "error": b.0.clone() });
            return (StatusCode::BAD_REQUEST, axum::Json(body)).into_response();
        }

        let status = if let Some(e) = self.0.downcast_ref::<NavError>() {
            match e {
                NavError::NotConfigured
                | NavError::InvalidConfig(_)
                | NavError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
                NavError::MegaMenuNotFound(_) => StatusCode::NOT_FOUND,
                NavError::Http { .. }
                | NavError::Timeout { .. }
                | NavError::Status { .. }
                | NavError::Payload { .. } => StatusCode::BAD_GATEWAY,
                NavError::Io(_) | NavError::Yaml(_) | NavError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "request failed");
        }
        let body = serde_json::json!({ "error": self.0.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: NavError) -> StatusCode {
        AppError(err.into()).into_response().status()
    }

    #[test]
    fn not_configured_maps_to_400() {
        assert_eq!(status_of(NavError::NotConfigured), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_url_maps_to_400() {
        assert_eq!(
            status_of(NavError::InvalidUrl("ftp://x".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn mega_menu_not_found_maps_to_404() {
        assert_eq!(
            status_of(NavError::MegaMenuNotFound("Nope".into())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn upstream_failures_map_to_502() {
        assert_eq!(
            status_of(NavError::Timeout {
                url: "http://cms/mega".into(),
                timeout_ms: 5000
            }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_of(NavError::Status {
                url: "http://cms/mega".into(),
                status: 500
            }),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn io_error_maps_to_500() {
        let io_err = std::io::Error::other("disk full");
        assert_eq!(status_of(NavError::Io(io_err)), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn non_nav_error_maps_to_500() {
        let response = AppError(anyhow::anyhow!("something unexpected")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_request_constructor_maps_to_400() {
        let response = AppError::bad_request("title must not be empty").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn response_body_is_json() {
        let response = AppError(NavError::NotConfigured.into()).into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().contains("application/json"));
    }
}
