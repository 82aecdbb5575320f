use axum::http::StatusCode;

/// Liveness probe; empty body, no auth.
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
