//! HTTP API application wiring (Axum router + repository injection).
//!
//! Layout:
//! - `codec.rs`: JSON body decoding and the response envelope
//! - `errors.rs`: repository/codec failures to status + envelope
//! - `route_group.rs`: base path + middleware chain per group of routes
//! - `routes/`: HTTP handlers

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    routing::get,
    Extension, Router,
};
use tower::Layer;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

use fedsvc_auth::SharedSecret;
use fedsvc_core::{FederationRepository, RepositoryError};

pub mod codec;
pub mod errors;
pub mod route_group;
pub mod routes;

/// The complete service: router behind trailing-slash normalization.
pub type App = NormalizePath<Router>;

/// Per-request dependencies, injected as an extension.
#[derive(Clone)]
pub struct AppState {
    repository: Arc<dyn FederationRepository>,
}

impl AppState {
    pub fn new(repository: Arc<dyn FederationRepository>) -> Self {
        Self { repository }
    }

    /// Run backend setup and hand out the repository.
    ///
    /// A failure here is a backend-unavailable condition, distinct from any
    /// error an operation on the repository reports.
    pub fn acquire(&self) -> Result<Arc<dyn FederationRepository>, RepositoryError> {
        self.repository.setup()?;
        Ok(Arc::clone(&self.repository))
    }
}

/// Build the full HTTP service (public entrypoint used by `main.rs`).
pub fn build_app(secret: SharedSecret, repository: Arc<dyn FederationRepository>) -> App {
    let state = AppState::new(repository);

    let router = Router::new()
        .route("/health-check", get(routes::system::health_check))
        .merge(routes::federations_group(secret).into_router())
        .layer(Extension(state))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            let origin = origin.as_bytes();
            origin.starts_with(b"https://") || origin.starts_with(b"http://")
        }))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .allow_credentials(true)
        .max_age(Duration::from_secs(300))
}
