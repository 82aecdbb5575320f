use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use fedsvc_auth::SharedSecret;

pub type BoxResponseFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Type-erased async middleware: gets the request and the rest of the chain.
pub type Middleware = Arc<dyn Fn(Request, Next) -> BoxResponseFuture + Send + Sync>;

/// Wrap an async function as a [`Middleware`].
pub fn from_fn<F, Fut>(f: F) -> Middleware
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    Arc::new(move |req: Request, next: Next| -> BoxResponseFuture { Box::pin(f(req, next)) })
}

/// Static shared-secret gate on the `Authorization` header.
///
/// A missing or mismatched value short-circuits with an empty 401; the wrapped
/// handler never runs.
pub fn authorize(secret: SharedSecret) -> Middleware {
    from_fn(move |req, next| {
        let secret = secret.clone();
        async move { authorize_request(&secret, req, next).await }
    })
}

async fn authorize_request(secret: &SharedSecret, req: Request, next: Next) -> Response {
    let presented = req
        .headers()
        .get(AUTHORIZATION)
        .map(|v| v.to_str().unwrap_or_default());

    if let Err(e) = fedsvc_auth::authorize(secret, presented) {
        tracing::warn!(
            origin = %client_origin(&req),
            reason = %e,
            "unauthorized access attempt"
        );
        return StatusCode::UNAUTHORIZED.into_response();
    }

    next.run(req).await
}

/// Caller address as seen by the listener, when it was recorded.
fn client_origin(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    fn guarded(called: Arc<AtomicBool>) -> Router {
        let mw = authorize(SharedSecret::new("s3cret"));
        Router::new()
            .route(
                "/",
                get(move || {
                    let called = Arc::clone(&called);
                    async move {
                        called.store(true, Ordering::SeqCst);
                        "ok"
                    }
                }),
            )
            .layer(axum::middleware::from_fn(move |req: Request, next: Next| mw(req, next)))
    }

    #[tokio::test]
    async fn missing_header_is_401_and_handler_not_called() {
        let called = Arc::new(AtomicBool::new(false));
        let resp = guarded(Arc::clone(&called))
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn wrong_token_is_401() {
        let called = Arc::new(AtomicBool::new(false));
        let req = axum::http::Request::builder()
            .uri("/")
            .header(AUTHORIZATION, "badToken")
            .body(Body::empty())
            .unwrap();
        let resp = guarded(Arc::clone(&called)).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(!called.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn matching_token_passes_through() {
        let called = Arc::new(AtomicBool::new(false));
        let req = axum::http::Request::builder()
            .uri("/")
            .header(AUTHORIZATION, "s3cret")
            .body(Body::empty())
            .unwrap();
        let resp = guarded(Arc::clone(&called)).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert!(called.load(Ordering::SeqCst));
    }

    #[test]
    fn origin_defaults_to_unknown() {
        let req = axum::http::Request::builder().uri("/").body(Body::empty()).unwrap();
        assert_eq!(client_origin(&req), "unknown");

        let mut req = axum::http::Request::builder().uri("/").body(Body::empty()).unwrap();
        let addr: SocketAddr = "10.0.0.7:4321".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        assert_eq!(client_origin(&req), "10.0.0.7:4321");
    }
}
