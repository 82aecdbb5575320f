//! Route groups: a base path plus a shared middleware chain.
//!
//! Each `handle` call wraps the handler in every middleware registered so far
//! and installs it at `base_path + pattern` for one HTTP method.

use std::sync::Arc;

use axum::{
    extract::Request,
    handler::Handler,
    middleware::Next,
    routing::{on, MethodFilter, MethodRouter},
    Router,
};

use crate::middleware::Middleware;

pub struct RouteGroup {
    base_path: String,
    middlewares: Vec<Middleware>,
    router: Router,
}

impl RouteGroup {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            middlewares: Vec::new(),
            router: Router::new(),
        }
    }

    /// Append middlewares. They apply to routes registered afterwards.
    pub fn use_middleware(&mut self, middlewares: impl IntoIterator<Item = Middleware>) {
        self.middlewares.extend(middlewares);
    }

    #[cfg(test)]
    fn middleware_count(&self) -> usize {
        self.middlewares.len()
    }

    /// Bind `method` + `base_path + pattern` to `handler`.
    ///
    /// The first-registered middleware runs outermost.
    pub fn handle<H, T>(&mut self, method: MethodFilter, pattern: &str, handler: H)
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let route = wrap(on(method, handler), &self.middlewares);
        let path = self.path_for(pattern);
        let router = std::mem::take(&mut self.router);
        self.router = router.route(&path, route);
    }

    pub fn into_router(self) -> Router {
        self.router
    }

    fn path_for(&self, pattern: &str) -> String {
        let path = format!("{}{}", self.base_path, pattern);
        if path.is_empty() { "/".to_string() } else { path }
    }
}

fn wrap(mut route: MethodRouter, middlewares: &[Middleware]) -> MethodRouter {
    // Each `layer` call becomes the new outermost wrapper.
    for mw in middlewares.iter().rev() {
        let mw = Arc::clone(mw);
        route = route.layer(axum::middleware::from_fn(move |req: Request, next: Next| {
            mw(req, next)
        }));
    }
    route
}
