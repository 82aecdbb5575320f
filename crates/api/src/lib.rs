//! HTTP API: routing, authorization, JSON envelope and the federation handlers.

pub mod app;
pub mod config;
pub mod middleware;

pub use app::{build_app, App, AppState};
pub use config::AppConfig;
