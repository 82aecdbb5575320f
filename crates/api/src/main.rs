use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{extract::Request, ServiceExt};

use fedsvc_api::AppConfig;
use fedsvc_core::FederationRepository;
use fedsvc_infra::{InMemoryFederationRepository, RandomFaults};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fedsvc_observability::init();

    let config = AppConfig::from_env()?;
    if config.auth_token().is_dev_default() {
        tracing::warn!("AUTH_TOKEN not set; using insecure dev default");
    }

    let mut repository = InMemoryFederationRepository::seeded();
    if let Some(one_in) = config.setup_fault_one_in() {
        tracing::warn!(one_in, "injecting random repository setup failures");
        repository = repository.set_faults(Arc::new(RandomFaults::new(one_in)));
    }
    let repository: Arc<dyn FederationRepository> = Arc::new(repository);

    let app = fedsvc_api::build_app(config.auth_token().clone(), repository);

    let listener = tokio::net::TcpListener::bind(config.addr())
        .await
        .with_context(|| format!("failed to bind {}", config.addr()))?;

    tracing::info!("starting server on {}", listener.local_addr()?);

    let service = ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app);
    if let Err(e) = axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        return Err(e.into());
    }

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
