use std::sync::Arc;
use tracing::{info, warn};

use autores_core::{backend::AuthorBackendBuilder, seed, store::AuthorStore};
use autores_memory::InMemoryBackend;
use autores_server::{ServerConfig, router, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;
    config.validate()?;

    telemetry::init_logging(&config.log)?;

    let authors = if config.seed { seed::authors() } else { Vec::new() };
    let backend = InMemoryBackend::builder()
        .with_authors(authors)
        .build()
        .await?;
    let store = Arc::new(AuthorStore::new(backend));

    let addr = config.http_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, seed = config.seed, "Servidor iniciado");

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Servidor detenido");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}
