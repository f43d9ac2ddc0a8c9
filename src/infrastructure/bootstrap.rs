//! Composition root: wires stores, registry and router, and runs the server.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::adapter::inbound::http::build_router;
use crate::adapter::outbound::memory::MemoryPersonaStore;
use crate::adapter::outbound::sqlite::database::connection;
use crate::adapter::outbound::sqlite::store::SqlitePersonaStore;
use crate::application::registry::ContactRegistry;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::store::PersonaStore;

/// Which store backs the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    /// The configured SQLite database.
    Sqlite,
    /// A process-local map, lost on exit.
    Memory,
}

/// Bind the configured address and serve until SIGINT/SIGTERM.
///
/// # Errors
///
/// Returns an error if the address cannot be bound, the database cannot be
/// opened, or the server fails.
pub async fn serve(config: &Config, store: StoreKind) -> Result<()> {
    let listener = TcpListener::bind(config.bind_addr()?).await?;
    let max_body_bytes = config.server.max_body_bytes;

    match store {
        StoreKind::Sqlite => {
            let db_config = config.database.clone();
            let pool = tokio::task::spawn_blocking(move || connection::open(&db_config)).await??;
            serve_with(
                listener,
                SqlitePersonaStore::new(pool),
                max_body_bytes,
                shutdown_signal(),
            )
            .await
        }
        StoreKind::Memory => {
            warn!("Using in-memory store; records are lost on exit");
            serve_with(
                listener,
                MemoryPersonaStore::new(),
                max_body_bytes,
                shutdown_signal(),
            )
            .await
        }
    }
}

/// Serve the API over `store` on an already-bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns an error if the server fails while accepting connections.
pub async fn serve_with<S, F>(
    listener: TcpListener,
    store: S,
    max_body_bytes: usize,
    shutdown: F,
) -> Result<()>
where
    S: PersonaStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    let router = build_router(Arc::new(ContactRegistry::new(store)), max_body_bytes);

    info!(%addr, "agenda listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!("agenda stopped");
    Ok(())
}

/// Resolve on SIGINT, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "SIGTERM handler unavailable");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
