//! HTTP listener setup.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;

use super::routes::create_router;
use crate::config::Config;
use crate::error::Result;
use crate::utils::shutdown_signal;

/// Address the listener binds for a given port (all interfaces).
pub fn listen_addr(port: u16) -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], port))
}

/// Bind the listener on the configured port.
pub async fn bind(config: &Config) -> Result<TcpListener> {
    let listener = TcpListener::bind(listen_addr(config.port)).await?;
    Ok(listener)
}

/// Serve the API on an already bound listener until shutdown is signalled.
pub async fn serve_on(listener: TcpListener) -> Result<()> {
    let port = listener.local_addr()?.port();
    info!("Servidor corriendo en puerto {}", port);

    axum::serve(listener, create_router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Servidor detenido");
    Ok(())
}

/// Bind on `config.port` and serve until Ctrl+C / SIGTERM.
pub async fn serve(config: &Config) -> Result<()> {
    let listener = bind(config).await?;
    serve_on(listener).await
}
