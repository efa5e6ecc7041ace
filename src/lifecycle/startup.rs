//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the data store from the configured root
//! - Publish load counts as metrics
//! - Bind the listener (plain or TLS) and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: bind and certificate errors are fatal
//! - Missing or malformed data is not: the service starts with what loaded

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::broadcast;

use crate::config::ServiceConfig;
use crate::http::ApiServer;
use crate::net::{self, ListenerError};
use crate::observability::metrics;
use crate::store::DataStore;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("listener: {0}")]
    Listener(#[from] ListenerError),

    #[error("TLS: {0}")]
    Tls(std::io::Error),

    #[error("server: {0}")]
    Serve(std::io::Error),
}

/// Load the data store and build the HTTP server around it.
pub fn build_server(config: ServiceConfig) -> ApiServer {
    let store = DataStore::load(&config.data.root);
    metrics::record_store_loaded(&store);
    ApiServer::new(config, Arc::new(store))
}

/// Bind and serve `server` until `shutdown` fires.
pub async fn serve(server: ApiServer, shutdown: broadcast::Receiver<()>) -> Result<(), StartupError> {
    let listener_config = server.config().listener.clone();

    match &listener_config.tls {
        Some(tls) => {
            let addr = net::listener::bind_address(&listener_config)?;
            let rustls = net::load_tls_config(tls).await.map_err(StartupError::Tls)?;
            server.run_tls(addr, rustls, shutdown).await.map_err(StartupError::Serve)
        }
        None => {
            let listener = net::bind(&listener_config).await?;
            server.run(listener, shutdown).await.map_err(StartupError::Serve)
        }
    }
}
