//! HTTP server — router construction and the listen loop.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use chrono::{DateTime, Utc};
use tower_http::trace::TraceLayer;

use prefetch_probe::{CounterStore, MemoryStash, PrefetchProbe};

use crate::config::{ServerConfig, HEALTH_ROUTE};
use crate::error::{ServerError, ServerResult};
use crate::handler::{handle_health, handle_probe};

/// Shared server state passed to all handlers via axum State.
pub struct AppState {
    pub probe: PrefetchProbe,
    pub started_at: DateTime<Utc>,
}

/// The probe fixture server.
pub struct ProbeServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl ProbeServer {
    /// Create a server with a fresh in-memory stash.
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(MemoryStash::new()))
    }

    /// Create a server over an existing stash.
    pub fn with_store(config: ServerConfig, store: Arc<dyn CounterStore>) -> Self {
        let probe = PrefetchProbe::new(store, config.route.clone());
        Self {
            config,
            state: Arc::new(AppState {
                probe,
                started_at: Utc::now(),
            }),
        }
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route(&self.config.route, get(handle_probe))
            .route(HEALTH_ROUTE, get(handle_health))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the HTTP server on the configured address.
    pub async fn run(&self) -> ServerResult<()> {
        self.config.validate()?;
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&self.config.addr)
            .await
            .map_err(ServerError::Io)?;

        tracing::info!(
            "Prefetch probe listening on http://{}{}",
            self.config.addr,
            self.config.route
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Transport(e.to_string()))?;

        Ok(())
    }
}
