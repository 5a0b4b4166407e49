//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::contact_routes::{contact_routes, ContactState};
use super::cors::with_cors;
use super::observability_routes::health_routes;
use super::pages_routes::{pages_routes, PagesState};
use super::trends_routes::{trends_routes, TrendsState};

/// Shared state for every router, built by the composition root
#[derive(Clone)]
pub struct ServerStates {
    pub trends: Arc<TrendsState>,
    pub contact: Arc<ContactState>,
    pub pages: Arc<PagesState>,
}

/// HTTP server for the trends site
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(config: HttpServerConfig, states: ServerStates) -> Self {
        let router = Self::build_router(&config, states);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &HttpServerConfig, states: ServerStates) -> Router {
        Router::new()
            .merge(health_routes())
            .merge(with_cors(trends_routes(states.trends), config, "GET, OPTIONS"))
            .merge(with_cors(contact_routes(states.contact), config, "POST, OPTIONS"))
            // Pages last: it owns the fallback
            .merge(pages_routes(states.pages))
            .layer(TraceLayer::new_for_http())
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing and single-request invocation)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until Ctrl-C
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "trends server listening");
        tracing::info!("API: http://{}/api/trends", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("trends server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MailConfig;
    use crate::contact::{ContactService, MockContactMailer};
    use crate::trends::{InMemoryTrendStore, SortPolicy};

    fn states() -> ServerStates {
        ServerStates {
            trends: Arc::new(TrendsState::new(
                Arc::new(InMemoryTrendStore::new()),
                SortPolicy::Priority,
            )),
            contact: Arc::new(ContactState::new(ContactService::new(
                Arc::new(MockContactMailer::new()),
                MailConfig::default(),
            ))),
            pages: Arc::new(PagesState::new("public")),
        }
    }

    #[test]
    fn test_server_with_custom_port() {
        let server = HttpServer::new(HttpServerConfig::with_port(8080), states());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds() {
        let server = HttpServer::new(HttpServerConfig::default(), states());
        let _router = server.router();
    }
}
