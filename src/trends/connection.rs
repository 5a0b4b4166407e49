//! # Datastore Connection
//!
//! Lazily established, memoized handle to the trends database.
//!
//! The handle is owned by whoever builds the server and shared through an
//! `Arc`. Initialization runs at most once: concurrent first callers wait on
//! the same attempt. A failed attempt is not cached, so the next request
//! tries again rather than serving a poisoned handle.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use tokio::sync::OnceCell;

use super::errors::{TrendsError, TrendsResult};
use crate::config::DatabaseConfig;

/// Opens a database handle. Called at most once per successful connection.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, config: &DatabaseConfig) -> TrendsResult<Database>;
}

/// Driver connector: parse the URI, build a client, ping
#[derive(Debug, Default)]
pub struct MongoConnector;

#[async_trait]
impl Connector for MongoConnector {
    async fn connect(&self, config: &DatabaseConfig) -> TrendsResult<Database> {
        let mut options = ClientOptions::parse(&config.uri).await.map_err(|e| {
            tracing::error!(error = %e, "invalid datastore uri");
            TrendsError::Connection(e.to_string())
        })?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)
            .map_err(|e| TrendsError::Connection(e.to_string()))?;
        let database = client.database(&config.database);

        // The driver connects lazily; ping so an unreachable endpoint fails here.
        database.run_command(doc! { "ping": 1 }).await.map_err(|e| {
            tracing::error!(error = %e, database = %config.database, "datastore connection failed");
            TrendsError::Connection(e.to_string())
        })?;

        tracing::info!(database = %config.database, "datastore connected");
        Ok(database)
    }
}

/// Memoizing accessor for the trends database handle
pub struct TrendsConnection {
    config: DatabaseConfig,
    connector: Arc<dyn Connector>,
    database: OnceCell<Database>,
}

impl TrendsConnection {
    /// Create an accessor; no connection is made until [`Self::handle`] is called
    pub fn new(config: DatabaseConfig) -> Self {
        Self::with_connector(config, Arc::new(MongoConnector))
    }

    pub fn with_connector(config: DatabaseConfig, connector: Arc<dyn Connector>) -> Self {
        Self {
            config,
            connector,
            database: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Whether a handle has already been established
    pub fn is_connected(&self) -> bool {
        self.database.initialized()
    }

    /// Return the cached handle, connecting on first use
    pub async fn handle(&self) -> TrendsResult<&Database> {
        self.database
            .get_or_try_init(|| self.connector.connect(&self.config))
            .await
    }
}
