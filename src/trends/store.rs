//! # Trend Store
//!
//! Read-only access to the trends collection.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document};

use super::connection::TrendsConnection;
use super::document::record_from_document;
use super::errors::{TrendsError, TrendsResult};
use super::model::TrendRecord;

/// Collection query seam used by the HTTP handlers
#[async_trait]
pub trait TrendStore: Send + Sync {
    /// Every record in the collection, in whatever order the store returns
    async fn list_all(&self) -> TrendsResult<Vec<TrendRecord>>;

    /// The record for an already-uppercased country code
    async fn find_by_country(&self, code: &str) -> TrendsResult<Option<TrendRecord>>;
}

/// MongoDB-backed store
pub struct MongoTrendStore {
    connection: Arc<TrendsConnection>,
}

impl MongoTrendStore {
    pub fn new(connection: Arc<TrendsConnection>) -> Self {
        Self { connection }
    }

    async fn collection(&self) -> TrendsResult<mongodb::Collection<Document>> {
        let database = self.connection.handle().await?;
        Ok(database.collection::<Document>(&self.connection.config().collection))
    }
}

#[async_trait]
impl TrendStore for MongoTrendStore {
    async fn list_all(&self) -> TrendsResult<Vec<TrendRecord>> {
        let collection = self.collection().await?;
        let documents: Vec<Document> = collection.find(doc! {}).await?.try_collect().await?;

        Ok(normalize_all(&documents))
    }

    async fn find_by_country(&self, code: &str) -> TrendsResult<Option<TrendRecord>> {
        let collection = self.collection().await?;
        let document = collection.find_one(doc! { "country_code": code }).await?;

        Ok(document.as_ref().and_then(record_from_document))
    }
}

/// In-memory store, loadable from a JSON fixture
#[derive(Debug, Default)]
pub struct InMemoryTrendStore {
    records: Vec<TrendRecord>,
}

impl InMemoryTrendStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<TrendRecord>) -> Self {
        Self { records }
    }

    /// Parse a JSON array of stored documents.
    ///
    /// Documents go through the same normalization as MongoDB results.
    pub fn from_json(text: &str) -> TrendsResult<Self> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| TrendsError::MalformedFixture(e.to_string()))?;
        let items = value
            .as_array()
            .ok_or_else(|| TrendsError::MalformedFixture("expected a JSON array".to_string()))?;

        let documents = items
            .iter()
            .map(|item| {
                mongodb::bson::to_document(item)
                    .map_err(|e| TrendsError::MalformedFixture(e.to_string()))
            })
            .collect::<TrendsResult<Vec<_>>>()?;

        Ok(Self::with_records(normalize_all(&documents)))
    }

    /// Load a fixture file
    pub async fn from_file(path: &Path) -> TrendsResult<Self> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            TrendsError::MalformedFixture(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&text)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl TrendStore for InMemoryTrendStore {
    async fn list_all(&self) -> TrendsResult<Vec<TrendRecord>> {
        Ok(self.records.clone())
    }

    async fn find_by_country(&self, code: &str) -> TrendsResult<Option<TrendRecord>> {
        Ok(self
            .records
            .iter()
            .find(|r| r.country_code == code)
            .cloned())
    }
}

fn normalize_all(documents: &[Document]) -> Vec<TrendRecord> {
    documents
        .iter()
        .filter_map(|document| {
            let record = record_from_document(document);
            if record.is_none() {
                tracing::warn!(id = ?document.get("_id"), "skipping trend document without country_code");
            }
            record
        })
        .collect()
}
