//! # Trends Read Path
//!
//! Connection accessor, collection query, and response shaping for the
//! keyword-trends collection.
//!
//! ```text
//! request -> TrendsConnection -> TrendStore -> shaper -> JSON envelope
//! ```
//!
//! The read path never writes. Records are populated by an external
//! ingestion job and served as they were last written.

pub mod connection;
pub mod document;
pub mod errors;
pub mod model;
pub mod shaper;
pub mod store;

pub use connection::{Connector, MongoConnector, TrendsConnection};
pub use errors::{TrendsError, TrendsResult};
pub use model::{KeywordEntry, TrendRecord};
pub use shaper::{
    detail_response, list_response, sort_records, SortPolicy, TrendDetailResponse,
    TrendListResponse, COUNTRY_PRIORITY, NO_DATA_MESSAGE,
};
pub use store::{InMemoryTrendStore, MongoTrendStore, TrendStore};
