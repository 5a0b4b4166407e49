//! # Observability
//!
//! Structured logging through `tracing`. Request/response spans come from
//! the `TraceLayer` installed by the HTTP server.

mod logging;

pub use logging::init_logging;
