//! # HTTP Server Module
//!
//! Combines the endpoint routers into a single Axum server.
//!
//! # Endpoints
//!
//! - `GET /api/trends` - All countries, ordered
//! - `GET /api/trends/{country}` - One country
//! - `POST /api/contact` - Contact form relay
//! - `GET /health` - Health check
//! - `GET /`, `/{lang}`, `/{lang}/{country}` - Front end pages

pub mod config;
pub mod contact_routes;
pub mod cors;
pub mod errors;
pub mod observability_routes;
pub mod pages_routes;
pub mod server;
pub mod trends_routes;

pub use config::HttpServerConfig;
pub use contact_routes::ContactState;
pub use errors::{ApiError, ErrorResponse};
pub use pages_routes::PagesState;
pub use server::{HttpServer, ServerStates};
pub use trends_routes::TrendsState;
