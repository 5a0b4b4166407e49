//! Contact HTTP Routes

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;

use super::cors::preflight_handler;
use super::errors::{method_not_allowed_handler, ApiError};
use crate::contact::{ContactError, ContactRequest, ContactService};

/// Contact state shared across handlers
pub struct ContactState {
    pub service: ContactService,
}

impl ContactState {
    pub fn new(service: ContactService) -> Self {
        Self { service }
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
}

/// Create contact routes
pub fn contact_routes(state: Arc<ContactState>) -> Router {
    Router::new()
        .route(
            "/api/contact",
            post(contact_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .with_state(state)
}

async fn contact_handler(
    State(state): State<Arc<ContactState>>,
    payload: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<ContactResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ContactError::MalformedBody(e.body_text()))?;

    state.service.submit(request).await?;

    Ok(Json(ContactResponse {
        success: true,
        message: "Email sent successfully".to_string(),
    }))
}
