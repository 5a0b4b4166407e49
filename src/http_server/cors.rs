//! CORS for the API routers
//!
//! `CorsLayer` answers every `OPTIONS` request and sets the allowed origin.
//! The allowed methods and headers are stamped over every response, preflight
//! included, so plain requests carry them too.

use axum::{
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, CONTENT_TYPE},
        HeaderValue, Method, StatusCode,
    },
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use super::config::{HttpServerConfig, ANY_ORIGIN};

/// Check one configured origin: `scheme://host[:port]`, no path.
pub fn parse_origin(origin: &str) -> Result<HeaderValue, String> {
    if origin == ANY_ORIGIN {
        return Ok(HeaderValue::from_static(ANY_ORIGIN));
    }

    let rest = origin
        .strip_prefix("https://")
        .or_else(|| origin.strip_prefix("http://"))
        .ok_or_else(|| format!("origin '{}' must start with http:// or https://", origin))?;
    if rest.is_empty() || rest.contains('/') {
        return Err(format!("origin '{}' must be scheme://host[:port]", origin));
    }

    HeaderValue::from_str(origin).map_err(|e| format!("origin '{}': {}", origin, e))
}

/// Build the CORS layer for the configured origin policy
pub fn cors_layer(config: &HttpServerConfig, methods: &[Method]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods(methods.to_vec())
        .allow_headers([CONTENT_TYPE]);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match parse_origin(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

/// Wrap a router with CORS for the given comma separated method list
/// (e.g. `"GET, OPTIONS"`).
pub fn with_cors(router: Router, config: &HttpServerConfig, allow_methods: &'static str) -> Router {
    let methods: Vec<Method> = allow_methods
        .split(',')
        .filter_map(|m| m.trim().parse().ok())
        .collect();

    router
        .layer(cors_layer(config, &methods))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(allow_methods),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}

/// `OPTIONS` route handler, reached only when no CORS layer wraps the route
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}
