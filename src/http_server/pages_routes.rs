//! Locale page routes
//!
//! `/` redirects to a language root picked from `Accept-Language`.
//! `/{lang}` and `/{lang}/{country}` all resolve to the single page front end;
//! every other path is looked up in the public directory and, when found,
//! served with [`ASSET_CACHE_CONTROL`].

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{
        header::{ACCEPT_LANGUAGE, CACHE_CONTROL},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

/// Languages the front end is translated into; the first is the default
pub const SUPPORTED_LANGUAGES: [&str; 7] = ["en", "de", "fr", "ja", "ko", "no", "sv"];

/// Countries that have a page route (lowercase)
pub const PAGE_COUNTRIES: [&str; 11] = [
    "us", "ca", "au", "gb", "de", "fr", "no", "se", "jp", "kr", "sg",
];

/// Static assets may be cached for an hour
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=3600";

/// Static front end location
pub struct PagesState {
    pub public_dir: PathBuf,
}

impl PagesState {
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: public_dir.into(),
        }
    }

    fn index_file(&self) -> PathBuf {
        self.public_dir.join("index.html")
    }
}

/// Create page routes. Installs the router fallback.
pub fn pages_routes(state: Arc<PagesState>) -> Router {
    Router::new()
        .route("/", get(root_redirect_handler))
        .fallback(page_or_asset_handler)
        .with_state(state)
}

/// Primary subtag of the first `Accept-Language` entry, if supported
pub fn preferred_language(accept_language: Option<&str>) -> &'static str {
    let primary = accept_language
        .and_then(|header| header.split(',').next())
        .and_then(|tag| tag.split(';').next())
        .and_then(|tag| tag.trim().split('-').next())
        .map(str::to_ascii_lowercase);

    primary
        .and_then(|lang| SUPPORTED_LANGUAGES.iter().find(|l| **l == lang).copied())
        .unwrap_or(SUPPORTED_LANGUAGES[0])
}

/// Whether `path` is `/{lang}` or `/{lang}/{country}` for supported values
pub fn is_page_path(path: &str) -> bool {
    let segments: Vec<&str> = path
        .trim_start_matches('/')
        .trim_end_matches('/')
        .split('/')
        .collect();

    match segments.as_slice() {
        [lang] => SUPPORTED_LANGUAGES.contains(lang),
        [lang, country] => SUPPORTED_LANGUAGES.contains(lang) && PAGE_COUNTRIES.contains(country),
        _ => false,
    }
}

async fn root_redirect_handler(headers: HeaderMap) -> Redirect {
    let accept = headers.get(ACCEPT_LANGUAGE).and_then(|v| v.to_str().ok());
    Redirect::temporary(&format!("/{}", preferred_language(accept)))
}

async fn page_or_asset_handler(State(state): State<Arc<PagesState>>, request: Request) -> Response {
    if is_page_path(request.uri().path()) {
        ServeFile::new(state.index_file())
            .oneshot(request)
            .await
            .into_response()
    } else {
        let mut response = ServeDir::new(&state.public_dir)
            .oneshot(request)
            .await
            .into_response();
        if response.status().is_success() {
            response
                .headers_mut()
                .insert(CACHE_CONTROL, HeaderValue::from_static(ASSET_CACHE_CONTROL));
        }
        response
    }
}
