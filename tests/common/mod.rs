//! Shared helpers for HTTP integration tests

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use realtime_keyword::config::MailConfig;
use realtime_keyword::contact::{ContactMailer, ContactService, MockContactMailer};
use realtime_keyword::http_server::{
    ContactState, HttpServer, HttpServerConfig, PagesState, ServerStates, TrendsState,
};
use realtime_keyword::trends::{InMemoryTrendStore, SortPolicy, TrendStore};

/// Router over the given store with a mock mailer and no public dir
pub fn router_with_store(store: Arc<dyn TrendStore>, policy: SortPolicy) -> Router {
    router_with(
        HttpServerConfig::default(),
        store,
        policy,
        Arc::new(MockContactMailer::new()),
        Path::new("public"),
    )
}

/// Empty store and mock mailer behind the given server config
pub fn router_with_config(config: HttpServerConfig) -> Router {
    router_with(
        config,
        Arc::new(InMemoryTrendStore::new()),
        SortPolicy::Priority,
        Arc::new(MockContactMailer::new()),
        Path::new("public"),
    )
}

pub fn router_with_mailer(mailer: Arc<dyn ContactMailer>) -> Router {
    router_with(
        HttpServerConfig::default(),
        Arc::new(InMemoryTrendStore::new()),
        SortPolicy::Priority,
        mailer,
        Path::new("public"),
    )
}

pub fn router_with_public_dir(public_dir: &Path) -> Router {
    router_with(
        HttpServerConfig::default(),
        Arc::new(InMemoryTrendStore::new()),
        SortPolicy::Priority,
        Arc::new(MockContactMailer::new()),
        public_dir,
    )
}

fn router_with(
    config: HttpServerConfig,
    store: Arc<dyn TrendStore>,
    policy: SortPolicy,
    mailer: Arc<dyn ContactMailer>,
    public_dir: &Path,
) -> Router {
    let mail_config = MailConfig {
        recipient: "owner@example.com".to_string(),
        ..MailConfig::default()
    };

    let states = ServerStates {
        trends: Arc::new(TrendsState::new(store, policy)),
        contact: Arc::new(ContactState::new(ContactService::new(mailer, mail_config))),
        pages: Arc::new(PagesState::new(public_dir)),
    };

    HttpServer::new(config, states).router()
}

/// Response pieces the tests look at
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.bytes.clone()).unwrap()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn send(router: Router, request: Request<Body>) -> TestResponse {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        bytes,
    }
}

pub async fn get(router: Router, uri: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .header("origin", "https://site.example")
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

pub async fn post_json(router: Router, uri: &str, body: &str) -> TestResponse {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

/// GET with an explicit `Origin` header
pub async fn get_from_origin(router: Router, uri: &str, origin: &str) -> TestResponse {
    let request = Request::builder()
        .uri(uri)
        .header("origin", origin)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}

pub async fn request(router: Router, method: &str, uri: &str) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(router, request).await
}
