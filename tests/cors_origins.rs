//! CORS origin policy through the full router

mod common;

use axum::http::StatusCode;

use common::{get_from_origin, router_with_config};
use realtime_keyword::config::AppConfig;
use realtime_keyword::http_server::HttpServerConfig;

#[tokio::test]
async fn test_listed_origin_is_echoed() {
    let config = HttpServerConfig::default()
        .with_cors_origins(["https://realtimekeyword.app", "http://localhost:5173"]);
    let router = router_with_config(config);

    let response = get_from_origin(router.clone(), "/api/trends", "http://localhost:5173").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.header("access-control-allow-origin"),
        Some("http://localhost:5173")
    );

    let response = get_from_origin(router, "/api/trends", "https://elsewhere.example").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), None);
}

#[tokio::test]
async fn test_wildcard_from_environment_allows_any_origin() {
    let config = AppConfig::from_lookup(|key| match key {
        "CORS_ORIGINS" => Some("*".to_string()),
        _ => None,
    })
    .unwrap();
    let router = router_with_config(config.http);

    let response = get_from_origin(router, "/api/trends", "https://anywhere.example").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}

#[test]
fn test_unparseable_origin_fails_configuration() {
    let result = AppConfig::from_lookup(|key| match key {
        "CORS_ORIGINS" => Some("https://ok.example,not an origin".to_string()),
        _ => None,
    });
    assert!(result.is_err());
}
