// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::StatusCode;
use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_raw_passthrough_returns_bytes_verbatim() {
    let app = create_test_app().await;
    let payload: Vec<u8> = (0u8..=255).cycle().take(64 * 1024).collect();
    Mock::given(method("GET"))
        .and(path("/file.bin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(payload.clone(), "application/octet-stream")
                .insert_header("etag", "\"v1\""),
        )
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/proxy")
        .add_query_param("url", app.upstream_url("/file.bin"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.as_bytes().as_ref(), payload.as_slice());
    assert_eq!(response.header("content-type"), "application/octet-stream");
    assert_eq!(response.header("etag"), "\"v1\"");
    assert_eq!(response.header("x-proxy-mode"), "Streaming");
    assert_eq!(response.header("cache-control"), "public, max-age=3600");
    assert_eq!(response.header("x-proxied-by"), "FluxGate/2.1");
}

#[tokio::test]
async fn test_raw_passthrough_mirrors_404_with_cors() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_raw("not here", "text/plain"))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/proxy")
        .add_query_param("url", app.upstream_url("/missing"))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.text(), "not here");
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_raw_passthrough_strips_framing_headers() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/framed"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("plain", "text/plain")
                .insert_header("content-encoding", "identity")
                .insert_header("access-control-allow-origin", "https://origin.example"),
        )
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/proxy")
        .add_query_param("url", app.upstream_url("/framed"))
        .await;

    assert_eq!(response.text(), "plain");
    assert!(response.maybe_header("content-encoding").is_none());
    assert_eq!(response.header("access-control-allow-origin"), "*");
}

#[tokio::test]
async fn test_raw_format_on_generic_route_streams() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/raw"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{\"a\":1}", "application/json"))
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/extract")
        .add_query_param("url", app.upstream_url("/raw"))
        .add_query_param("format", "raw")
        .await;

    assert_eq!(response.text(), "{\"a\":1}");
    assert_eq!(response.header("x-proxy-mode"), "Streaming");
}

#[tokio::test]
async fn test_raw_fetch_failure_reports_detail() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/proxy")
        .add_query_param("url", "http://127.0.0.1:9/")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Fetch failed");
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_raw_without_url_is_bad_request() {
    let app = create_test_app().await;

    let response = app.server.get("/api/proxy").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}
