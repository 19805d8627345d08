// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, create_test_app_with, SAMPLE_PAGE};
use axum::http::{Method, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, ResponseTemplate};

async fn mount_page(app: &super::helpers::TestApp, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html; charset=utf-8"))
        .mount(&app.upstream)
        .await;
}

/// json 格式返回标题、meta、图片、链接与视频，地址均为绝对地址
#[tokio::test]
async fn test_json_format_extracts_page_summary() {
    let app = create_test_app().await;
    mount_page(&app, "/shop/index.html", SAMPLE_PAGE).await;
    let target = app.upstream_url("/shop/index.html");

    let response = app
        .server
        .get("/api/json")
        .add_query_param("url", &target)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.header("access-control-allow-origin"), "*");

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let data = &body["data"];
    assert_eq!(data["format"], "json");
    assert_eq!(data["title"], "Sample Store");
    assert_eq!(data["meta"]["description"], "Things for sale");
    assert_eq!(data["meta"]["og:title"], "Sample Store OG");
    assert_eq!(
        data["links"],
        serde_json::json!([app.upstream_url("/products")])
    );
    assert_eq!(
        data["images"],
        serde_json::json!([app.upstream_url("/static/logo.png")])
    );
    assert_eq!(
        data["videos"],
        serde_json::json!([app.upstream_url("/media/intro.mp4")])
    );
    assert_eq!(data["status"]["http_code"], 200);
    assert!(data["status"]["content_type"]
        .as_str()
        .unwrap()
        .starts_with("text/html"));
}

#[tokio::test]
async fn test_links_format_returns_only_links() {
    let app = create_test_app().await;
    mount_page(&app, "/", SAMPLE_PAGE).await;

    let response = app
        .server
        .get("/api/links")
        .add_query_param("url", app.upstream_url("/"))
        .await;

    let body: Value = response.json();
    let data = &body["data"];
    assert_eq!(data["links"].as_array().unwrap().len(), 1);
    assert!(data.get("images").is_none());
    assert!(data.get("title").is_none());
}

#[tokio::test]
async fn test_class_format_returns_matching_fragments() {
    let app = create_test_app().await;
    mount_page(&app, "/", SAMPLE_PAGE).await;

    let response = app
        .server
        .get("/api/class")
        .add_query_param("url", app.upstream_url("/"))
        .add_query_param("class", "card")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let elements = body["data"]["extractedElements"].as_array().unwrap();
    assert_eq!(elements.len(), 2);
    assert_eq!(elements[0]["tag"], "div");
    assert_eq!(elements[0]["innerText"], "First item");
    assert_eq!(elements[1]["innerText"], "Second item");
}

#[tokio::test]
async fn test_id_format_without_match_is_empty() {
    let app = create_test_app().await;
    mount_page(&app, "/", SAMPLE_PAGE).await;

    let response = app
        .server
        .get("/api/id")
        .add_query_param("url", app.upstream_url("/"))
        .add_query_param("id", "missing")
        .await;

    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["extractedElements"], serde_json::json!([]));
}

#[tokio::test]
async fn test_text_format_strips_markup_and_scripts() {
    let app = create_test_app().await;
    mount_page(&app, "/", SAMPLE_PAGE).await;

    let response = app
        .server
        .get("/api/text")
        .add_query_param("url", app.upstream_url("/"))
        .await;

    let body: Value = response.json();
    let text = body["data"]["text"].as_str().unwrap();
    assert!(text.contains("Second item"));
    assert!(!text.contains('<'));
    assert!(!text.contains("document.write"));
}

#[tokio::test]
async fn test_generic_route_defaults_to_json() {
    let app = create_test_app().await;
    mount_page(&app, "/", SAMPLE_PAGE).await;

    let response = app
        .server
        .get("/api/extract")
        .add_query_param("url", app.upstream_url("/"))
        .await;

    let body: Value = response.json();
    assert_eq!(body["data"]["format"], "json");
    assert_eq!(body["data"]["title"], "Sample Store");
}

#[tokio::test]
async fn test_missing_selector_fails_without_fetch() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SAMPLE_PAGE, "text/html"))
        .expect(0)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/class")
        .add_query_param("url", app.upstream_url("/"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("class"));
}

#[tokio::test]
async fn test_missing_url_is_bad_request() {
    let app = create_test_app().await;

    let response = app.server.get("/api/json").await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_unsupported_format_is_bad_request() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/pdf")
        .add_query_param("url", app.upstream_url("/"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let app = create_test_app().await;

    let response = app
        .server
        .get("/api/json")
        .add_query_param("url", "http://127.0.0.1:9/")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_private_target_is_forbidden() {
    let app = create_test_app_with(|settings| settings.proxy.block_private_networks = true).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/json")
        .add_query_param("url", app.upstream_url("/"))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_upstream_error_status_is_surfaced() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(410).set_body_raw("<title>Gone</title>", "text/html"),
        )
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/json")
        .add_query_param("url", app.upstream_url("/gone"))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["data"]["status"]["http_code"], 410);
    assert_eq!(body["data"]["title"], "Gone");
}

#[tokio::test]
async fn test_identity_headers_reach_upstream() {
    let app = create_test_app().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_exists("x-forwarded-for"))
        .and(wiremock::matchers::header("user-agent", "IntegrationBot/1.0"))
        .and(wiremock::matchers::header("referer", "https://ref.example/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SAMPLE_PAGE, "text/html"))
        .expect(1)
        .mount(&app.upstream)
        .await;

    let response = app
        .server
        .get("/api/links")
        .add_query_param("url", app.upstream_url("/"))
        .add_query_param("ua", "IntegrationBot/1.0")
        .add_query_param("referer", "https://ref.example/")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
}

/// delay=3 被解释为 3 秒，抓取前先等待
#[tokio::test]
async fn test_delay_is_honored() {
    let app = create_test_app().await;
    mount_page(&app, "/", SAMPLE_PAGE).await;

    let start = Instant::now();
    let response = app
        .server
        .get("/api/links")
        .add_query_param("url", app.upstream_url("/"))
        .add_query_param("delay", "3")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert!(start.elapsed() >= Duration::from_millis(3000));
}

#[tokio::test]
async fn test_preflight_is_answered_with_cors_headers() {
    let app = create_test_app().await;

    let response = app.server.method(Method::OPTIONS, "/api/json").await;

    assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(
        response.header("access-control-allow-methods"),
        "GET, POST, OPTIONS"
    );
    assert_eq!(response.header("x-proxied-by"), "FluxGate/2.1");
}

#[tokio::test]
async fn test_stats_count_requests_per_format() {
    let app = create_test_app().await;
    mount_page(&app, "/", SAMPLE_PAGE).await;

    for format in ["json", "json", "links"] {
        app.server
            .get(&format!("/api/{}", format))
            .add_query_param("url", app.upstream_url("/"))
            .await;
    }
    // increments are fire-and-forget
    tokio::time::sleep(Duration::from_millis(100)).await;

    let response = app.server.get("/api/stats").await;
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["totalRequests"], 3);
    assert_eq!(body["data"]["formatCounts"]["json"], 2);
    assert_eq!(body["data"]["formatCounts"]["links"], 1);
    assert!(body["data"]["uptime"].is_string());
}
