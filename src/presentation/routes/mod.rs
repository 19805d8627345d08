// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{middleware, routing::get, Extension, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::application::usecases::extract_content::ExtractContentUseCase;
use crate::application::usecases::proxy_passthrough::ProxyPassthroughUseCase;
use crate::config::settings::Settings;
use crate::domain::services::stats_service::StatsSink;
use crate::engines::traits::UpstreamFetcher;
use crate::presentation::handlers::{extract_handler, proxy_handler, stats_handler};
use crate::presentation::middleware::cors_middleware::cors_middleware;

/// 创建应用路由
///
/// `/api` 下的所有响应都会经过 CORS 中间件
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let api_routes = Router::new()
        .route("/api/proxy", get(proxy_handler::proxy))
        .route("/api/extract", get(extract_handler::extract_by_query))
        .route("/api/stats", get(stats_handler::stats))
        .route("/api/{format}", get(extract_handler::extract_by_path))
        .layer(middleware::from_fn(cors_middleware));

    Router::new().merge(public_routes).merge(api_routes)
}

/// 组装完整应用：路由 + 共享组件 + 请求追踪
///
/// # 参数
///
/// * `settings` - 应用配置
/// * `fetcher` - 上游抓取引擎
/// * `stats` - 统计汇聚端
pub fn app(
    settings: Arc<Settings>,
    fetcher: Arc<dyn UpstreamFetcher>,
    stats: Arc<dyn StatsSink>,
) -> Router {
    let extract = Arc::new(ExtractContentUseCase::new(
        fetcher.clone(),
        &settings.proxy,
    ));
    let passthrough = Arc::new(ProxyPassthroughUseCase::new(fetcher, &settings.proxy));

    routes()
        .layer(Extension(extract))
        .layer(Extension(passthrough))
        .layer(Extension(stats))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
