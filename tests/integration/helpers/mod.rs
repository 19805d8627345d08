// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum_test::TestServer;
use fluxgate::config::settings::Settings;
use fluxgate::domain::services::stats_service::StatsSink;
use fluxgate::engines::reqwest_engine::ReqwestEngine;
use fluxgate::engines::traits::UpstreamFetcher;
use fluxgate::infrastructure::stats::in_memory::InMemoryStatsStore;
use fluxgate::presentation::routes;
use std::sync::Arc;
use wiremock::MockServer;

pub const SAMPLE_PAGE: &str = r##"<!DOCTYPE html>
<html>
<head>
  <title>Sample   Store</title>
  <meta name="description" content="Things for sale">
  <meta property="og:title" content="Sample Store OG">
</head>
<body>
  <a href="/products">Products</a>
  <a href="#top">Top</a>
  <a href="javascript:void(0)">Noop</a>
  <img src="/static/logo.png">
  <div class="card"><h2>First</h2> item</div>
  <div class="card">Second item</div>
  <video src="/media/intro.mp4"></video>
  <script>document.write("<a href='/fake'>x</a>")</script>
</body>
</html>"##;

/// 测试应用：真实路由 + 真实上游引擎，上游由 wiremock 模拟
pub struct TestApp {
    pub server: TestServer,
    pub upstream: MockServer,
}

impl TestApp {
    /// 模拟上游上的完整地址
    pub fn upstream_url(&self, path: &str) -> String {
        format!("{}{}", self.upstream.uri(), path)
    }
}

pub async fn create_test_app() -> TestApp {
    create_test_app_with(|_| {}).await
}

pub async fn create_test_app_with(configure: impl FnOnce(&mut Settings)) -> TestApp {
    let upstream = MockServer::start().await;

    let mut settings = Settings::default();
    // wiremock listens on loopback
    settings.proxy.block_private_networks = false;
    settings.proxy.request_timeout_secs = 10;
    configure(&mut settings);

    let fetcher: Arc<dyn UpstreamFetcher> =
        Arc::new(ReqwestEngine::new(&settings.proxy).expect("engine"));
    let stats: Arc<dyn StatsSink> = Arc::new(InMemoryStatsStore::new());
    let app = routes::app(Arc::new(settings), fetcher, stats);

    TestApp {
        server: TestServer::new(app).expect("test server"),
        upstream,
    }
}
