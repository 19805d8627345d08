// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use fluxgate::config::settings::Settings;
use fluxgate::domain::services::stats_service::StatsSink;
use fluxgate::engines::reqwest_engine::ReqwestEngine;
use fluxgate::engines::traits::UpstreamFetcher;
use fluxgate::infrastructure::stats::in_memory::InMemoryStatsStore;
use fluxgate::presentation::routes;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use fluxgate::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting fluxgate...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    fluxgate::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Upstream engine and stats sink
    let fetcher: Arc<dyn UpstreamFetcher> = Arc::new(ReqwestEngine::new(&settings.proxy)?);
    let stats: Arc<dyn StatsSink> = Arc::new(InMemoryStatsStore::new());
    info!(
        "Upstream engine '{}' ready (stealth: {})",
        fetcher.name(),
        settings.proxy.stealth
    );

    // 4. Start HTTP server
    let app = routes::app(settings.clone(), fetcher, stats);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
