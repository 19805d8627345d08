// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 请求统计快照
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total_requests: u64,
    /// 统计起点（RFC 3339）
    pub uptime: String,
    pub format_counts: BTreeMap<String, u64>,
}

/// 统计汇聚端
///
/// 核心流程只发出递增调用，不等待也不依赖其结果；
/// 实现方自行保证并发下的原子性
#[async_trait]
pub trait StatsSink: Send + Sync {
    /// 记录一次指定格式的请求
    async fn increment(&self, format: &str);

    /// 读取当前统计
    async fn snapshot(&self) -> StatsSnapshot;
}

/// 以即发即忘的方式递增统计，不阻塞响应
pub fn record_request(sink: &Arc<dyn StatsSink>, format: &str) {
    let sink = Arc::clone(sink);
    let format = format.to_string();
    tokio::spawn(async move {
        sink.increment(&format).await;
    });
}
