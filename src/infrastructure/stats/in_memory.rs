// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::services::stats_service::{StatsSink, StatsSnapshot};

/// 进程内统计存储
///
/// 总数使用原子计数，各格式计数存放在 DashMap 中
pub struct InMemoryStatsStore {
    started_at: DateTime<Utc>,
    total: AtomicU64,
    per_format: DashMap<String, u64>,
}

impl InMemoryStatsStore {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            total: AtomicU64::new(0),
            per_format: DashMap::new(),
        }
    }
}

impl Default for InMemoryStatsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatsSink for InMemoryStatsStore {
    async fn increment(&self, format: &str) {
        self.total.fetch_add(1, Ordering::Relaxed);
        *self.per_format.entry(format.to_string()).or_insert(0) += 1;
        metrics::counter!("fluxgate_requests_total", "format" => format.to_string()).increment(1);
    }

    async fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            total_requests: self.total.load(Ordering::Relaxed),
            uptime: self.started_at.to_rfc3339_opts(SecondsFormat::Millis, true),
            format_counts: self
                .per_format
                .iter()
                .map(|entry| (entry.key().clone(), *entry.value()))
                .collect(),
        }
    }
}
