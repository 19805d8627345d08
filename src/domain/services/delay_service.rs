// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::time::Duration;
use tracing::debug;

/// 附加抖动的上限（毫秒）
pub const MAX_JITTER_MS: u64 = 250;

/// 不大于该值的 `delay` 参数按秒解释，更大的值按毫秒解释
const SECONDS_THRESHOLD: u64 = 10;

/// 将 `delay` 查询参数换算为延迟时长，并截断到上限
pub fn delay_from_param(value: u64, max_delay_ms: u64) -> Duration {
    let millis = if value <= SECONDS_THRESHOLD {
        value.saturating_mul(1000)
    } else {
        value
    };
    Duration::from_millis(millis.min(max_delay_ms))
}

/// 延迟闸门
///
/// 在上游抓取前挂起当前请求 `delay` 加上随机抖动；
/// 使用异步休眠，不会阻塞其他并发请求
pub async fn hold(delay: Duration) -> Duration {
    if delay.is_zero() {
        return Duration::ZERO;
    }
    let total = delay + Duration::from_millis(rand::random_range(0..=MAX_JITTER_MS));
    debug!("延迟闸门挂起 {} ms", total.as_millis());
    tokio::time::sleep(total).await;
    total
}
