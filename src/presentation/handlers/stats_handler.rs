// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{extract::Extension, Json};
use std::sync::Arc;

use crate::domain::models::proxy_response::ApiResponse;
use crate::domain::services::stats_service::{StatsSink, StatsSnapshot};

pub async fn stats(
    Extension(stats): Extension<Arc<dyn StatsSink>>,
) -> Json<ApiResponse<StatsSnapshot>> {
    Json(ApiResponse::ok(stats.snapshot().await))
}
