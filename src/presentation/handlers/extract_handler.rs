// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Path, Query},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::application::dto::proxy_request::ProxyQueryDto;
use crate::application::usecases::extract_content::ExtractContentUseCase;
use crate::application::usecases::proxy_passthrough::ProxyPassthroughUseCase;
use crate::domain::models::extraction_request::OutputFormat;
use crate::domain::models::proxy_response::ApiResponse;
use crate::domain::services::stats_service::{record_request, StatsSink};
use crate::presentation::handlers::proxy_handler::stream_upstream;

/// `GET /api/{format}`：由路径决定输出格式
pub async fn extract_by_path(
    Extension(extract): Extension<Arc<ExtractContentUseCase>>,
    Extension(passthrough): Extension<Arc<ProxyPassthroughUseCase>>,
    Extension(stats): Extension<Arc<dyn StatsSink>>,
    Path(format): Path<String>,
    Query(query): Query<ProxyQueryDto>,
) -> Response {
    match format.parse::<OutputFormat>() {
        Ok(format) => dispatch(&extract, &passthrough, &stats, format, query).await,
        Err(e) => e.into_response(),
    }
}

/// `GET /api/extract?format=…`：格式来自查询参数，缺省为 `json`
pub async fn extract_by_query(
    Extension(extract): Extension<Arc<ExtractContentUseCase>>,
    Extension(passthrough): Extension<Arc<ProxyPassthroughUseCase>>,
    Extension(stats): Extension<Arc<dyn StatsSink>>,
    Query(query): Query<ProxyQueryDto>,
) -> Response {
    let format = match query.format.as_deref().map(str::trim) {
        None | Some("") => Ok(OutputFormat::Json),
        Some(value) => value.parse::<OutputFormat>(),
    };
    match format {
        Ok(format) => dispatch(&extract, &passthrough, &stats, format, query).await,
        Err(e) => e.into_response(),
    }
}

async fn dispatch(
    extract: &ExtractContentUseCase,
    passthrough: &ProxyPassthroughUseCase,
    stats: &Arc<dyn StatsSink>,
    format: OutputFormat,
    query: ProxyQueryDto,
) -> Response {
    if format == OutputFormat::Raw {
        return stream_upstream(passthrough, stats, query).await;
    }

    let request = match extract.map_dto_to_request(query, format) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };
    record_request(stats, format.as_str());

    match extract.execute(request).await {
        Ok(data) => Json(ApiResponse::ok(data)).into_response(),
        Err(e) => e.into_response(),
    }
}
