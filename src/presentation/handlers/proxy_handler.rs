// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Body,
    extract::{Extension, Query},
    http::StatusCode,
    response::Response,
};
use std::sync::Arc;

use crate::application::dto::proxy_request::ProxyQueryDto;
use crate::application::usecases::proxy_passthrough::ProxyPassthroughUseCase;
use crate::domain::models::extraction_request::OutputFormat;
use crate::domain::services::stats_service::{record_request, StatsSink};
use crate::presentation::errors::passthrough_failure;

/// `GET /api/proxy`：原样透传上游响应
pub async fn proxy(
    Extension(passthrough): Extension<Arc<ProxyPassthroughUseCase>>,
    Extension(stats): Extension<Arc<dyn StatsSink>>,
    Query(query): Query<ProxyQueryDto>,
) -> Response {
    stream_upstream(&passthrough, &stats, query).await
}

/// 透传的公共实现，通用提取端点在 `format=raw` 时也会调用
pub(crate) async fn stream_upstream(
    passthrough: &ProxyPassthroughUseCase,
    stats: &Arc<dyn StatsSink>,
    query: ProxyQueryDto,
) -> Response {
    let request = match passthrough.map_dto_to_request(query) {
        Ok(request) => request,
        Err(e) => return passthrough_failure(e),
    };
    record_request(stats, OutputFormat::Raw.as_str());

    match passthrough.execute(request).await {
        Ok(upstream) => {
            let mut response = Response::new(Body::from_stream(upstream.body));
            *response.status_mut() =
                StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            *response.headers_mut() = upstream.headers;
            response
        }
        Err(e) => passthrough_failure(e),
    }
}
