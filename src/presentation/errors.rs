// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::warn;

use crate::domain::models::proxy_response::ApiResponse;
use crate::utils::errors::ProxyError;

impl ProxyError {
    /// 错误对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::Blocked(_) => StatusCode::FORBIDDEN,
            ProxyError::UpstreamUnreachable(_) | ProxyError::BodyTooLarge(_) => {
                StatusCode::BAD_GATEWAY
            }
            ProxyError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Extraction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!("Request failed ({}): {}", self.kind(), self);
        }
        let body: ApiResponse<()> = ApiResponse::failure(self.to_string());
        (status, Json(body)).into_response()
    }
}

/// 透传模式下的抓取失败响应
///
/// 校验与网络策略错误沿用通用信封，其余失败统一为 502 并附带细节
pub fn passthrough_failure(err: ProxyError) -> Response {
    match err {
        ProxyError::Validation(_) | ProxyError::Blocked(_) => err.into_response(),
        other => {
            warn!("Passthrough fetch failed ({}): {}", other.kind(), other);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({
                    "success": false,
                    "error": "Fetch failed",
                    "detail": other.to_string()
                })),
            )
                .into_response()
        }
    }
}
