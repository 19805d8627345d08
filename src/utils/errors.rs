// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::engines::traits::EngineError;
use crate::utils::url_utils::TargetUrlError;

/// 代理请求错误类型
///
/// 每个请求的失败都只作用于该请求本身，不会影响其他并发请求
#[derive(Error, Debug)]
pub enum ProxyError {
    /// 请求参数校验失败（缺少 url、缺少选择器等）
    #[error("{0}")]
    Validation(String),

    /// 上游不可达（网络、DNS、TLS 失败）
    #[error("Upstream fetch failed: {0}")]
    UpstreamUnreachable(String),

    /// 目标解析到被禁止的网络
    #[error("Target is not allowed: {0}")]
    Blocked(String),

    /// 上游响应体超过上限
    #[error("Upstream body exceeds {0} bytes")]
    BodyTooLarge(usize),

    /// 整个处理流程超过时限
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// 流式解析整体失败
    #[error("Extraction failed: {0}")]
    Extraction(String),
}

impl ProxyError {
    /// 用于指标标签的错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            ProxyError::Validation(_) => "validation",
            ProxyError::UpstreamUnreachable(_) => "upstream_unreachable",
            ProxyError::Blocked(_) => "blocked",
            ProxyError::BodyTooLarge(_) => "body_too_large",
            ProxyError::Timeout(_) => "timeout",
            ProxyError::Extraction(_) => "extraction",
        }
    }
}

impl From<TargetUrlError> for ProxyError {
    fn from(err: TargetUrlError) -> Self {
        ProxyError::Validation(err.to_string())
    }
}

impl From<EngineError> for ProxyError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Blocked(reason) => ProxyError::Blocked(reason),
            EngineError::BodyTooLarge(limit) => ProxyError::BodyTooLarge(limit),
            EngineError::RequestFailed(e) => ProxyError::UpstreamUnreachable(e.to_string()),
            EngineError::Other(message) => ProxyError::UpstreamUnreachable(message),
        }
    }
}
