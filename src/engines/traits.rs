// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::header::HeaderMap;
use std::collections::HashMap;
use thiserror::Error;
use url::Url;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 请求失败（网络、DNS、TLS、超时）
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 目标被网络策略拒绝
    #[error("{0}")]
    Blocked(String),
    /// 响应体超过上限
    #[error("Body exceeds {0} bytes")]
    BodyTooLarge(usize),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

/// 上游抓取请求
pub struct FetchRequest {
    /// 目标URL
    pub url: Url,
    /// 请求头
    pub headers: HashMap<String, String>,
}

/// 上游响应体字节流
pub type BodyStream = BoxStream<'static, Result<Bytes, EngineError>>;

/// 上游响应
///
/// 响应体只能被消费一次：要么作为流整体交出，要么一次性读入内存
pub struct UpstreamResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 内容类型
    pub content_type: String,
    /// 响应头
    pub headers: HeaderMap,
    /// 收到响应头所用时间（毫秒）
    pub elapsed_ms: u64,
    body: BodyStream,
}

impl UpstreamResponse {
    pub fn new(
        status_code: u16,
        content_type: String,
        headers: HeaderMap,
        elapsed_ms: u64,
        body: BodyStream,
    ) -> Self {
        Self {
            status_code,
            content_type,
            headers,
            elapsed_ms,
            body,
        }
    }

    /// 交出原始字节流，用于透传
    pub fn into_body_stream(self) -> BodyStream {
        self.body
    }

    /// 读取完整响应体，超过 `limit` 字节时失败
    pub async fn read_to_end(self, limit: usize) -> Result<Bytes, EngineError> {
        let mut body = self.body;
        let mut buffer = BytesMut::new();
        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            if buffer.len() + chunk.len() > limit {
                return Err(EngineError::BodyTooLarge(limit));
            }
            buffer.extend_from_slice(&chunk);
        }
        Ok(buffer.freeze())
    }
}

/// 上游抓取引擎特质
#[async_trait]
pub trait UpstreamFetcher: Send + Sync {
    /// 发出一次 GET 请求，重定向由引擎内部透明处理
    async fn fetch(&self, request: &FetchRequest) -> Result<UpstreamResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
