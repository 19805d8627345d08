// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE};
use reqwest::redirect::Policy;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::settings::ProxySettings;
use crate::engines::traits::{EngineError, FetchRequest, UpstreamFetcher, UpstreamResponse};
use crate::engines::validators;

const DEFAULT_ACCEPT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8";

/// 抓取引擎
///
/// 基于reqwest实现的上游HTTP抓取引擎，每次请求只尝试一次，不重试
pub struct ReqwestEngine {
    client: reqwest::Client,
    block_private_networks: bool,
}

impl ReqwestEngine {
    /// 按代理配置构建共享的 HTTP 客户端
    pub fn new(settings: &ProxySettings) -> Result<Self, EngineError> {
        let max_redirects = settings.max_redirects;
        let block_private_networks = settings.block_private_networks;
        let redirect = Policy::custom(move |attempt| {
            if attempt.previous().len() >= max_redirects {
                attempt.error("too many redirects")
            } else if block_private_networks && validators::is_forbidden_literal(attempt.url()) {
                attempt.error("redirect to a private network target")
            } else {
                attempt.follow()
            }
        });

        let client = reqwest::Client::builder()
            .redirect(redirect)
            .connect_timeout(settings.connect_timeout())
            .timeout(settings.request_timeout())
            .build()?;

        Ok(Self {
            client,
            block_private_networks: settings.block_private_networks,
        })
    }

    fn build_headers(request: &FetchRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        for (k, v) in &request.headers {
            match (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                (Ok(k), Ok(v)) => {
                    headers.insert(k, v);
                }
                _ => warn!("Skipping invalid outbound header: {}", k),
            }
        }
        headers
    }
}

#[async_trait]
impl UpstreamFetcher for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(UpstreamResponse)` - 已收到响应头，响应体尚未读取
    /// * `Err(EngineError)` - 网络、DNS、TLS 失败或目标被拒绝
    async fn fetch(&self, request: &FetchRequest) -> Result<UpstreamResponse, EngineError> {
        if self.block_private_networks {
            validators::ensure_public_target(&request.url).await?;
        }

        let headers = Self::build_headers(request);
        let start = Instant::now();
        let response = self
            .client
            .get(request.url.clone())
            .headers(headers)
            .send()
            .await?;

        let status_code = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or("text/html")
            .to_string();
        let response_headers = response.headers().clone();
        let elapsed_ms = start.elapsed().as_millis() as u64;

        debug!(
            "Upstream {} responded {} ({}) in {} ms",
            response.url(),
            status_code,
            content_type,
            elapsed_ms
        );

        let body = response
            .bytes_stream()
            .map(|chunk| chunk.map_err(EngineError::from))
            .boxed();

        Ok(UpstreamResponse::new(
            status_code,
            content_type,
            response_headers,
            elapsed_ms,
            body,
        ))
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
