// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE};
use tracing::{info, instrument};

use crate::application::dto::proxy_request::ProxyQueryDto;
use crate::config::settings::ProxySettings;
use crate::domain::models::extraction_request::{ExtractionRequest, OutputFormat};
use crate::domain::services::identity_service::IdentityService;
use crate::engines::traits::{BodyStream, UpstreamFetcher};
use crate::utils::errors::ProxyError;

use super::extract_content::{build_extraction_request, gated_fetch};

/// 不向下游转发的逐跳头与长度相关头
const STRIPPED_HEADERS: &[&str] = &[
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
    "content-encoding",
    "content-length",
];

/// 透传缓存策略
pub const PASSTHROUGH_CACHE_CONTROL: &str = "public, max-age=3600";

/// 透传响应：状态码、过滤后的响应头与未经读取的字节流
pub struct PassthroughResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: BodyStream,
}

/// 过滤上游响应头并补充透传标记
pub fn passthrough_headers(upstream: &HeaderMap, content_type: &str) -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(upstream.len() + 2);
    for (name, value) in upstream {
        if STRIPPED_HEADERS.contains(&name.as_str()) {
            continue;
        }
        headers.append(name.clone(), value.clone());
    }

    if !headers.contains_key(CONTENT_TYPE) {
        if let Ok(value) = HeaderValue::from_str(content_type) {
            headers.insert(CONTENT_TYPE, value);
        }
    }
    headers.insert(
        HeaderName::from_static("x-proxy-mode"),
        HeaderValue::from_static("Streaming"),
    );
    headers.insert(
        CACHE_CONTROL,
        HeaderValue::from_static(PASSTHROUGH_CACHE_CONTROL),
    );
    headers
}

/// 原始透传用例
///
/// 只等待上游响应头；响应体以字节流形式原样交给调用方
pub struct ProxyPassthroughUseCase {
    fetcher: Arc<dyn UpstreamFetcher>,
    identity: IdentityService,
    settings: ProxySettings,
}

impl ProxyPassthroughUseCase {
    pub fn new(fetcher: Arc<dyn UpstreamFetcher>, settings: &ProxySettings) -> Self {
        Self {
            fetcher,
            identity: IdentityService::new(settings.stealth, settings.user_agent.clone()),
            settings: settings.clone(),
        }
    }

    pub fn map_dto_to_request(&self, dto: ProxyQueryDto) -> Result<ExtractionRequest, ProxyError> {
        build_extraction_request(dto, OutputFormat::Raw, self.settings.max_delay_ms)
    }

    #[instrument(skip(self, request), fields(url = %request.target))]
    pub async fn execute(
        &self,
        request: ExtractionRequest,
    ) -> Result<PassthroughResponse, ProxyError> {
        let deadline = self.settings.request_timeout();
        let (response, started) = tokio::time::timeout(
            deadline,
            gated_fetch(self.fetcher.as_ref(), &self.identity, &request),
        )
        .await
        .map_err(|_| ProxyError::Timeout(deadline.as_secs()))??;

        let status = response.status_code;
        let headers = passthrough_headers(&response.headers, &response.content_type);
        info!(
            "Streaming {} upstream={} headers after {} ms",
            request.target,
            status,
            started.elapsed().as_millis()
        );

        Ok(PassthroughResponse {
            status,
            headers,
            body: response.into_body_stream(),
        })
    }
}
