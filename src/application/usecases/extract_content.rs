// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument};

use crate::application::dto::proxy_request::ProxyQueryDto;
use crate::config::settings::ProxySettings;
use crate::domain::models::extraction_request::{
    ExtractionRequest, IdentityOverride, OutputFormat,
};
use crate::domain::models::proxy_response::ProxyData;
use crate::domain::services::delay_service;
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::identity_service::IdentityService;
use crate::domain::services::response_assembler::{is_html, AssemblyInput, ResponseAssembler};
use crate::engines::traits::{FetchRequest, UpstreamFetcher, UpstreamResponse};
use crate::utils::errors::ProxyError;
use crate::utils::text_encoding::decode_body;
use crate::utils::url_utils::{normalize_target, TargetUrlError};

// === Section: Request Mapping ===

/// 将查询参数映射为领域请求
///
/// 校验失败时直接返回，不会发起任何上游请求
pub fn build_extraction_request(
    dto: ProxyQueryDto,
    format: OutputFormat,
    max_delay_ms: u64,
) -> Result<ExtractionRequest, ProxyError> {
    let raw_url = dto.url.ok_or(TargetUrlError::Missing)?;
    let target = normalize_target(&raw_url)?;

    let delay = match dto.delay.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(value) => {
            let parsed = value.parse::<u64>().map_err(|_| {
                ProxyError::Validation(format!("Invalid delay value: {}", value))
            })?;
            delay_service::delay_from_param(parsed, max_delay_ms)
        }
        None => std::time::Duration::ZERO,
    };

    let selector_value = match format {
        OutputFormat::Class => dto.class,
        OutputFormat::Id => dto.id,
        _ => None,
    };

    ExtractionRequest::new(
        target,
        format,
        selector_value,
        delay,
        IdentityOverride {
            user_agent: dto.ua,
            referer: dto.referer,
        },
    )
}

// === Section: Shared Fetch Step ===

/// 延迟闸门 + 身份选择 + 单次上游抓取
///
/// 提取与透传两条路径共用这一步
pub(crate) async fn gated_fetch(
    fetcher: &dyn UpstreamFetcher,
    identity: &IdentityService,
    request: &ExtractionRequest,
) -> Result<(UpstreamResponse, Instant), ProxyError> {
    delay_service::hold(request.delay).await;

    let identity = identity.select(&request.target, &request.identity);
    let headers: HashMap<String, String> = identity
        .headers()
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    let fetch_request = FetchRequest {
        url: request.target.clone(),
        headers,
    };

    let started = Instant::now();
    let response = fetcher.fetch(&fetch_request).await.map_err(|e| {
        let err = ProxyError::from(e);
        metrics::counter!("fluxgate_upstream_errors_total", "kind" => err.kind()).increment(1);
        err
    })?;
    Ok((response, started))
}

// === Section: Use Case Definition ===

/// 内容提取用例
///
/// 校验 → 延迟 → 抓取 → 流式提取 → 组装，整条管线受同一个时限约束
pub struct ExtractContentUseCase {
    fetcher: Arc<dyn UpstreamFetcher>,
    identity: IdentityService,
    settings: ProxySettings,
}

// === Section: Implementation ===

impl ExtractContentUseCase {
    pub fn new(fetcher: Arc<dyn UpstreamFetcher>, settings: &ProxySettings) -> Self {
        Self {
            fetcher,
            identity: IdentityService::new(settings.stealth, settings.user_agent.clone()),
            settings: settings.clone(),
        }
    }

    pub fn map_dto_to_request(
        &self,
        dto: ProxyQueryDto,
        format: OutputFormat,
    ) -> Result<ExtractionRequest, ProxyError> {
        build_extraction_request(dto, format, self.settings.max_delay_ms)
    }

    #[instrument(skip(self, request), fields(url = %request.target, format = %request.format))]
    pub async fn execute(&self, request: ExtractionRequest) -> Result<ProxyData, ProxyError> {
        if request.format == OutputFormat::Raw {
            return Err(ProxyError::Validation(
                "Raw format is served by the passthrough endpoint".to_string(),
            ));
        }

        let deadline = self.settings.request_timeout();
        tokio::time::timeout(deadline, self.run(request))
            .await
            .map_err(|_| ProxyError::Timeout(deadline.as_secs()))?
    }

    async fn run(&self, request: ExtractionRequest) -> Result<ProxyData, ProxyError> {
        let (response, started) =
            gated_fetch(self.fetcher.as_ref(), &self.identity, &request).await?;

        let http_code = response.status_code;
        let content_type = response.content_type.clone();
        let bytes = response.read_to_end(self.settings.max_body_bytes).await?;
        let body = decode_body(&bytes, &content_type);
        debug!("Materialized {} bytes from upstream", bytes.len());

        let (body, document) = if request.format.needs_streaming_pass() && is_html(&content_type)
        {
            let base = request.target.clone();
            let selector = request.selector.clone();
            let (body, document) = tokio::task::spawn_blocking(move || {
                let document = ExtractionService::extract(&body, &base, selector.as_ref());
                (body, document)
            })
            .await
            .map_err(|e| ProxyError::Extraction(e.to_string()))?;
            (body, Some(document))
        } else {
            (body, None)
        };

        let url = request.target.to_string();
        let data = ResponseAssembler::assemble(AssemblyInput {
            url: &url,
            format: request.format,
            content_type: &content_type,
            http_code,
            started,
            body: &body,
            document,
        });

        info!(
            "Extracted {} ({}) upstream={} in {} ms",
            url, request.format, http_code, data.status.response_time_ms
        );
        metrics::histogram!("fluxgate_response_time_ms", "format" => request.format.as_str())
            .record(data.status.response_time_ms as f64);
        Ok(data)
    }
}

#[cfg(test)]
#[path = "extract_content_test.rs"]
mod tests;
