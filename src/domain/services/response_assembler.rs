// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use std::time::Instant;

use crate::domain::models::extracted_document::ExtractedDocument;
use crate::domain::models::extraction_request::OutputFormat;
use crate::domain::models::proxy_response::{FetchStatus, ProxyData};
use crate::domain::services::text_service::strip_to_text;

/// 组装所需的上游信息
pub struct AssemblyInput<'a> {
    pub url: &'a str,
    pub format: OutputFormat,
    pub content_type: &'a str,
    pub http_code: u16,
    /// 上游抓取开始的时间点
    pub started: Instant,
    pub body: &'a str,
    /// 非 HTML 内容或 `text` 格式时为空
    pub document: Option<ExtractedDocument>,
}

/// 判断内容类型是否按 HTML 处理
pub fn is_html(content_type: &str) -> bool {
    let lowered = content_type.to_ascii_lowercase();
    lowered.contains("text/html") || lowered.contains("application/xhtml+xml")
}

fn is_json(content_type: &str) -> bool {
    content_type.to_ascii_lowercase().contains("json")
}

/// 响应组装器
///
/// 按输出格式裁剪提取结果，所有格式都附带抓取状态
pub struct ResponseAssembler;

impl ResponseAssembler {
    pub fn assemble(input: AssemblyInput<'_>) -> ProxyData {
        let AssemblyInput {
            url,
            format,
            content_type,
            http_code,
            started,
            body,
            document,
        } = input;

        let status = FetchStatus {
            url: url.to_string(),
            content_type: content_type.to_string(),
            http_code,
            response_time_ms: 0,
        };
        let mut data = ProxyData::new(url.to_string(), format, status);
        let document = document.unwrap_or_default();

        match format {
            OutputFormat::Json => {
                data.title = Some(document.title);
                data.meta = Some(document.meta);
                data.images = Some(document.images.into_vec());
                data.links = Some(document.links.into_vec());
                data.videos = Some(document.videos.into_vec());
                data.contents = Some(Self::contents(body, content_type));
            }
            OutputFormat::Html => {
                data.title = Some(document.title);
                data.meta = Some(document.meta);
                data.contents = Some(Value::String(body.to_string()));
            }
            OutputFormat::Text => data.text = Some(strip_to_text(body)),
            OutputFormat::Images => data.images = Some(document.images.into_vec()),
            OutputFormat::Links => data.links = Some(document.links.into_vec()),
            OutputFormat::Videos => data.videos = Some(document.videos.into_vec()),
            OutputFormat::Class | OutputFormat::Id => {
                data.extracted_elements = Some(document.fragments)
            }
            // Passthrough never reaches the assembler
            OutputFormat::Raw => {}
        }

        data.status.response_time_ms = started.elapsed().as_millis() as u64;
        data
    }

    /// JSON 类型的响应体解析为结构化数据，失败时退回原始字符串
    fn contents(body: &str, content_type: &str) -> Value {
        if is_json(content_type) {
            if let Ok(value) = serde_json::from_str(body) {
                return value;
            }
        }
        Value::String(body.to_string())
    }
}
