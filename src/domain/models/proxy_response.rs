// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::models::extracted_document::ExtractedElement;
use crate::domain::models::extraction_request::OutputFormat;

/// 统一响应信封 `{success, data?, error?}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

/// 上游抓取状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchStatus {
    pub url: String,
    pub content_type: String,
    pub http_code: u16,
    pub response_time_ms: u64,
}

/// 提取结果负载
///
/// 各格式只填充自己需要的字段，其余字段不序列化
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyData {
    pub url: String,
    pub format: OutputFormat,
    pub status: FetchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub videos: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_elements: Option<Vec<ExtractedElement>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Value>,
}

impl ProxyData {
    pub fn new(url: String, format: OutputFormat, status: FetchStatus) -> Self {
        Self {
            url,
            format,
            status,
            title: None,
            text: None,
            images: None,
            links: None,
            videos: None,
            extracted_elements: None,
            meta: None,
            contents: None,
        }
    }
}
