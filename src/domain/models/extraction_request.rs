// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

use crate::utils::errors::ProxyError;

/// 输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 原样透传上游字节流
    Raw,
    Json,
    Html,
    Text,
    Images,
    Links,
    Videos,
    /// 按 CSS 类名提取片段
    Class,
    /// 按元素 ID 提取片段
    Id,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 9] = [
        OutputFormat::Raw,
        OutputFormat::Json,
        OutputFormat::Html,
        OutputFormat::Text,
        OutputFormat::Images,
        OutputFormat::Links,
        OutputFormat::Videos,
        OutputFormat::Class,
        OutputFormat::Id,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Raw => "raw",
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
            OutputFormat::Images => "images",
            OutputFormat::Links => "links",
            OutputFormat::Videos => "videos",
            OutputFormat::Class => "class",
            OutputFormat::Id => "id",
        }
    }

    /// 是否需要 `class`/`id` 参数
    pub fn requires_selector(&self) -> bool {
        matches!(self, OutputFormat::Class | OutputFormat::Id)
    }

    /// 是否需要对 HTML 做一次流式解析
    ///
    /// `text` 由独立的剥离流程生成，`raw` 完全绕过解析
    pub fn needs_streaming_pass(&self) -> bool {
        !matches!(self, OutputFormat::Raw | OutputFormat::Text)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ProxyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raw" | "proxy" => Ok(OutputFormat::Raw),
            "json" => Ok(OutputFormat::Json),
            "html" => Ok(OutputFormat::Html),
            "text" => Ok(OutputFormat::Text),
            "images" => Ok(OutputFormat::Images),
            "links" => Ok(OutputFormat::Links),
            "videos" => Ok(OutputFormat::Videos),
            "class" | "classselector" => Ok(OutputFormat::Class),
            "id" | "idselector" => Ok(OutputFormat::Id),
            other => Err(ProxyError::Validation(format!(
                "Unsupported format: {}",
                other
            ))),
        }
    }
}

/// 片段选择器
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    /// 匹配 class 属性中包含该类名的元素
    Class(String),
    /// 匹配 id 属性等于该值的元素
    Id(String),
}

impl Selector {
    /// 判断元素属性是否命中选择器
    pub fn matches(&self, class_attr: Option<&str>, id_attr: Option<&str>) -> bool {
        match self {
            Selector::Class(name) => class_attr
                .map(|classes| classes.split_ascii_whitespace().any(|c| c == name))
                .unwrap_or(false),
            Selector::Id(id) => id_attr == Some(id.as_str()),
        }
    }
}

/// 调用方提供的身份覆盖
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityOverride {
    pub user_agent: Option<String>,
    pub referer: Option<String>,
}

/// 一次提取请求
///
/// 仅在 `class`/`id` 格式下携带选择器，构造时校验该不变量
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    pub target: Url,
    pub format: OutputFormat,
    pub selector: Option<Selector>,
    pub delay: Duration,
    pub identity: IdentityOverride,
}

impl ExtractionRequest {
    pub fn new(
        target: Url,
        format: OutputFormat,
        selector_value: Option<String>,
        delay: Duration,
        identity: IdentityOverride,
    ) -> Result<Self, ProxyError> {
        let selector_value = selector_value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());

        let selector = match (format, selector_value) {
            (OutputFormat::Class, Some(value)) => Some(Selector::Class(validate_selector(value)?)),
            (OutputFormat::Id, Some(value)) => Some(Selector::Id(validate_selector(value)?)),
            (format, None) if format.requires_selector() => {
                return Err(ProxyError::Validation(format!(
                    "Selector required for format: {}",
                    format
                )));
            }
            _ => None,
        };

        Ok(Self {
            target,
            format,
            selector,
            delay,
            identity,
        })
    }
}

fn validate_selector(value: String) -> Result<String, ProxyError> {
    if value.chars().any(char::is_whitespace) {
        return Err(ProxyError::Validation(format!(
            "Selector must be a single class name or id: {:?}",
            value
        )));
    }
    Ok(value)
}
