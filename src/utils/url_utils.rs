// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;
use url::{ParseError, Url};

/// 目标URL校验错误
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TargetUrlError {
    #[error("URL query parameter is required")]
    Missing,

    #[error("Invalid Target URL. Ensure it is correctly encoded.")]
    Malformed(#[from] ParseError),

    #[error("Invalid Target URL. Percent-encoding does not decode to UTF-8.")]
    BadEncoding,

    #[error("Unsupported URL scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Invalid Target URL. Missing host.")]
    MissingHost,
}

/// 规范化调用方提供的目标URL
///
/// 百分号解码一次；缺少 `://` 时补上 `https://`；只接受 http/https 绝对地址
pub fn normalize_target(raw: &str) -> Result<Url, TargetUrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TargetUrlError::Missing);
    }

    let decoded = urlencoding::decode(trimmed).map_err(|_| TargetUrlError::BadEncoding)?;
    let candidate = if decoded.contains("://") {
        decoded.into_owned()
    } else {
        format!("https://{}", decoded)
    };

    let url = Url::parse(&candidate)?;
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(TargetUrlError::UnsupportedScheme(other.to_string())),
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(TargetUrlError::MissingHost);
    }
    Ok(url)
}

/// 将可能为相对路径的URL转换为绝对路径URL
pub fn resolve_url(base_url: &Url, path: &str) -> Result<Url, ParseError> {
    base_url.join(path)
}

/// 解析文档中 `src`/`href` 属性引用的地址
///
/// 空值或无法解析的引用返回 `None`，由调用方直接丢弃
pub fn resolve_reference(base_url: &Url, reference: &str) -> Option<Url> {
    let reference = reference.trim();
    if reference.is_empty() {
        return None;
    }
    resolve_url(base_url, reference).ok()
}

/// 目标站点的源地址，作为默认 Referer
pub fn origin_referer(url: &Url) -> String {
    format!("{}/", url.origin().ascii_serialization())
}
