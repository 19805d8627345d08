// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use once_cell::sync::Lazy;
use regex::Regex;

static SCRIPT_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b[^>]*>.*?</script>").unwrap());
static STYLE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b[^>]*>.*?</style>").unwrap());
static CODE_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<code\b[^>]*>.*?</code>").unwrap());
static ANY_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// 将连续空白折叠为单个空格并去除首尾空白
pub fn collapse_whitespace(input: &str) -> String {
    WHITESPACE.replace_all(input, " ").trim().to_string()
}

/// 纯文本格式的生成
///
/// 不经过流式解析，直接作用于完整响应体：整段移除 script/style/code 块
/// （标签连同内容），其余标签替换为空格，最后折叠空白。
pub fn strip_to_text(body: &str) -> String {
    let without_scripts = SCRIPT_BLOCK.replace_all(body, "");
    let without_styles = STYLE_BLOCK.replace_all(&without_scripts, "");
    let without_code = CODE_BLOCK.replace_all(&without_styles, "");
    let without_tags = ANY_TAG.replace_all(&without_code, " ");
    collapse_whitespace(&without_tags)
}
