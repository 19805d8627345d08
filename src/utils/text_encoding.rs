// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

/// 从 Content-Type 头中提取 charset 参数
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches('"').trim_matches('\''))
        } else {
            None
        }
    })
}

/// 将上游响应体解码为 UTF-8 字符串
///
/// 优先使用 Content-Type 中声明的字符集；未声明且字节不是合法 UTF-8 时，
/// 交给 chardetng 检测编码。解码错误以替换字符代替，不会失败。
pub fn decode_body(input: &[u8], content_type: &str) -> String {
    let declared = charset_from_content_type(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()));

    let encoding = match declared {
        Some(encoding) => encoding,
        None if std::str::from_utf8(input).is_ok() => UTF_8,
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(input, true);
            let guessed = detector.guess(None, true);
            debug!("检测到编码: {}", guessed.name());
            guessed
        }
    };

    let (decoded, _, had_errors) = encoding.decode(input);
    if had_errors {
        debug!("响应体解码包含无效字节，编码: {}", encoding.name());
    }
    decoded.into_owned()
}
