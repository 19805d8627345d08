// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 代理请求查询参数
///
/// 所有字段均可缺省，校验在映射为领域请求时进行
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct ProxyQueryDto {
    /// 目标URL（可带百分号编码，可省略协议）
    pub url: Option<String>,
    /// 输出格式，仅在通用提取端点上使用
    pub format: Option<String>,
    /// `class` 格式的类名
    pub class: Option<String>,
    /// `id` 格式的元素ID
    pub id: Option<String>,
    /// 人工延迟，小值按秒、大值按毫秒
    pub delay: Option<String>,
    /// 自定义 User-Agent
    pub ua: Option<String>,
    /// 自定义 Referer
    pub referer: Option<String>,
}
