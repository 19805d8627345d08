// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 每个处理器只负责参数提取与响应渲染，业务流程由应用层用例完成
pub mod extract_handler;
pub mod proxy_handler;
pub mod stats_handler;
