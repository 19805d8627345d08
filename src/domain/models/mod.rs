// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了单次代理请求生命周期内的数据结构：
/// - 提取请求（extraction_request）：目标地址、输出格式、选择器与身份覆盖
/// - 提取结果（extracted_document）：一次流式解析收集到的数据
/// - 响应负载（proxy_response）：调用方可见的响应信封
///
/// 所有实体都只在一次请求内存在，不做持久化。
pub mod extracted_document;
pub mod extraction_request;
pub mod proxy_response;
