// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 提取请求处理管线中的各个环节：
/// - 身份策略（identity_service）
/// - 延迟闸门（delay_service）
/// - 流式提取（extraction_service）
/// - 纯文本剥离（text_service）
/// - 响应组装（response_assembler）
/// - 统计汇聚接口（stats_service）
pub mod delay_service;
pub mod extraction_service;
pub mod identity_service;
pub mod response_assembler;
pub mod stats_service;
pub mod text_service;
