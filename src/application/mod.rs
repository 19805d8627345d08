// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 将查询参数映射为领域请求，并编排延迟、抓取、提取与组装
pub mod dto;
pub mod usecases;
