// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用用例模块
///
/// 提取用例与原始透传用例共享同一个延迟与抓取步骤
pub mod extract_content;
pub mod proxy_passthrough;
