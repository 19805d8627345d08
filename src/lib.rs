// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 请求映射与提取、透传两条用例
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 请求与结果模型，以及身份、延迟、流式提取与响应组装服务
pub mod domain;

/// 引擎模块
///
/// 上游抓取引擎与目标地址校验
pub mod engines;

/// 基础设施模块
///
/// 指标导出与统计存储
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
