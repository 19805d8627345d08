// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、代理抓取和指标导出等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 上游代理配置
    pub proxy: ProxySettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 上游代理配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ProxySettings {
    /// 单个请求的总时限（秒），覆盖延迟、抓取与读取响应体
    pub request_timeout_secs: u64,
    /// 连接超时时间（秒）
    pub connect_timeout_secs: u64,
    /// 最大重定向次数
    pub max_redirects: usize,
    /// 物化响应体的最大字节数
    pub max_body_bytes: usize,
    /// 人工延迟上限（毫秒）
    pub max_delay_ms: u64,
    /// 是否启用身份随机化
    pub stealth: bool,
    /// 关闭身份随机化时使用的固定 User-Agent
    pub user_agent: String,
    /// 是否拒绝解析到私有网络的目标
    pub block_private_networks: bool,
}

/// 指标导出配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出器监听地址
    pub listen_addr: String,
}

pub const DEFAULT_USER_AGENT: &str =
    "FluxGate/2.1 (High-Performance Extraction Engine; +https://github.com/Kirky-X/fluxgate)";

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加内置默认值、`config/default`、`config/{APP_ENVIRONMENT}` 与
    /// `FLUXGATE__` 前缀的环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults_builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("FLUXGATE").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn defaults_builder(
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default proxy settings
            .set_default("proxy.request_timeout_secs", 30)?
            .set_default("proxy.connect_timeout_secs", 10)?
            .set_default("proxy.max_redirects", 10)?
            .set_default("proxy.max_body_bytes", 10 * 1024 * 1024)?
            .set_default("proxy.max_delay_ms", 10_000)?
            .set_default("proxy.stealth", true)?
            .set_default("proxy.user_agent", DEFAULT_USER_AGENT)?
            .set_default("proxy.block_private_networks", true)?
            // Default metrics settings
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}

impl ProxySettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for Settings {
    /// 仅包含内置默认值的配置，不读取文件与环境变量
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            proxy: ProxySettings {
                request_timeout_secs: 30,
                connect_timeout_secs: 10,
                max_redirects: 10,
                max_body_bytes: 10 * 1024 * 1024,
                max_delay_ms: 10_000,
                stealth: true,
                user_agent: DEFAULT_USER_AGENT.to_string(),
                block_private_networks: true,
            },
            metrics: MetricsSettings {
                enabled: false,
                listen_addr: "0.0.0.0:9000".to_string(),
            },
        }
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
