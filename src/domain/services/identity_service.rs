// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::net::Ipv4Addr;
use url::Url;

use crate::domain::models::extraction_request::IdentityOverride;
use crate::utils::url_utils::origin_referer;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/119.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Mobile/15E148 Safari/604.1",
];

/// 一次上游请求使用的身份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_agent: String,
    pub referer: String,
    /// 伪造的转发地址，关闭 stealth 时为空
    pub forwarded_for: Option<Ipv4Addr>,
}

impl Identity {
    /// 转换为出站请求头
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("User-Agent", self.user_agent.clone()),
            ("Referer", self.referer.clone()),
        ];
        if let Some(ip) = self.forwarded_for {
            headers.push(("X-Forwarded-For", ip.to_string()));
            headers.push(("X-Real-IP", ip.to_string()));
        }
        headers
    }
}

/// 身份策略（stealth）
///
/// 纯策略函数，不持有可变状态；随机性只用于规避简单指纹，不是安全边界
#[derive(Debug, Clone)]
pub struct IdentityService {
    stealth: bool,
    default_user_agent: String,
}

impl IdentityService {
    pub fn new(stealth: bool, default_user_agent: impl Into<String>) -> Self {
        Self {
            stealth,
            default_user_agent: default_user_agent.into(),
        }
    }

    /// 为目标地址选择身份，调用方覆盖优先
    pub fn select(&self, target: &Url, overrides: &IdentityOverride) -> Identity {
        let user_agent = non_blank(overrides.user_agent.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| {
                if self.stealth {
                    random_user_agent().to_string()
                } else {
                    self.default_user_agent.clone()
                }
            });
        let referer = non_blank(overrides.referer.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| origin_referer(target));

        Identity {
            user_agent,
            referer,
            forwarded_for: self.stealth.then(random_ipv4),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// 从固定池中随机选择 User-Agent
pub fn random_user_agent() -> &'static str {
    USER_AGENTS[rand::random_range(0..USER_AGENTS.len())]
}

/// 由四个均匀随机的八位组合成 IPv4 地址
pub fn random_ipv4() -> Ipv4Addr {
    Ipv4Addr::from(rand::random::<[u8; 4]>())
}
