// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::net::IpAddr;
use tokio::net::lookup_host;
use url::{Host, Url};

use crate::engines::traits::EngineError;

/// 验证目标是否指向公网 (防止 SSRF)
///
/// 检查解析后的所有 IP，任一为私有、环回或链路本地地址即拒绝
pub async fn ensure_public_target(url: &Url) -> Result<(), EngineError> {
    let host = url
        .host()
        .ok_or_else(|| EngineError::Blocked("Missing host".to_string()))?;

    let domain = match host {
        Host::Ipv4(ip) => return check_ip(IpAddr::V4(ip)),
        Host::Ipv6(ip) => return check_ip(IpAddr::V6(ip)),
        Host::Domain(domain) => domain,
    };

    let lowered = domain.to_ascii_lowercase();
    if lowered == "localhost" || lowered.ends_with(".localhost") {
        return Err(EngineError::Blocked(
            "localhost is not allowed".to_string(),
        ));
    }

    let port = url.port_or_known_default().unwrap_or(80);
    let addrs = lookup_host(format!("{}:{}", domain, port))
        .await
        .map_err(|e| EngineError::Other(format!("DNS resolution failed for {}: {}", domain, e)))?;

    for addr in addrs {
        check_ip(addr.ip())?;
    }
    Ok(())
}

/// 不做 DNS 解析的快速判定，仅识别 IP 字面量与 localhost
///
/// 用于重定向跳转时的同步检查
pub fn is_forbidden_literal(url: &Url) -> bool {
    match url.host() {
        Some(Host::Ipv4(ip)) => is_forbidden_ip(IpAddr::V4(ip)),
        Some(Host::Ipv6(ip)) => is_forbidden_ip(IpAddr::V6(ip)),
        Some(Host::Domain(domain)) => {
            let lowered = domain.to_ascii_lowercase();
            lowered == "localhost" || lowered.ends_with(".localhost")
        }
        None => true,
    }
}

fn check_ip(ip: IpAddr) -> Result<(), EngineError> {
    if is_forbidden_ip(ip) {
        Err(EngineError::Blocked(format!(
            "Private IP access is not allowed: {}",
            ip
        )))
    } else {
        Ok(())
    }
}

/// 是否为私有、环回、链路本地、组播或未指定地址
pub fn is_forbidden_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(ipv4) => {
            let octets = ipv4.octets();
            ipv4.is_private()
                || ipv4.is_loopback()
                || ipv4.is_link_local()
                || ipv4.is_multicast()
                || ipv4.is_unspecified()
                || ipv4.is_broadcast()
                // 100.64.0.0/10 (Carrier-grade NAT)
                || (octets[0] == 100 && (64..=127).contains(&octets[1]))
        }
        IpAddr::V6(ipv6) => {
            if let Some(mapped) = ipv6.to_ipv4_mapped() {
                return is_forbidden_ip(IpAddr::V4(mapped));
            }
            let first = ipv6.segments()[0];
            ipv6.is_loopback()
                || ipv6.is_unspecified()
                // Unique Local Address (fc00::/7)
                || (first & 0xfe00) == 0xfc00
                // Link-local (fe80::/10)
                || (first & 0xffc0) == 0xfe80
                // Multicast (ff00::/8)
                || (first & 0xff00) == 0xff00
        }
    }
}
