// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::*;

#[test]
fn test_defaults_builder_matches_default_impl() {
    let built: Settings = Settings::defaults_builder()
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();
    let default = Settings::default();

    assert_eq!(built.server.host, default.server.host);
    assert_eq!(built.server.port, default.server.port);
    assert_eq!(built.proxy.request_timeout_secs, default.proxy.request_timeout_secs);
    assert_eq!(built.proxy.max_body_bytes, default.proxy.max_body_bytes);
    assert_eq!(built.proxy.max_delay_ms, 10_000);
    assert!(built.proxy.stealth);
    assert!(built.proxy.block_private_networks);
    assert!(!built.metrics.enabled);
}

#[test]
fn test_overrides_take_precedence_over_defaults() {
    let settings: Settings = Settings::defaults_builder()
        .unwrap()
        .set_override("server.port", 8088)
        .unwrap()
        .set_override("proxy.stealth", false)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert_eq!(settings.server.port, 8088);
    assert!(!settings.proxy.stealth);
    assert_eq!(settings.proxy.user_agent, DEFAULT_USER_AGENT);
}

#[test]
fn test_durations() {
    let settings = Settings::default();
    assert_eq!(settings.proxy.request_timeout(), Duration::from_secs(30));
    assert_eq!(settings.proxy.connect_timeout(), Duration::from_secs(10));
}
