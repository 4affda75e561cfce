use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = ServerConfig::from_lookup(lookup(&[])).expect("config");
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR);
    assert_eq!(cfg.socket_addr().to_string(), "0.0.0.0:3000");
}

#[test]
fn blank_values_use_defaults() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "  "), ("BIND_ADDR", "")])).expect("config");
    assert_eq!(cfg.port, DEFAULT_PORT);
}

#[test]
fn explicit_values_are_parsed() {
    let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "8080"), ("BIND_ADDR", "127.0.0.1")])).expect("config");
    assert_eq!(cfg.socket_addr().to_string(), "127.0.0.1:8080");
}

#[test]
fn ipv6_bind_addr_is_accepted() {
    let cfg = ServerConfig::from_lookup(lookup(&[("BIND_ADDR", "::1")])).expect("config");
    assert_eq!(cfg.socket_addr().to_string(), "[::1]:3000");
}

#[test]
fn invalid_port_is_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).unwrap_err();
    assert!(matches!(err, StartupError::Server { var: "PORT", .. }));
}

#[test]
fn invalid_bind_addr_is_rejected() {
    let err = ServerConfig::from_lookup(lookup(&[("BIND_ADDR", "localhost")])).unwrap_err();
    assert!(matches!(err, StartupError::Server { var: "BIND_ADDR", .. }));
}

#[test]
fn client_config_errors_convert() {
    let err: StartupError = ConfigError::Missing { var: "INVENTORY_API_BASE_URL" }.into();
    assert_eq!(
        err.to_string(),
        "client configuration: missing configuration: INVENTORY_API_BASE_URL not set"
    );
}
