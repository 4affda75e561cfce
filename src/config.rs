//! Host server configuration parsed from environment variables.
//!
//! ERROR HANDLING
//! ==============
//! Every startup failure funnels into [`StartupError`]; `main` logs it and
//! exits non-zero. The client's own settings are validated here too so a
//! misconfigured deployment fails at boot instead of on first page load.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use inventory_client::config::ConfigError;

pub const PORT_VAR: &str = "PORT";
pub const BIND_ADDR_VAR: &str = "BIND_ADDR";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Errors that stop the host from serving.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("client configuration: {0}")]
    Client(#[from] ConfigError),

    #[error("invalid {var}: {reason}")]
    Server { var: &'static str, reason: String },

    #[error("leptos configuration: {0}")]
    Leptos(String),

    #[error("failed to bind {addr}: {source}")]
    Bind { addr: SocketAddr, source: std::io::Error },

    #[error("server failed: {0}")]
    Serve(std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: IpAddr,
    pub port: u16,
}

impl ServerConfig {
    /// Build typed host config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BIND_ADDR`: default `0.0.0.0`
    pub fn from_env() -> Result<Self, StartupError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, StartupError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match non_blank(lookup(PORT_VAR)) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| StartupError::Server { var: PORT_VAR, reason: e.to_string() })?,
            None => DEFAULT_PORT,
        };
        let bind_addr = match non_blank(lookup(BIND_ADDR_VAR)) {
            Some(raw) => raw
                .parse::<IpAddr>()
                .map_err(|e| StartupError::Server { var: BIND_ADDR_VAR, reason: e.to_string() })?,
            None => DEFAULT_BIND_ADDR,
        };
        Ok(Self { bind_addr, port })
    }

    pub fn socket_addr(self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.port)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_owned()).filter(|v| !v.is_empty())
}
