//! Client configuration resolved from environment variables.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle cannot read the process environment, so the WASM build
//! bakes the values in at compile time with `option_env!`. Native builds (SSR
//! on the host server, tests) fall back to the runtime environment. A missing
//! value is a startup misconfiguration: the host refuses to boot and the app
//! renders a configuration notice instead of the routes.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const API_BASE_URL_VAR: &str = "INVENTORY_API_BASE_URL";
pub const IDENTITY_DOMAIN_VAR: &str = "INVENTORY_IDENTITY_DOMAIN";
pub const IDENTITY_CLIENT_ID_VAR: &str = "INVENTORY_IDENTITY_CLIENT_ID";
pub const IDENTITY_AUDIENCE_VAR: &str = "INVENTORY_IDENTITY_AUDIENCE";

/// Errors raised while resolving configuration or shared context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("missing configuration: {var} not set")]
    Missing { var: &'static str },

    /// A variable is set but unusable.
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },

    /// A context accessor ran outside the provider that installs it.
    #[error("{0} must be used inside a SessionProvider")]
    OutsideProvider(&'static str),
}

/// Settings for the hosted identity provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    /// Tenant host, e.g. `tenant.eu.auth0.com` (no scheme).
    pub domain: String,
    pub client_id: String,
    /// API audience requested with the access token, when the tenant needs one.
    pub audience: Option<String>,
}

/// Typed client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL without a trailing slash.
    pub api_base_url: String,
    pub identity: IdentityConfig,
}

impl ClientConfig {
    /// Resolve configuration from compile-time values, then the process env.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::Invalid`] when a
    /// required variable is absent or malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(lookup_var)
    }

    /// Resolve configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_base_url = parse_base_url(&require(&lookup, API_BASE_URL_VAR)?)?;
        let domain = parse_domain(&require(&lookup, IDENTITY_DOMAIN_VAR)?)?;
        let client_id = require(&lookup, IDENTITY_CLIENT_ID_VAR)?;
        let audience = optional(&lookup, IDENTITY_AUDIENCE_VAR);

        Ok(Self { api_base_url, identity: IdentityConfig { domain, client_id, audience } })
    }
}

fn lookup_var(key: &str) -> Option<String> {
    let baked = match key {
        API_BASE_URL_VAR => option_env!("INVENTORY_API_BASE_URL"),
        IDENTITY_DOMAIN_VAR => option_env!("INVENTORY_IDENTITY_DOMAIN"),
        IDENTITY_CLIENT_ID_VAR => option_env!("INVENTORY_IDENTITY_CLIENT_ID"),
        IDENTITY_AUDIENCE_VAR => option_env!("INVENTORY_IDENTITY_AUDIENCE"),
        _ => None,
    };
    baked.map(str::to_owned).or_else(|| std::env::var(key).ok())
}

fn require<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, var).ok_or(ConfigError::Missing { var })
}

fn optional<F>(lookup: &F, var: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|raw| raw.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| ConfigError::Invalid { var: API_BASE_URL_VAR, reason: e.to_string() })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid {
            var: API_BASE_URL_VAR,
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    Ok(raw.trim_end_matches('/').to_owned())
}

fn parse_domain(raw: &str) -> Result<String, ConfigError> {
    let domain = raw
        .trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/');
    if domain.is_empty() || domain.contains('/') {
        return Err(ConfigError::Invalid {
            var: IDENTITY_DOMAIN_VAR,
            reason: format!("expected a bare host name, got '{raw}'"),
        });
    }
    Ok(domain.to_owned())
}
