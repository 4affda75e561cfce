//! Browser adapter for a hosted (Auth0-style) identity provider.
//!
//! Login is a full-page redirect to `https://{domain}/authorize`; the provider
//! sends the user back with the access token in the URL fragment. The token is
//! kept in `sessionStorage` until it expires and user details come from
//! `https://{domain}/userinfo`. Refresh is not attempted: an expired token
//! simply means the user signs in again.

#[cfg(test)]
#[path = "hosted_test.rs"]
mod hosted_test;

use async_trait::async_trait;
use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use super::{IdentityError, IdentityProvider, ProviderStatus};
use crate::config::IdentityConfig;
use crate::net::api::ApiClient;
use crate::net::types::IdentityUser;

pub const LOGIN_SCOPE: &str = "openid profile email";
/// Lifetime assumed when the redirect omits `expires_in`.
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 3600;
/// Tokens this close to expiry are treated as expired.
pub const EXPIRY_SKEW_MS: u64 = 30_000;

/// Access token persisted for the lifetime of the tab.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub expires_at_ms: u64,
}

impl StoredToken {
    pub fn is_fresh(&self, now_ms: u64) -> bool {
        now_ms.saturating_add(EXPIRY_SKEW_MS) < self.expires_at_ms
    }
}

/// Hosted login URL that returns to `redirect_uri`.
///
/// # Errors
///
/// Returns [`IdentityError::InvalidUrl`] if the configured domain does not
/// form a valid URL.
pub fn login_url(config: &IdentityConfig, redirect_uri: &str) -> Result<String, IdentityError> {
    let mut params = vec![
        ("response_type", "token"),
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", redirect_uri),
        ("scope", LOGIN_SCOPE),
    ];
    if let Some(audience) = &config.audience {
        params.push(("audience", audience.as_str()));
    }
    provider_url(config, "/authorize", &params)
}

/// Hosted logout URL that returns to `return_to`.
///
/// # Errors
///
/// Returns [`IdentityError::InvalidUrl`] if the configured domain does not
/// form a valid URL.
pub fn logout_url(config: &IdentityConfig, return_to: &str) -> Result<String, IdentityError> {
    provider_url(config, "/v2/logout", &[("client_id", config.client_id.as_str()), ("returnTo", return_to)])
}

fn provider_url(config: &IdentityConfig, path: &str, params: &[(&str, &str)]) -> Result<String, IdentityError> {
    url::Url::parse_with_params(&format!("https://{}{path}", config.domain), params)
        .map(|url| url.to_string())
        .map_err(|e| IdentityError::InvalidUrl(e.to_string()))
}

/// Whether a location fragment is a provider redirect worth consuming.
pub fn is_redirect_fragment(fragment: &str) -> bool {
    let fragment = fragment.trim_start_matches('#');
    url::form_urlencoded::parse(fragment.as_bytes()).any(|(key, _)| key == "access_token" || key == "error")
}

/// Extract the token from a redirect fragment such as
/// `#access_token=...&token_type=Bearer&expires_in=7200`.
///
/// Returns `Ok(None)` when the fragment carries no token.
///
/// # Errors
///
/// Returns [`IdentityError::Denied`] when the provider reported an error.
pub fn parse_redirect_fragment(fragment: &str, now_ms: u64) -> Result<Option<StoredToken>, IdentityError> {
    let fragment = fragment.trim_start_matches('#');
    let mut access_token = None;
    let mut expires_in = None;
    let mut error = None;
    let mut description = None;

    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "access_token" => access_token = Some(value.into_owned()),
            "expires_in" => expires_in = value.parse::<u64>().ok(),
            "error" => error = Some(value.into_owned()),
            "error_description" => description = Some(value.into_owned()),
            _ => {}
        }
    }

    if let Some(error) = error {
        return Err(IdentityError::Denied(description.unwrap_or(error)));
    }

    let lifetime_ms = expires_in
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_SECS)
        .saturating_mul(1000);
    Ok(access_token
        .filter(|token| !token.is_empty())
        .map(|access_token| StoredToken { access_token, expires_at_ms: now_ms.saturating_add(lifetime_ms) }))
}

/// Look up the signed-in user's details at the provider.
///
/// # Errors
///
/// Returns [`IdentityError::UserInfo`] if the request fails.
pub async fn fetch_user_info(config: &IdentityConfig, access_token: &str) -> Result<IdentityUser, IdentityError> {
    let client = ApiClient::new(&format!("https://{}", config.domain), access_token)
        .map_err(|e| IdentityError::UserInfo(e.to_string()))?;
    client
        .get_json::<IdentityUser>("/userinfo")
        .await
        .map_err(|e| IdentityError::UserInfo(e.to_string()))
}

/// Reactive identity-provider handle shared through context.
#[derive(Clone)]
pub struct HostedIdentity {
    config: IdentityConfig,
    status: RwSignal<ProviderStatus>,
    token: RwSignal<Option<StoredToken>>,
}

impl HostedIdentity {
    pub fn new(config: IdentityConfig) -> Self {
        Self {
            config,
            status: RwSignal::new(ProviderStatus::pending()),
            token: RwSignal::new(None),
        }
    }

    /// Reactive view of the provider status.
    pub fn status_signal(&self) -> ReadSignal<ProviderStatus> {
        self.status.read_only()
    }

    /// Restore a session from the redirect fragment or `sessionStorage`.
    ///
    /// Always leaves the status out of the pending state.
    pub async fn restore(&self) {
        let token = match restore_token() {
            Ok(token) => token,
            Err(e) => {
                log::warn!("identity redirect rejected: {e}");
                None
            }
        };

        let Some(token) = token else {
            self.status.set(ProviderStatus::signed_out());
            return;
        };

        match fetch_user_info(&self.config, &token.access_token).await {
            Ok(user) => {
                log::info!("identity restored for {}", user.sub);
                self.token.set(Some(token));
                self.status.set(ProviderStatus::signed_in(user));
            }
            Err(e) => {
                log::warn!("discarding stored token: {e}");
                #[cfg(feature = "hydrate")]
                browser::clear_token();
                self.token.set(None);
                self.status.set(ProviderStatus::signed_out());
            }
        }
    }

    /// Redirect the browser to the hosted login page.
    pub fn login(&self) {
        #[cfg(feature = "hydrate")]
        {
            let Some(origin) = browser::origin() else {
                return;
            };
            match login_url(&self.config, &origin) {
                Ok(url) => browser::navigate(&url),
                Err(e) => log::error!("login redirect failed: {e}"),
            }
        }
    }

    /// Forget the token locally, then end the provider session.
    pub fn logout(&self) {
        self.token.set(None);
        self.status.set(ProviderStatus::signed_out());
        #[cfg(feature = "hydrate")]
        {
            browser::clear_token();
            let Some(origin) = browser::origin() else {
                return;
            };
            match logout_url(&self.config, &origin) {
                Ok(url) => browser::navigate(&url),
                Err(e) => log::error!("logout redirect failed: {e}"),
            }
        }
    }
}

#[async_trait(?Send)]
impl IdentityProvider for HostedIdentity {
    fn status(&self) -> ProviderStatus {
        self.status.get_untracked()
    }

    async fn access_token(&self) -> Result<String, IdentityError> {
        let token = self.token.get_untracked().ok_or(IdentityError::NotAuthenticated)?;
        if !token.is_fresh(now_ms()) {
            return Err(IdentityError::TokenExpired);
        }
        Ok(token.access_token)
    }
}

fn restore_token() -> Result<Option<StoredToken>, IdentityError> {
    #[cfg(feature = "hydrate")]
    {
        let now = now_ms();
        if let Some(fragment) = browser::take_redirect_fragment() {
            if let Some(token) = parse_redirect_fragment(&fragment, now)? {
                browser::save_token(&token)?;
                return Ok(Some(token));
            }
        }
        Ok(browser::load_token().filter(|token| token.is_fresh(now)))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Ok(None)
    }
}

#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn now_ms() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(not(feature = "hydrate"))]
fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

#[cfg(feature = "hydrate")]
mod browser {
    use super::{IdentityError, StoredToken, is_redirect_fragment};

    const STORAGE_KEY: &str = "inventory_access_token";

    pub fn origin() -> Option<String> {
        web_sys::window()?.location().origin().ok()
    }

    pub fn navigate(url: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(url);
        }
    }

    /// Return the provider redirect fragment and strip it from the address bar.
    pub fn take_redirect_fragment() -> Option<String> {
        let window = web_sys::window()?;
        let location = window.location();
        let hash = location.hash().ok()?;
        if !is_redirect_fragment(&hash) {
            return None;
        }
        if let Ok(history) = window.history() {
            let path = location.pathname().unwrap_or_else(|_| "/".to_owned());
            let _ = history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&path));
        }
        Some(hash)
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.session_storage().ok().flatten()
    }

    pub fn load_token() -> Option<StoredToken> {
        let raw = storage()?.get_item(STORAGE_KEY).ok()??;
        serde_json::from_str(&raw).ok()
    }

    pub fn save_token(token: &StoredToken) -> Result<(), IdentityError> {
        let storage = storage().ok_or_else(|| IdentityError::Storage("sessionStorage unavailable".to_owned()))?;
        let raw = serde_json::to_string(token).map_err(|e| IdentityError::Storage(e.to_string()))?;
        storage
            .set_item(STORAGE_KEY, &raw)
            .map_err(|_| IdentityError::Storage("sessionStorage write rejected".to_owned()))
    }

    pub fn clear_token() {
        if let Some(storage) = storage() {
            let _ = storage.remove_item(STORAGE_KEY);
        }
    }
}
