//! REST helpers for the inventory backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `fetch_profile` exchanges an identity-provider access token for the
//! backend's view of the user and an [`ApiClient`] bound to that token. The
//! session context owns the recovery policy, so every failure here is
//! returned to the caller untouched.
//!
//! ERROR HANDLING
//! ==============
//! `ApiError` is `Clone` so it can sit inside reactive resources. Non-2xx
//! responses carry the status and endpoint; the body is not kept.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use super::types::{Product, Profile};

pub const PROFILE_PATH: &str = "/auth/perfil";
pub const PRODUCTS_PATH: &str = "/productos";

/// Errors produced by backend calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A request was attempted without a bearer token.
    #[error("access token is empty")]
    EmptyToken,

    /// The identity provider could not supply a token.
    #[error("access token unavailable: {0}")]
    Token(String),

    /// The HTTP request itself failed (network, CORS, DNS).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("unexpected status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// A URL could not be built from the configured base.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

/// Authenticated handle to the backend: base URL plus bearer credential.
///
/// Holds one `reqwest::Client` (and so one connection pool) for all calls made
/// through it. Equality ignores the HTTP handle.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        self.base_url == other.base_url && self.token == other.token
    }
}

impl Eq for ApiClient {}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Bind a client to `base_url` using `token` as bearer credential.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyToken`] for a blank token.
    pub fn new(base_url: &str, token: &str) -> Result<Self, ApiError> {
        Self::with_http(reqwest::Client::new(), base_url, token)
    }

    /// Like [`ApiClient::new`], but sharing an existing HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyToken`] for a blank token.
    pub fn with_http(http: reqwest::Client, base_url: &str, token: &str) -> Result<Self, ApiError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::EmptyToken);
        }
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned(), token: token.to_owned() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn endpoint(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// `GET {base}{path}` with the bearer header, decoding a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Request`] on transport failure,
    /// [`ApiError::Status`] on a non-2xx status and [`ApiError::Parse`] when
    /// the body does not decode into `T`.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.endpoint(path);
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status: status.as_u16(), endpoint: url });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Result of a successful profile exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchedProfile {
    pub client: ApiClient,
    pub profile: Profile,
}

/// Token → profile exchange. Implemented over HTTP in production and by
/// fakes in session tests.
#[async_trait(?Send)]
pub trait ProfileFetch {
    /// Exchange `token` for an authenticated client and the user's profile.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for an empty token or any failed request.
    async fn fetch_profile(&self, token: &str) -> Result<FetchedProfile, ApiError>;
}

/// [`ProfileFetch`] backed by `GET {base}/auth/perfil`.
///
/// Every client it hands out shares the fetcher's connection pool.
#[derive(Clone, Debug)]
pub struct HttpProfileFetcher {
    http: reqwest::Client,
    base_url: String,
}

impl HttpProfileFetcher {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { http: reqwest::Client::new(), base_url: base_url.into() }
    }
}

#[async_trait(?Send)]
impl ProfileFetch for HttpProfileFetcher {
    async fn fetch_profile(&self, token: &str) -> Result<FetchedProfile, ApiError> {
        let client = ApiClient::with_http(self.http.clone(), &self.base_url, token)?;
        load_profile(client).await
    }
}

/// Build an authenticated client for `token` and load the caller's profile.
///
/// # Errors
///
/// Propagates every failure; the caller decides how to degrade.
pub async fn fetch_profile(base_url: &str, token: &str) -> Result<FetchedProfile, ApiError> {
    load_profile(ApiClient::new(base_url, token)?).await
}

async fn load_profile(client: ApiClient) -> Result<FetchedProfile, ApiError> {
    let profile = client.get_json::<Profile>(PROFILE_PATH).await?;
    Ok(FetchedProfile { client, profile })
}

/// List products through an authenticated client.
///
/// # Errors
///
/// Returns an [`ApiError`] if the request fails or the body is malformed.
pub async fn list_products(client: &ApiClient) -> Result<Vec<Product>, ApiError> {
    client.get_json(PRODUCTS_PATH).await
}
