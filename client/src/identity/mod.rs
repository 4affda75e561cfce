//! Identity-provider capability consumed by the session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Token issuance and refresh belong to the hosted provider. The session only
//! needs the provider's current status and a way to ask for an access token,
//! which is what [`IdentityProvider`] exposes. [`hosted::HostedIdentity`] is
//! the browser adapter used by the app; tests substitute their own.

pub mod hosted;

use async_trait::async_trait;

use crate::net::api::ApiError;
use crate::net::types::IdentityUser;

/// Errors raised by identity-provider adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("user is not authenticated")]
    NotAuthenticated,

    #[error("access token expired")]
    TokenExpired,

    /// The provider redirected back with an error instead of a token.
    #[error("login rejected: {0}")]
    Denied(String),

    #[error("token storage failed: {0}")]
    Storage(String),

    #[error("user info lookup failed: {0}")]
    UserInfo(String),

    #[error("invalid provider url: {0}")]
    InvalidUrl(String),
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        Self::Token(err.to_string())
    }
}

/// Snapshot of the provider's authentication state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderStatus {
    pub is_authenticated: bool,
    pub is_loading: bool,
    pub user: Option<IdentityUser>,
}

impl ProviderStatus {
    /// State before the provider has restored any session.
    pub fn pending() -> Self {
        Self { is_authenticated: false, is_loading: true, user: None }
    }

    pub fn signed_out() -> Self {
        Self { is_authenticated: false, is_loading: false, user: None }
    }

    pub fn signed_in(user: IdentityUser) -> Self {
        Self { is_authenticated: true, is_loading: false, user: Some(user) }
    }
}

/// What the session needs from an identity provider.
#[async_trait(?Send)]
pub trait IdentityProvider {
    /// Current authentication status, read without subscribing.
    fn status(&self) -> ProviderStatus;

    /// Return a valid access token for the backend audience.
    ///
    /// # Errors
    ///
    /// Returns an [`IdentityError`] when no usable token is available.
    async fn access_token(&self) -> Result<String, IdentityError>;
}
