//! Reactive wrapper that owns the session for the component tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! `SessionProvider` creates the identity adapter and the [`SessionContext`],
//! publishes session snapshots into a signal, and provides both through
//! context. Components read them with [`use_session`] / [`use_identity`],
//! which fail with a configuration error outside the provider.

use leptos::prelude::*;

use crate::config::{ClientConfig, ConfigError};
use crate::identity::hosted::HostedIdentity;
use crate::net::api::HttpProfileFetcher;
use crate::state::session::{Session, SessionContext, SessionState};

/// Read the session signal installed by [`SessionProvider`].
///
/// # Errors
///
/// Returns [`ConfigError::OutsideProvider`] when no provider is mounted above.
pub fn use_session() -> Result<ReadSignal<Session>, ConfigError> {
    use_context::<ReadSignal<Session>>().ok_or(ConfigError::OutsideProvider("use_session"))
}

/// Read the identity-provider handle installed by [`SessionProvider`].
///
/// # Errors
///
/// Returns [`ConfigError::OutsideProvider`] when no provider is mounted above.
pub fn use_identity() -> Result<HostedIdentity, ConfigError> {
    use_context::<HostedIdentity>().ok_or(ConfigError::OutsideProvider("use_identity"))
}

/// Installs the session and identity contexts for `children`.
#[component]
pub fn SessionProvider(config: ClientConfig, children: Children) -> impl IntoView {
    let identity = HostedIdentity::new(config.identity.clone());
    let session = RwSignal::new(SessionState::pending().snapshot());
    let context = SessionContext::new(HttpProfileFetcher::new(config.api_base_url.clone()), move |snapshot: &Session| {
        session.set(snapshot.clone());
    });

    context.sync_from(&identity);

    provide_context(session.read_only());
    provide_context(identity.clone());

    let status = identity.status_signal();

    // Mirror provider user/loading into the session. A provider that reports
    // signed in keeps the session loading until the transition below begins.
    let mirror = context.clone();
    Effect::new(move || {
        mirror.sync_identity(&status.get());
    });

    // Refetch the profile whenever the authentication flag flips.
    let is_authenticated = Memo::new(move |_| status.with(|s| s.is_authenticated));
    let transitions = context.clone();
    let provider = identity.clone();
    Effect::new(move || {
        let authenticated = is_authenticated.get();
        let context = transitions.clone();
        let provider = provider.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            context.on_authentication_change(authenticated, &provider).await;
        });
        #[cfg(not(feature = "hydrate"))]
        let _ = (authenticated, context, provider);
    });

    // Restore any existing login once mounted in the browser.
    #[cfg(feature = "hydrate")]
    {
        let restore = identity.clone();
        Effect::new(move || {
            let restore = restore.clone();
            leptos::task::spawn_local(async move {
                restore.restore().await;
            });
        });
    }

    children()
}
