//! Session state for the current browser tab.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session answers "who is signed in and which backend role do they
//! have". Route guards and pages only read it; every mutation goes through
//! [`SessionContext`], which publishes a fresh [`Session`] snapshot after
//! each change (into a Leptos signal in the app, into a recorder in tests).
//!
//! DESIGN
//! ======
//! Each authentication change bumps a generation counter and the profile
//! fetch it starts carries that generation. A fetch that settles after a
//! newer change is dropped, so a slow response for a previous login can never
//! overwrite the current state.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::identity::{IdentityProvider, ProviderStatus};
use crate::net::api::{ApiClient, ApiError, FetchedProfile, ProfileFetch};
use crate::net::types::{IdentityUser, Profile, Role};

/// Read-only view of the session handed to consumers.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub identity_user: Option<IdentityUser>,
    pub profile: Option<Profile>,
    pub client: Option<ApiClient>,
    /// A profile fetch is in flight.
    pub loading: bool,
    /// The identity provider is still restoring, or its authentication flag
    /// has not reached this session yet.
    pub identity_loading: bool,
}

impl Session {
    pub fn is_loading(&self) -> bool {
        self.loading || self.identity_loading
    }

    pub fn role(&self) -> Option<&Role> {
        self.profile.as_ref().map(|profile| &profile.role)
    }
}

/// Marks the authentication change a fetch belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// How a settled fetch was applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Settled {
    /// Profile and client stored.
    Loaded,
    /// Fetch failed; session degraded to "no profile".
    Failed,
    /// A newer authentication change superseded this fetch.
    Stale,
}

/// Mutable session record plus its generation counter.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    session: Session,
    generation: u64,
    /// Provider flags as last mirrored; `None` before the first sync.
    provider_authenticated: Option<bool>,
    provider_loading: bool,
}

impl SessionState {
    /// A session waiting for the identity provider to report in.
    pub fn pending() -> Self {
        Self {
            session: Session { identity_loading: true, ..Session::default() },
            generation: 0,
            provider_authenticated: None,
            provider_loading: true,
        }
    }

    pub fn snapshot(&self) -> Session {
        self.session.clone()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Copy the provider's user and loading flag into the session.
    ///
    /// Until [`SessionState::begin`] catches up with the provider's
    /// authentication flag, the session reports itself as loading.
    pub fn sync_identity(&mut self, status: &ProviderStatus) {
        self.session.identity_user.clone_from(&status.user);
        self.provider_authenticated = Some(status.is_authenticated);
        self.provider_loading = status.is_loading;
        self.refresh_identity_loading();
    }

    /// Start a new authentication transition.
    ///
    /// Returns a ticket when a profile fetch must follow.
    pub fn begin(&mut self, is_authenticated: bool) -> Option<FetchTicket> {
        self.generation += 1;
        self.session.is_authenticated = is_authenticated;
        self.session.profile = None;
        self.session.client = None;
        self.session.loading = is_authenticated;
        self.refresh_identity_loading();
        is_authenticated.then_some(FetchTicket { generation: self.generation })
    }

    fn refresh_identity_loading(&mut self) {
        let behind = self
            .provider_authenticated
            .is_some_and(|authenticated| authenticated != self.session.is_authenticated);
        self.session.identity_loading = self.provider_loading || behind;
    }

    /// Apply the outcome of the fetch identified by `ticket`.
    pub fn settle(&mut self, ticket: FetchTicket, outcome: Result<FetchedProfile, ApiError>) -> Settled {
        if ticket.generation != self.generation {
            return Settled::Stale;
        }
        self.session.loading = false;
        match outcome {
            Ok(FetchedProfile { client, profile }) => {
                self.session.client = Some(client);
                self.session.profile = Some(profile);
                Settled::Loaded
            }
            Err(_) => {
                self.session.client = None;
                self.session.profile = None;
                Settled::Failed
            }
        }
    }
}

type Publish = Rc<dyn Fn(&Session)>;

/// Owner of the session: runs transitions and publishes snapshots.
#[derive(Clone)]
pub struct SessionContext {
    state: Rc<RefCell<SessionState>>,
    fetcher: Rc<dyn ProfileFetch>,
    publish: Publish,
}

impl SessionContext {
    pub fn new<F, P>(fetcher: F, publish: P) -> Self
    where
        F: ProfileFetch + 'static,
        P: Fn(&Session) + 'static,
    {
        Self {
            state: Rc::new(RefCell::new(SessionState::pending())),
            fetcher: Rc::new(fetcher),
            publish: Rc::new(publish),
        }
    }

    /// Current session record.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().snapshot()
    }

    /// Mirror provider status that does not change authentication.
    pub fn sync_identity(&self, status: &ProviderStatus) {
        self.update(|state| state.sync_identity(status));
    }

    /// Mirror whatever `provider` currently reports.
    pub fn sync_from(&self, provider: &dyn IdentityProvider) {
        self.sync_identity(&provider.status());
    }

    /// React to the provider's authentication flag flipping.
    ///
    /// When authenticated, asks `provider` for a token and exchanges it for a
    /// profile. Failures are logged and leave the session without a profile;
    /// nothing is returned to the caller as an error. Returns `None` when no
    /// fetch was needed.
    pub async fn on_authentication_change(
        &self,
        is_authenticated: bool,
        provider: &dyn IdentityProvider,
    ) -> Option<Settled> {
        let Some(ticket) = self.update(|state| state.begin(is_authenticated)) else {
            log::debug!("session signed out");
            return None;
        };

        let outcome = self.load_profile(provider).await;
        if let Err(e) = &outcome {
            log::error!("profile fetch failed: {e}");
        }

        let settled = self.update(|state| state.settle(ticket, outcome));
        match settled {
            Settled::Loaded => {
                let session = self.snapshot();
                if let Some(role) = session.role() {
                    log::info!("profile loaded with role {role}");
                }
            }
            Settled::Stale => log::debug!("discarding stale profile fetch"),
            Settled::Failed => {}
        }
        Some(settled)
    }

    async fn load_profile(&self, provider: &dyn IdentityProvider) -> Result<FetchedProfile, ApiError> {
        let token = provider.access_token().await?;
        self.fetcher.fetch_profile(&token).await
    }

    fn update<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        let (result, snapshot, changed) = {
            let mut state = self.state.borrow_mut();
            let before = state.snapshot();
            let result = f(&mut state);
            let snapshot = state.snapshot();
            let changed = snapshot != before;
            (result, snapshot, changed)
        };
        if changed {
            (self.publish)(&snapshot);
        }
        result
    }
}
