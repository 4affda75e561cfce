//! Landing page showing the signed-in user's profile and role.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the public route. It never redirects; it walks the visitor through
//! the session states: provider restoring, signed out, waiting for the backend
//! profile, and resolved. The admin panel is gated on the backend role, not on
//! anything the identity provider reports.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::config_notice::ConfigNotice;
use crate::components::logout_button::LogoutButton;
use crate::components::session_provider::use_session;
use crate::state::session::Session;

/// Name shown when neither the provider nor the backend supplies one.
const FALLBACK_NAME: &str = "usuario";

/// Display data for a resolved profile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfileCard {
    pub name: String,
    pub email: Option<String>,
    pub role: String,
    pub show_admin_panel: bool,
}

/// What the landing page shows for a given session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LandingView {
    Loading,
    SignedOut,
    /// Signed in with the provider but no backend profile (yet, or at all).
    VerifyingRole,
    Profile(ProfileCard),
}

/// Pick the landing view for `session`.
pub fn landing_view(session: &Session) -> LandingView {
    if session.is_loading() {
        return LandingView::Loading;
    }
    if !session.is_authenticated {
        return LandingView::SignedOut;
    }
    let Some(profile) = &session.profile else {
        return LandingView::VerifyingRole;
    };

    let user = session.identity_user.as_ref();
    let name = user
        .and_then(|u| u.name.clone())
        .or_else(|| profile.nombre.clone())
        .unwrap_or_else(|| FALLBACK_NAME.to_owned());
    let email = user.and_then(|u| u.email.clone()).or_else(|| profile.email.clone());

    LandingView::Profile(ProfileCard {
        name,
        email,
        role: profile.role.to_string(),
        show_admin_panel: profile.role.is_admin(),
    })
}

#[component]
pub fn HomePage() -> impl IntoView {
    let session = match use_session() {
        Ok(session) => session,
        Err(e) => return view! { <ConfigNotice error=e/> }.into_any(),
    };

    view! {
        <section class="landing">
            {move || match session.with(landing_view) {
                LandingView::Loading => view! { <div class="landing__status">"Cargando perfil..."</div> }.into_any(),
                LandingView::SignedOut => {
                    view! { <p class="landing__status">"Inicia sesión para consultar tu perfil."</p> }.into_any()
                }
                LandingView::VerifyingRole => {
                    view! {
                        <div class="landing__status">
                            "Verificando rol en el sistema..."
                            <LogoutButton/>
                        </div>
                    }
                        .into_any()
                }
                LandingView::Profile(card) => profile_card(card).into_any(),
            }}
        </section>
    }
    .into_any()
}

fn profile_card(card: ProfileCard) -> impl IntoView {
    view! {
        <div class="profile">
            <h2>"Bienvenido, " {card.name}</h2>
            {card.email.map(|email| view! { <p>"Email: " {email}</p> })}
            <h3>"Rol en el Sistema: " <strong>{card.role}</strong></h3>
            {card
                .show_admin_panel
                .then(|| {
                    view! {
                        <div class="admin-panel">
                            <h4>"Panel de Administrador"</h4>
                            <p>"Puedes ver este panel porque eres Administrador."</p>
                        </div>
                    }
                })}
            <LogoutButton/>
        </div>
    }
}
