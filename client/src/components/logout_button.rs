//! Sign-out button.
//!
//! Clears the locally stored token and hands the browser to the identity
//! provider's logout endpoint, which returns to the app origin.

use leptos::prelude::*;

use crate::components::config_notice::ConfigNotice;
use crate::components::session_provider::use_identity;

#[component]
pub fn LogoutButton() -> impl IntoView {
    let identity = match use_identity() {
        Ok(identity) => identity,
        Err(e) => return view! { <ConfigNotice error=e/> }.into_any(),
    };

    view! {
        <button class="btn btn--secondary" on:click=move |_| identity.logout()>
            "Cerrar sesión"
        </button>
    }
    .into_any()
}
