//! Sign-in button shown while nobody is signed in.

use leptos::prelude::*;

use crate::components::config_notice::ConfigNotice;
use crate::components::session_provider::{use_identity, use_session};

#[component]
pub fn LoginButton() -> impl IntoView {
    let (session, identity) = match use_session().and_then(|session| Ok((session, use_identity()?))) {
        Ok(pair) => pair,
        Err(e) => return view! { <ConfigNotice error=e/> }.into_any(),
    };

    let signed_out = move || session.with(|s| !s.is_authenticated && !s.identity_loading);

    view! {
        {move || {
            signed_out()
                .then(|| {
                    let identity = identity.clone();
                    view! {
                        <button class="btn btn--primary" on:click=move |_| identity.login()>
                            "Iniciar sesión"
                        </button>
                    }
                })
        }}
    }
    .into_any()
}
