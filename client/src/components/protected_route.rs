//! Role-gated wrapper for protected routes.
//!
//! SYSTEM CONTEXT
//! ==============
//! The decision itself lives in `util::auth::guard_decision`; this component
//! only renders the outcome and performs the redirect. Redirects replace the
//! current history entry so "back" does not bounce into the guard again.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::config_notice::ConfigNotice;
use crate::components::session_provider::use_session;
use crate::net::types::Role;
use crate::util::auth::{GuardDecision, guard_decision};

/// Render `children` only for authenticated users whose role is in `roles`.
/// An empty `roles` admits any authenticated user.
#[component]
pub fn ProtectedRoute(#[prop(optional)] roles: Vec<Role>, children: ChildrenFn) -> impl IntoView {
    let session = match use_session() {
        Ok(session) => session,
        Err(e) => return view! { <ConfigNotice error=e/> }.into_any(),
    };

    let decision = Memo::new(move |_| session.with(|s| guard_decision(s, &roles)));

    let navigate = use_navigate();
    Effect::new(move || {
        if let GuardDecision::Redirect(to) = decision.get() {
            navigate(to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });

    view! {
        {move || match decision.get() {
            GuardDecision::Loading => view! { <div class="guard guard--loading">"Cargando..."</div> }.into_any(),
            GuardDecision::Unauthorized => view! { <div class="guard guard--denied">"No autorizado"</div> }.into_any(),
            GuardDecision::Redirect(_) => ().into_any(),
            GuardDecision::Render => children().into_any(),
        }}
    }
    .into_any()
}
