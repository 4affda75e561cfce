//! Dashboard page listing inventory products.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind `ProtectedRoute`, so a visitor normally only gets here with
//! a staff role. The page still checks for a backend profile and client on its
//! own, because the client it uses for `/productos` comes from the session.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;

use crate::components::config_notice::ConfigNotice;
use crate::components::session_provider::use_session;
use crate::net::api::{ApiClient, ApiError, list_products};
use crate::net::types::Product;
use crate::state::session::Session;

/// What the dashboard shows for a given session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardView {
    Loading,
    Unauthorized,
    /// Ready to list products with this client.
    Ready(ApiClient),
}

/// Pick the dashboard view for `session`.
pub fn dashboard_view(session: &Session) -> DashboardView {
    if session.is_loading() {
        return DashboardView::Loading;
    }
    match (&session.profile, &session.client) {
        (Some(_), Some(client)) => DashboardView::Ready(client.clone()),
        _ => DashboardView::Unauthorized,
    }
}

/// Message for a failed product load.
pub fn products_error_message(err: &ApiError) -> String {
    format!("No se pudieron cargar los productos: {err}")
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = match use_session() {
        Ok(session) => session,
        Err(e) => return view! { <ConfigNotice error=e/> }.into_any(),
    };

    let client = Memo::new(move |_| session.with(|s| s.client.clone()));
    let products = LocalResource::new(move || {
        let client = client.get();
        async move {
            let Some(client) = client else {
                return Ok(Vec::new());
            };
            let result = list_products(&client).await;
            if let Err(e) = &result {
                log::error!("product list failed: {e}");
            }
            result
        }
    });

    view! {
        {move || match session.with(dashboard_view) {
            DashboardView::Loading => view! { <div class="dashboard__status">"Cargando..."</div> }.into_any(),
            DashboardView::Unauthorized => view! { <div class="dashboard__status">"No autorizado"</div> }.into_any(),
            DashboardView::Ready(_) => {
                view! {
                    <section class="dashboard">
                        <h2>"Dashboard"</h2>
                        <Suspense fallback=|| view! { <p>"Cargando productos..."</p> }>
                            {move || products.get().map(product_list)}
                        </Suspense>
                    </section>
                }
                    .into_any()
            }
        }}
    }
    .into_any()
}

fn product_list(result: Result<Vec<Product>, ApiError>) -> AnyView {
    match result {
        Ok(products) if products.is_empty() => view! { <p>"No hay productos registrados."</p> }.into_any(),
        Ok(products) => {
            view! {
                <ul class="product-list">
                    {products
                        .into_iter()
                        .map(|p| view! { <li>{p.nombre}</li> })
                        .collect_view()}
                </ul>
            }
                .into_any()
        }
        Err(e) => view! { <p class="dashboard__error">{products_error_message(&e)}</p> }.into_any(),
    }
}
