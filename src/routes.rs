//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module stitches the health probe with Leptos SSR rendering under a
//! single Axum router. The compiled WASM/JS/CSS bundle is served from the
//! Leptos site root under `/pkg`. The inventory REST API is a separate
//! service; nothing here proxies it.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use inventory_client::app::{App, shell};
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::StartupError;

/// Non-Leptos routes.
pub fn api_routes() -> Router {
    Router::new().route("/healthz", get(healthz))
}

/// Full host app: health probe + Leptos SSR + static bundle.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[workspace.metadata.leptos]` section or `LEPTOS_*` variables).
pub fn leptos_app() -> Result<Router, StartupError> {
    let conf = get_configuration(None).map_err(|e| StartupError::Leptos(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(api_routes()
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
