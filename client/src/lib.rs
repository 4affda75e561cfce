//! # inventory-client
//!
//! Leptos + WASM frontend for the inventory system.
//!
//! The user signs in with a hosted identity provider; the resulting access
//! token is exchanged for the backend's profile (`GET /auth/perfil`), whose
//! role gates the dashboard and the admin panel.
//!
//! Modules, leaves first: `config` (environment), `net` (wire types and the
//! REST client), `identity` (provider capability and the hosted adapter),
//! `state` (session transitions), `util` (route-guard decision), then the
//! Leptos `components`, `pages` and `app`.

pub mod app;
pub mod components;
pub mod config;
pub mod identity;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
