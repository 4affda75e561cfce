//! Inline notice for configuration failures.

use leptos::prelude::*;

use crate::config::ConfigError;

/// Render a configuration error in place of the component that needed it.
#[component]
pub fn ConfigNotice(error: ConfigError) -> impl IntoView {
    log::error!("configuration error: {error}");
    view! {
        <div class="config-error" role="alert">
            <strong>"Error de configuración"</strong>
            <p>{error.to_string()}</p>
        </div>
    }
}
