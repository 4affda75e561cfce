//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::config_notice::ConfigNotice;
use crate::components::login_button::LoginButton;
use crate::components::protected_route::ProtectedRoute;
use crate::components::session_provider::SessionProvider;
use crate::config::ClientConfig;
use crate::net::types::Role;
use crate::pages::{dashboard::DashboardPage, home::HomePage};

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="es">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Resolves configuration, installs the session provider and sets up routing.
/// A configuration failure replaces the whole app with a notice.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let content = match ClientConfig::from_env() {
        Ok(config) => view! {
            <SessionProvider config>
                <Router>
                    <header class="app-header">
                        <h1>"Sistema de Inventario"</h1>
                        <LoginButton/>
                    </header>
                    <main>
                        <Routes fallback=|| "Página no encontrada.".into_view()>
                            <Route path=StaticSegment("") view=HomePage/>
                            <Route path=StaticSegment("dashboard") view=StaffDashboard/>
                        </Routes>
                    </main>
                </Router>
            </SessionProvider>
        }
        .into_any(),
        Err(error) => view! { <ConfigNotice error/> }.into_any(),
    };

    view! {
        <Stylesheet id="leptos" href="/pkg/inventory.css"/>
        <Title text="Sistema de Inventario"/>
        <div class="app">{content}</div>
    }
}

/// Dashboard restricted to staff roles.
#[component]
fn StaffDashboard() -> impl IntoView {
    view! {
        <ProtectedRoute roles=vec![Role::Admin, Role::Employee]>
            <DashboardPage/>
        </ProtectedRoute>
    }
}
