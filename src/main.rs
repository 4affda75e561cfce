mod config;
mod routes;

use std::process::ExitCode;

use inventory_client::config::ClientConfig;

use crate::config::{ServerConfig, StartupError};

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is normal outside development.
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "inventory web failed to start");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let server = ServerConfig::from_env()?;
    let client = ClientConfig::from_env()?;
    tracing::info!(
        api_base_url = %client.api_base_url,
        identity_domain = %client.identity.domain,
        "client configuration resolved"
    );

    let app = routes::leptos_app()?;
    let addr = server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!(%addr, "inventory web listening");
    axum::serve(listener, app).await.map_err(StartupError::Serve)
}
