use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context;
use api::{serve, Config};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;
use util::{load_config, load_secrets, secret, workspace_dir};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let workspace = workspace_dir()?;
    let config: Config = load_config(workspace.join("Config.toml"))?;
    let secrets = load_secrets(workspace.join("Secrets.dev.toml"))?;
    let api_key = secret(&secrets, "GEMINI_API_KEY");

    let router = serve(&config, api_key).await?;

    let address = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server.port));
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {}", address))?;
    info!(task = "listen", address = address.to_string());

    Ok(axum::serve(listener, router).await?)
}
