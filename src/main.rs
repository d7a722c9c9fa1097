use api::Config;
use shuttle_runtime::{Error, SecretStore, Secrets};
use tracing::warn;
use tracing_subscriber::EnvFilter;

#[shuttle_runtime::main]
async fn main(
    #[Secrets] secret_store: SecretStore,
) -> shuttle_axum::ShuttleAxum {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_toml(include_str!("../Config.toml"))
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    let api_key = secret_store
        .get("GEMINI_API_KEY")
        .filter(|key| !key.is_empty());
    if api_key.is_none() {
        warn!(task = "load secrets", "GEMINI_API_KEY was not found");
    }

    let router = api::serve(&config, api_key)
        .await
        .map_err(|e| Error::BuildPanic(e.to_string()))?;

    Ok(router.into())
}
