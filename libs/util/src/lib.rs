use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::de::DeserializeOwned;
use toml::{map::Map, Value};

/// Root of the cargo workspace, resolved through `cargo locate-project`.
///
/// Only meaningful for binaries started through cargo (local development).
pub fn workspace_dir() -> anyhow::Result<PathBuf> {
    let output = std::process::Command::new(env!("CARGO"))
        .arg("locate-project")
        .arg("--workspace")
        .arg("--message-format=plain")
        .output()
        .context("failed to run cargo locate-project")?
        .stdout;
    let cargo_path = std::str::from_utf8(&output)
        .context("cargo locate-project returned invalid utf-8")?;
    let cargo_path = Path::new(cargo_path.trim());

    cargo_path
        .parent()
        .map(Path::to_path_buf)
        .context("Cargo.toml has no parent directory")
}

pub fn load_config<T: DeserializeOwned>(
    path: impl AsRef<Path>,
) -> anyhow::Result<T> {
    let path = path.as_ref();
    let config = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<T>(&config)
        .with_context(|| format!("failed to parse {}", path.display()))
}

/// Flat `KEY = "value"` secrets file. A missing file yields no secrets.
pub fn load_secrets(
    path: impl AsRef<Path>,
) -> anyhow::Result<Map<String, Value>> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(Map::new());
    }

    let secrets = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    toml::from_str::<Map<String, Value>>(&secrets)
        .with_context(|| format!("failed to parse {}", path.display()))
}

pub fn secret(secrets: &Map<String, Value>, key: &str) -> Option<String> {
    secrets
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
