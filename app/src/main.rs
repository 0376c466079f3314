//! Coffer server binary
//!
//! Hosts the fund API on localhost for the frontend. Configuration comes
//! from the JSON file named by `COFFER_CONFIG`, falling back to defaults.

use anyhow::Context;
use coffer_api::AppState;
use coffer_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("coffer=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .init();

    tracing::info!("Starting Coffer");

    let config = load_config()?;
    let port = config.api_port;
    let state = AppState::with_config(config);

    coffer_api::start_server(state, port)
        .await
        .context("API server failed")?;

    Ok(())
}

fn load_config() -> anyhow::Result<AppConfig> {
    match std::env::var("COFFER_CONFIG") {
        Ok(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path))?;
            let config: AppConfig = serde_json::from_str(&raw)
                .with_context(|| format!("parsing config file {}", path))?;
            tracing::info!("Loaded configuration from {}", path);
            Ok(config)
        }
        Err(_) => Ok(AppConfig::default()),
    }
}
