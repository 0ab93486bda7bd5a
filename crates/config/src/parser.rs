use crate::*;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

#[instrument(skip(path))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<WallSyncConfig> {
    let path = path.as_ref();
    info!("Loading configuration from: {:?}", path);

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    debug!("Config file content length: {} bytes", content.len());

    // Perform environment variable substitution
    let substituted = substitution::substitute_env_vars(&content)?;

    let config: WallSyncConfig = serde_yaml::from_str(&substituted)
        .with_context(|| "Failed to parse YAML configuration")?;

    info!("Configuration loaded successfully");
    Ok(config)
}

#[instrument]
pub fn generate_default_config() -> WallSyncConfig {
    use defaults::*;

    WallSyncConfig {
        feed: FeedConfig {
            endpoint: "https://feed.example.com/api/options/listing".to_string(),
            underlying: "BTC".to_string(),
            timeout_seconds: default_timeout_seconds(),
        },
        levels: LevelsConfig::default(),
        ledger: LedgerConfig {
            path: "data/levels.csv".into(),
            url: None,
        },
        sync: SyncConfig {
            poll_interval_seconds: default_poll_interval_seconds(),
            target_fragment: "GEX Levels".to_string(),
            settle_delay_ms: default_settle_delay_ms(),
            bridge_url: default_bridge_url(),
        },
        telemetry: TelemetryConfig::default(),
    }
}

#[instrument(skip(config, path))]
pub fn save_config<P: AsRef<Path>>(config: &WallSyncConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    let yaml = serde_yaml::to_string(config).context("Failed to serialize configuration")?;
    fs::write(path, yaml).with_context(|| format!("Failed to write config file: {:?}", path))?;
    info!("Configuration written to: {:?}", path);
    Ok(())
}
