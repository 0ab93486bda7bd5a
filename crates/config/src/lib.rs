use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod defaults;
pub mod parser;
pub mod substitution;
pub mod validator;

pub use defaults::*;
pub use parser::*;
pub use substitution::*;
pub use validator::*;

/// Top-level WallSync configuration, loaded from one YAML file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WallSyncConfig {
    pub feed: FeedConfig,
    #[serde(default)]
    pub levels: LevelsConfig,
    pub ledger: LedgerConfig,
    pub sync: SyncConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Market data source: the instrument listing endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedConfig {
    /// Listing endpoint URL; queried with `?underlying=<symbol>`.
    pub endpoint: String,
    /// Underlying asset symbol (e.g. "BTC").
    pub underlying: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Constants for the net gamma exposure formula. Externally supplied here,
/// never hand-picked per run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LevelsConfig {
    #[serde(default = "default_contract_multiplier")]
    pub contract_multiplier: f64,
    #[serde(default = "default_scaling_factor")]
    pub scaling_factor: f64,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            contract_multiplier: default_contract_multiplier(),
            scaling_factor: default_scaling_factor(),
        }
    }
}

/// Where the level ledger lives.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Flat file the producer appends to (and the consumer reads when no
    /// `url` is configured).
    pub path: PathBuf,
    /// Published copy of the ledger; when set, the sync client polls this
    /// URL instead of reading `path`.
    #[serde(default)]
    pub url: Option<String>,
}

/// Synchronization client tunables.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Poll cadence. A tunable, not a hard contract; 5-15 minutes intended.
    #[serde(default = "default_poll_interval_seconds")]
    pub poll_interval_seconds: u64,
    /// Name fragment identifying the target indicator instance in the host.
    pub target_fragment: String,
    /// Bounded wait after opening the configuration surface, standing in
    /// for a readiness signal the host does not provide.
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
    /// Local chart object-model bridge endpoint.
    #[serde(default = "default_bridge_url")]
    pub bridge_url: String,
}

/// Logging and metrics.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TelemetryConfig {
    /// One of: pretty, json, compact.
    #[serde(default = "default_log_format")]
    pub log_format: String,
    /// When set, a Prometheus exporter listens on this port.
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_format: default_log_format(),
            metrics_port: None,
        }
    }
}
