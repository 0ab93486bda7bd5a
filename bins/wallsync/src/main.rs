//! WallSync CLI Binary
//!
//! This is the main entry point for WallSync. It wires the aggregation
//! pipeline (feed -> engine -> ledger) and the synchronization client
//! (ledger -> automation driver -> charting host) behind a small set of
//! commands.

use anyhow::{Context, Result};
use automation::{AutomationDriver, BridgeSurface};
use cli::{Cli, Commands};
use config::{
    generate_default_config, load_config, save_config, validate_config, WallSyncConfig,
};
use feed::{HttpInstrumentFeed, InstrumentFeed};
use ledger::{FileLedger, HttpLedgerReader, LedgerReader, LedgerStore};
use levels::{GexParams, LevelsError};
use observability::{init_logging, init_metrics, LogFormat, PipelineMetrics};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use sync_client::{LogStatusObserver, SyncClient};
use tokio::sync::watch;
use tracing::{error, info, warn};

/// Timeout for ledger polls; a poll fetches one small text file.
const LEDGER_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for individual bridge calls against the charting host.
const BRIDGE_CALL_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Commands::Aggregate { config } => aggregate_command(config).await,
        Commands::Sync { config, once } => sync_command(config, once).await,
        Commands::Show { config } => show_command(config).await,
        Commands::Validate { config } => validate_command(config).await,
        Commands::Init { output } => init_command(output).await,
    }
}

/// Load the config, surface the validation report, and refuse to run on
/// errors. Warnings are logged and tolerated.
fn load_and_check<P: AsRef<Path>>(config_path: P) -> Result<WallSyncConfig> {
    let config = load_config(config_path)?;
    let report = validate_config(&config);

    if !report.warnings.is_empty() {
        for warning in &report.warnings {
            warn!(field = %warning.field, message = %warning.message, "Configuration warning");
        }
    }

    if !report.is_valid() {
        error!(
            error_count = report.errors.len(),
            "Configuration validation failed"
        );
        for err in &report.errors {
            error!("{}", err);
        }
        anyhow::bail!("Cannot run due to configuration errors");
    }

    Ok(config)
}

fn init_telemetry(config: &WallSyncConfig, service: &str) -> Result<()> {
    let format = LogFormat::parse(&config.telemetry.log_format).unwrap_or_default();
    init_logging(service, format)?;
    if let Some(port) = config.telemetry.metrics_port {
        init_metrics(port)?;
    }
    Ok(())
}

/// One scheduled producer run: fetch the chain, aggregate, publish.
async fn aggregate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = load_and_check(config_path)?;
    init_telemetry(&config, "wallsync-aggregate")?;

    let metrics = PipelineMetrics::new("aggregate");
    let started = Instant::now();

    let feed = HttpInstrumentFeed::new(
        config.feed.endpoint.clone(),
        Duration::from_secs(config.feed.timeout_seconds),
    )?;
    let snapshots = feed
        .fetch_chain(&config.feed.underlying)
        .await
        .context("Fetching options chain")?;

    let params = GexParams {
        contract_multiplier: config.levels.contract_multiplier,
        scaling_factor: config.levels.scaling_factor,
    };
    let today = chrono::Utc::now().date_naive();

    match levels::aggregate(&snapshots, today, &params) {
        Ok(record) => {
            let store = FileLedger::new(&config.ledger.path);
            store.append(&record).await.context("Publishing record")?;
            metrics.record_run(started.elapsed(), true);
            info!(
                date = %record.date,
                call_wall = record.call_wall,
                put_wall = record.put_wall,
                buyer_gamma = record.buyer_gamma_strike,
                seller_gamma = record.seller_gamma_strike,
                "Levels published"
            );
            Ok(())
        }
        Err(LevelsError::InsufficientData(reason)) => {
            // Skip the cycle rather than publish a degenerate record; the
            // scheduler will try again next period.
            warn!(%reason, "Insufficient data, skipping ledger append for this cycle");
            metrics.record_run(started.elapsed(), false);
            Ok(())
        }
    }
}

fn build_reader(config: &WallSyncConfig) -> Result<Arc<dyn LedgerReader>> {
    Ok(match &config.ledger.url {
        Some(url) => Arc::new(HttpLedgerReader::new(url.clone(), LEDGER_FETCH_TIMEOUT)?),
        None => Arc::new(FileLedger::new(&config.ledger.path)),
    })
}

/// Run the synchronization client: either the poll loop or a single manual
/// trigger with `--once`.
async fn sync_command<P: AsRef<Path>>(config_path: P, once: bool) -> Result<()> {
    let config = load_and_check(config_path)?;
    init_telemetry(&config, "wallsync-sync")?;

    let reader = build_reader(&config)?;
    let surface = Arc::new(BridgeSurface::new(
        config.sync.bridge_url.clone(),
        BRIDGE_CALL_TIMEOUT,
    )?);
    let driver = AutomationDriver::new(
        surface,
        config.sync.target_fragment.clone(),
        Duration::from_millis(config.sync.settle_delay_ms),
    );
    let client = SyncClient::new(reader, driver, Arc::new(LogStatusObserver));

    if once {
        let outcome = client.check_and_sync().await;
        println!("{outcome}");
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Ctrl+C received, shutting down");
            let _ = shutdown_tx.send(true);
        }
    });

    client
        .run(
            Duration::from_secs(config.sync.poll_interval_seconds),
            shutdown_rx,
        )
        .await;
    Ok(())
}

async fn show_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = load_and_check(config_path)?;

    let reader = build_reader(&config)?;
    match reader.latest().await? {
        Some(record) => {
            println!("date:         {}", record.date.format("%d/%m/%Y"));
            println!("call wall:    {}", record.call_wall);
            println!("put wall:     {}", record.put_wall);
            println!("buyer gamma:  {}", record.buyer_gamma_strike);
            println!("seller gamma: {}", record.seller_gamma_strike);
        }
        None => println!("Ledger is empty"),
    }
    Ok(())
}

async fn validate_command<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let config = match load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            anyhow::bail!(e);
        }
    };

    let report = validate_config(&config);

    println!("\n=== Configuration Validation Report ===\n");

    if !report.warnings.is_empty() {
        println!("Warnings ({}):", report.warnings.len());
        for warning in &report.warnings {
            println!("  [warn] {}: {}", warning.field, warning.message);
        }
        println!();
    }

    if report.is_valid() {
        println!("Configuration is valid.");
        Ok(())
    } else {
        println!("Errors ({}):", report.errors.len());
        for err in &report.errors {
            println!("  [error] {}", err);
        }
        anyhow::bail!("Configuration is invalid");
    }
}

async fn init_command<P: AsRef<Path>>(output: P) -> Result<()> {
    let output = output.as_ref();
    if output.exists() {
        anyhow::bail!("Refusing to overwrite existing file: {:?}", output);
    }
    let config = generate_default_config();
    save_config(&config, output)?;
    println!("Wrote default configuration to {:?}", output);
    Ok(())
}
