use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "wallsync")]
#[command(about = "WallSync - options positioning levels, published to your charts")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one aggregation cycle: fetch the options chain, compute the four
    /// levels, publish them to the ledger
    Aggregate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "wallsync.yaml")]
        config: PathBuf,
    },

    /// Run the chart synchronization client
    Sync {
        /// Path to the configuration file
        #[arg(short, long, default_value = "wallsync.yaml")]
        config: PathBuf,

        /// Run a single sync cycle and exit (manual trigger)
        #[arg(long)]
        once: bool,
    },

    /// Print the latest ledger record
    Show {
        /// Path to the configuration file
        #[arg(short, long, default_value = "wallsync.yaml")]
        config: PathBuf,
    },

    /// Validate configuration without running anything
    Validate {
        /// Path to the configuration file
        #[arg(short, long, default_value = "wallsync.yaml")]
        config: PathBuf,
    },

    /// Initialize a new configuration file with all defaults
    Init {
        /// Output path for the new configuration file
        #[arg(short, long, default_value = "wallsync.yaml")]
        output: PathBuf,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_once_flag() {
        let cli = Cli::parse_from(["wallsync", "sync", "--once"]);
        match cli.command {
            Commands::Sync { once, config } => {
                assert!(once);
                assert_eq!(config, PathBuf::from("wallsync.yaml"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_aggregate_custom_config_path() {
        let cli = Cli::parse_from(["wallsync", "aggregate", "--config", "/etc/wallsync.yaml"]);
        match cli.command {
            Commands::Aggregate { config } => {
                assert_eq!(config, PathBuf::from("/etc/wallsync.yaml"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
