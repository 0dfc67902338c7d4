//! GGR CLI - Command-line tool for the Nexusggr and Telo gaming aggregator APIs
//!
//! Credentials resolve per field from flags, then the config file, then
//! `NEXUSGGR_*` / `TELO_*` environment variables (a `.env` file is loaded
//! first).

mod commands;
mod config;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ggr_client::{
    ClientConfig, ConfigOverrides, ConfigSource, EnvConfig, NexusggrClient, TeloClient,
};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::{NexusCommand, TeloCommand};
use crate::config::Config;
use crate::output::OutputContext;

#[derive(Parser)]
#[command(name = "ggr")]
#[command(author, version, about = "Gaming aggregator API CLI")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "GGR_CONFIG")]
    config: Option<PathBuf>,

    /// Agent code
    #[arg(long, global = true)]
    agent: Option<String>,

    /// Agent token
    #[arg(long, global = true)]
    token: Option<String>,

    /// API endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Print responses on a single line
    #[arg(long)]
    compact: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Print nothing on success (for scripting)
    #[arg(short, long)]
    quiet: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Nexusggr API (method in the request body)
    Nexus {
        #[command(subcommand)]
        command: NexusCommand,
    },

    /// Telo API (method in the request path)
    Telo {
        #[command(subcommand)]
        command: TeloCommand,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();

    // Load config file
    let config = if let Some(config_path) = &cli.config {
        Config::load_from(config_path)?
    } else {
        Config::load().unwrap_or_default()
    };

    let flags = ConfigOverrides {
        agent: cli.agent.clone(),
        token: cli.token.clone(),
        endpoint: cli.endpoint.clone(),
    };

    let ctx = OutputContext::new(cli.compact, cli.no_color, cli.quiet);

    // Execute command
    let outcome = match cli.command {
        Commands::Nexus { command } => {
            let resolved = EnvConfig::nexusggr()
                .with_dotenv()
                .with_overrides(flags.or(config.nexusggr))
                .load();
            log_resolved("nexusggr", &resolved);
            let client =
                NexusggrClient::new(resolved).context("Failed to create Nexusggr client")?;
            commands::nexus::run(&client, command).await
        }

        Commands::Telo { command } => {
            let resolved = EnvConfig::telo()
                .with_dotenv()
                .with_overrides(flags.or(config.telo))
                .load();
            log_resolved("telo", &resolved);
            let client = TeloClient::new(resolved).context("Failed to create Telo client")?;
            commands::telo::run(&client, command).await
        }
    };

    match outcome {
        Ok(value) => {
            ctx.print_value(&value);
            Ok(())
        }
        Err(err) => {
            ctx.error(&err);
            std::process::exit(1);
        }
    }
}

/// Names of the settings that resolved to an empty value
fn missing_settings(config: &ClientConfig) -> Vec<&'static str> {
    [
        ("agent", &config.agent_code),
        ("token", &config.agent_token),
        ("endpoint", &config.endpoint),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect()
}

fn log_resolved(dialect: &str, config: &ClientConfig) {
    debug!(dialect, endpoint = %config.endpoint, agent = %config.agent_code, "Resolved configuration");
    let missing = missing_settings(config);
    if !missing.is_empty() {
        warn!(dialect, ?missing, "Configuration is incomplete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_settings() {
        let config = ClientConfig::new("A", "", "");
        assert_eq!(missing_settings(&config), ["token", "endpoint"]);

        let config = ClientConfig::new("A", "T", "http://vendor.test");
        assert!(missing_settings(&config).is_empty());
    }

    #[test]
    fn test_parse_nexus_transaction() {
        let cli = Cli::try_parse_from([
            "ggr", "--agent", "A", "nexus", "transaction", "player1", "deposit", "500",
        ])
        .unwrap();

        assert_eq!(cli.agent.as_deref(), Some("A"));
        match cli.command {
            Commands::Nexus {
                command: NexusCommand::Transaction { user, amount, .. },
            } => {
                assert_eq!(user, "player1");
                assert_eq!(amount, 500);
            }
            _ => panic!("expected nexus transaction"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ggr", "telo", "--token", "T", "info", "--endpoint", "http://vendor.test",
        ])
        .unwrap();

        assert_eq!(cli.token.as_deref(), Some("T"));
        assert_eq!(cli.endpoint.as_deref(), Some("http://vendor.test"));
    }

    #[test]
    fn test_parse_launch_params() {
        let cli = Cli::try_parse_from([
            "ggr", "nexus", "launch", "player1", "PRAGMATIC", "vs20doghouse", "--param",
            "lobby_url=https://lobby.test", "--param", "mobile=true",
        ])
        .unwrap();

        match cli.command {
            Commands::Nexus {
                command: NexusCommand::Launch { params, lang, .. },
            } => {
                assert_eq!(lang, None);
                assert_eq!(params.len(), 2);
                assert_eq!(params[1].1, serde_json::json!(true));
            }
            _ => panic!("expected nexus launch"),
        }
    }

    #[test]
    fn test_rejects_unknown_transaction_kind() {
        let result =
            Cli::try_parse_from(["ggr", "nexus", "transaction", "player1", "refund", "500"]);
        assert!(result.is_err());
    }
}
