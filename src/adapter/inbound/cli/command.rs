//! Command-line interface definitions.
//!
//! Defines the CLI structure for the agenda service using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Contact registry REST service
#[derive(Parser, Debug)]
#[command(name = "agenda")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the agenda CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API server
    Serve(ServeArgs),

    /// Inspect and validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `agenda config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Configuration file argument shared by subcommands.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file (defaults apply when it does not exist).
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `serve` subcommand.
#[derive(Args, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub config: ConfigPathArg,

    /// Socket address to listen on (overrides config)
    #[arg(long)]
    pub bind: Option<String>,

    /// Path to the SQLite database file (overrides config)
    #[arg(long, conflicts_with = "ephemeral")]
    pub database: Option<PathBuf>,

    /// Keep records in memory only; nothing is written to disk
    #[arg(long)]
    pub ephemeral: bool,
}
