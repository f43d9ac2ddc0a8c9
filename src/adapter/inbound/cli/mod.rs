//! CLI module graph and dispatch.

pub mod command;
pub mod config;
pub mod output;
pub mod serve;

use anyhow::Context;
use command::{Cli, Commands, ConfigCommand};
use output::OutputConfig;

/// Run the parsed command line.
///
/// # Errors
///
/// Returns the failing command's error with the command named as context.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Serve(args) => serve::execute(&args, cli.verbose)
            .await
            .context("server failed"),
        Commands::Config(ConfigCommand::Show(arg)) => config::execute_show(&arg.config)
            .with_context(|| format!("cannot show {}", arg.config.display())),
        Commands::Config(ConfigCommand::Validate(arg)) => config::execute_validate(&arg.config)
            .with_context(|| format!("{} is invalid", arg.config.display())),
    }
}
