//! Handler for the `serve` command.

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::{self, StoreKind};
use crate::infrastructure::config::settings::Config;

/// Execute the serve command.
pub async fn execute(args: &ServeArgs, verbose: u8) -> Result<()> {
    let mut config = Config::load_or_default(&args.config.config)?;
    if let Some(ref bind) = args.bind {
        config.server.bind.clone_from(bind);
        config.bind_addr()?;
    }
    if let Some(ref database) = args.database {
        config.database.path = database.to_string_lossy().to_string();
    }
    config.logging = config.logging.with_verbosity(verbose);
    config.init_logging();

    let store = if args.ephemeral {
        StoreKind::Memory
    } else {
        StoreKind::Sqlite
    };

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Listening", &config.server.bind);
    match store {
        StoreKind::Sqlite => output::field("Database", &config.database.path),
        StoreKind::Memory => output::field("Database", "(in-memory)"),
    }

    bootstrap::serve(&config, store).await
}
