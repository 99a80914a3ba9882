use anyhow::Result;
use tracing::debug;

use super::args::{Cli, Commands};
use super::handlers;
use crate::config::Config;
use crate::logging;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    debug!(?config, "loaded config");

    match cli.command {
        Commands::List { protocol, limit } => {
            handlers::list::handle(&config, protocol.map(Into::into), limit, cli.format)
        }

        Commands::Show { protocol, id } => handlers::show::handle(&config, &protocol, &id, cli.format),

        Commands::Parse { file, protocol } => {
            handlers::parse::handle(&config, &file, protocol.as_deref(), cli.format)
        }

        Commands::Stats { protocol } => {
            handlers::stats::handle(&config, protocol.map(Into::into), cli.format)
        }
    }
}
