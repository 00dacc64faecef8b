use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use tracing::debug;

use switchboard_cli::{
    cli::{Cli, Commands},
    commands, config, logging,
};
use switchboard_webservice::Switchboard;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log = logging::init(logging::startup_level(cli.log_level, cli.verbose))?;
    let config = config::load(cli.config, cli.api_base).await?;
    log.set_level(logging::resolve_level(
        cli.log_level,
        cli.verbose,
        &config.logging.level,
    ))?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Config => commands::config::execute(&config)?,

        Commands::List => {
            let board = Switchboard::bootstrap(&config)?;
            commands::list::execute(&board);
        }

        Commands::Fire {
            operation,
            params,
            watch,
        } => {
            let board = Switchboard::bootstrap(&config)?;
            if !commands::fire::execute(&board, &operation, &params, watch).await? {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
