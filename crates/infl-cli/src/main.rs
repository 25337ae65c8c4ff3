//! Influence admin CLI
//!
//! Keeps on-chain game configuration in sync with the catalog.

mod cli;
mod commands;
mod context;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use std::process::ExitCode;

use cli::{Cli, Commands};
use context::AppContext;
use error::Result;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("{}: {}", "error".red().bold(), e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

async fn run(cli: Cli) -> Result<()> {
    match &cli.command {
        Commands::ListKinds => {
            commands::run_list_kinds();
        }
        Commands::UpdateConfigs {
            target,
            kind,
            dry_run,
            json,
        } => {
            let ctx = AppContext::load(&cli)?;
            commands::run_update_configs(&ctx, target, *kind, *dry_run, *json).await?;
        }
        Commands::Check { target, kind, json } => {
            let ctx = AppContext::load(&cli)?;
            commands::run_update_configs(&ctx, target, *kind, true, *json).await?;
        }
        Commands::UpdateConstant {
            target,
            name,
            value,
        } => {
            let ctx = AppContext::load(&cli)?;
            commands::run_update_constant(&ctx, target, name, value).await?;
        }
        Commands::Register {
            target,
            only,
            name,
            dry_run,
            json,
        } => {
            let ctx = AppContext::load(&cli)?;
            commands::run_register(
                &ctx,
                target,
                only.map(Into::into),
                name.as_deref(),
                *dry_run,
                *json,
            )
            .await?;
        }
    }
    Ok(())
}
