#![allow(clippy::print_stderr, clippy::print_stdout)]

mod handlers;
mod models;

use crate::handlers::{check, generate};
use crate::models::args::{AppCommands, Cli};
use anyhow::Result;
use clap::Parser;
use recap_logger::{LevelFilter, Logger};

#[recap_runtime::main(batch)]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { LevelFilter::INFO } else { LevelFilter::WARN };
    let _log = Logger::builder().name(env!("CARGO_PKG_NAME")).level(level).init()?;

    match cli.command {
        AppCommands::Generate(args) => generate::run(args).await?,
        AppCommands::Check { secrets } => check::run(secrets.as_deref())?,
    }

    Ok(())
}
