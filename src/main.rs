//! `dreimeta`: maintains the ordered metadata catalog of an audio drama
//! collection, moving it between JSON documents, a SQLite database and
//! generated web pages.

mod cli;
mod commands;
mod error;

use clap::Parser;
use exn::ResultExt;
use std::process::ExitCode;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Cli, Command};
use crate::error::{ErrorKind, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = dreimeta_config::Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    match cli.command {
        Command::Export(args) => commands::export(&config, args).await,
        Command::Import(args) => commands::import(&config, args).await,
        Command::Check(args) => commands::check(args),
        Command::WebBuild(args) => commands::webbuild(&config, args).await,
    }
}
