//! # Directory SSO bridge CLI
//!
//! Resolves user attributes and runs test logins against a directory file.

#![forbid(unsafe_code)]
#![deny(warnings)]

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use da_core::BridgeConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_level.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = BridgeConfig::load(&cli.config)?;
    tracing::debug!(config = %cli.config.display(), "Loaded bridge configuration");

    match cli.command {
        Command::Resolve(args) => {
            commands::run_resolve(&args, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Login(args) => {
            if commands::run_login(&args, config).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
