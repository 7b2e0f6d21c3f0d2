//! CLI argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Directory SSO bridge - resolve and release user attributes.
#[derive(Debug, Parser)]
#[command(name = "da")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Bridge configuration file (TOML).
    #[arg(short, long, env = "DA_CONFIG", global = true, default_value = "bridge.toml")]
    pub config: PathBuf,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve the attributes of a user record file.
    Resolve(ResolveArgs),

    /// Log in against a directory file and print the released attributes.
    Login(LoginArgs),
}

/// Arguments for `da resolve`.
#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// User record (JSON).
    #[arg(short, long)]
    pub record: PathBuf,
}

/// Arguments for `da login`.
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Directory file (JSON array of entries).
    #[arg(short, long, env = "DA_DIRECTORY")]
    pub directory: PathBuf,

    /// Username.
    #[arg(short, long)]
    pub username: String,

    /// Password.
    #[arg(short, long, env = "DA_PASSWORD", hide_env_values = true)]
    pub password: String,
}
