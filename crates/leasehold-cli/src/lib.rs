//! Leasehold command-line interface.

pub mod app;
pub mod commands;

use clap::{Parser, Subcommand};

pub use app::Context;

/// Leasehold - secure credential store for the rental app
#[derive(Parser)]
#[command(name = "leasehold")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file
    #[arg(short, long, env = "LEASEHOLD_CONFIG", global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Store, read, and remove credentials
    #[command(alias = "creds")]
    Credentials(commands::credentials::CredentialsArgs),

    /// Inspect the resolved encryption key
    Key(commands::key::KeyArgs),

    /// Configuration management
    Config(commands::config::ConfigArgs),

    /// Show version information
    Version,
}

/// Run the CLI with the given arguments.
pub async fn run(cli: Cli, ctx: Context) -> anyhow::Result<()> {
    match cli.command {
        Commands::Credentials(args) => commands::credentials::run(args, &ctx).await,
        Commands::Key(args) => commands::key::run(args),
        Commands::Config(args) => commands::config::run(args, &ctx),
        Commands::Version => {
            println!("leasehold {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
