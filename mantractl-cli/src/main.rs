//! mantractl CLI - habit-tracking backend operations
//!
//! This is the main entry point for the mantractl command-line tool, which
//! provides:
//! - HTTP API server (`serve` subcommand)
//! - User provisioning (`user` subcommand - there is no signup endpoint)
//! - Bearer-token minting (`token` subcommand)

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "mantractl",
    author,
    version,
    about = "Habit-tracking backend: HTTP API server and operator tooling"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Manage users (provisioned out-of-band)
    User(commands::user::UserArgs),
    /// Mint a signed bearer token for a user
    Token(commands::token::TokenArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::serve::run_serve(args).await?,
        Commands::User(args) => commands::user::run_user(args).await?,
        Commands::Token(args) => commands::token::run_token(args)?,
    }
    Ok(())
}
