//! User provisioning commands

use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};

use mantractl_server::db::{create_pool, schema, UserRepo};

/// Arguments for the user command
#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    command: UserCommand,
}

#[derive(Subcommand, Debug)]
enum UserCommand {
    /// Create a user row (idempotent on email), printing its id
    Add(UserAddArgs),
}

#[derive(Parser, Debug)]
struct UserAddArgs {
    /// Email address (unique)
    #[arg(long)]
    email: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Database URL (overrides environment)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Run a user subcommand
pub async fn run_user(args: UserArgs) -> Result<()> {
    match args.command {
        UserCommand::Add(args) => run_user_add(args).await,
    }
}

async fn run_user_add(args: UserAddArgs) -> Result<()> {
    ensure!(!args.email.trim().is_empty(), "email cannot be empty");
    ensure!(!args.name.trim().is_empty(), "name cannot be empty");

    let database_url = args
        .database_url
        .context("DATABASE_URL not set. Set via --database-url, DATABASE_URL env, or .env")?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    // Works against a fresh database too
    schema::ensure(&pool)
        .await
        .context("Failed to bootstrap schema")?;

    let user = UserRepo::new(&pool)
        .create(args.email.trim(), args.name.trim())
        .await
        .context("Failed to create user")?;

    println!("{}", user.id);
    Ok(())
}
