//! Bearer-token minting command
//!
//! Registration and OAuth are out of scope for this backend; access tokens
//! are minted here by an operator and handed to the user.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::Parser;
use uuid::Uuid;

use mantractl_server::auth;

/// Arguments for the token command
#[derive(Parser, Debug)]
pub struct TokenArgs {
    /// User id to mint the token for
    #[arg(long)]
    pub user_id: Uuid,

    /// Days until the token expires
    #[arg(long, default_value_t = 7)]
    pub ttl_days: i64,

    /// Secret used to sign bearer tokens
    #[arg(long, env = "MANTRA_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: String,
}

/// Mint and print a bearer token
pub fn run_token(args: TokenArgs) -> Result<()> {
    let ttl = Duration::try_days(args.ttl_days).context("ttl-days out of range")?;
    let expires_at = Utc::now()
        .checked_add_signed(ttl)
        .context("expiry out of range")?;

    let token = auth::sign_token(args.user_id, expires_at, args.token_secret.as_bytes());
    println!("{token}");
    Ok(())
}
