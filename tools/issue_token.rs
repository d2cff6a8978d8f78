use std::env;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use jobly::api::middleware::auth::create_token;

/// Issue a bearer token for local use against the API
#[derive(Parser)]
struct Cli {
    #[arg(long)]
    username: String,

    #[arg(long)]
    admin: bool,

    #[arg(long, default_value_t = 86_400)]
    ttl_secs: u64,

    /// Signing secret; falls back to SECRET_KEY
    #[arg(long)]
    secret: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let secret = cli
        .secret
        .or_else(|| env::var("SECRET_KEY").ok())
        .context("SECRET_KEY must be set or passed with --secret")?;

    let token = create_token(
        &cli.username,
        cli.admin,
        &secret,
        Duration::from_secs(cli.ttl_secs),
    )?;

    println!("{token}");
    Ok(())
}
