use anyhow::Context;
use clap::Parser;
use procurement_api::{
    auth::{AuthConfig, AuthService},
    config,
};

/// Signs an access token with the configured secret.
#[derive(Debug, Parser)]
#[command(name = "issue-token", version)]
struct Cli {
    /// User id recorded as the actor on orders and status logs
    user_id: String,

    #[arg(long)]
    name: Option<String>,

    /// Role to embed; repeatable
    #[arg(long = "role")]
    roles: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config().context("failed to load configuration")?;

    let auth = AuthService::new(AuthConfig::from(&cfg));
    let token = auth
        .generate_token(&cli.user_id, cli.name, cli.roles)
        .context("failed to sign token")?;

    println!("{}", token);
    Ok(())
}
