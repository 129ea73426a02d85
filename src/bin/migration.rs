use anyhow::Context;
use clap::{Parser, Subcommand};
use procurement_api::{config, db, migrator::Migrator};
use sea_orm_migration::MigratorTrait;
use tracing::info;

/// Applies or rolls back the procurement schema.
#[derive(Debug, Parser)]
#[command(name = "migration", version)]
struct Cli {
    /// Overrides the configured database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Apply pending migrations
    Up {
        #[arg(short = 'n', long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations (one by default)
    Down {
        #[arg(short = 'n', long, default_value_t = 1)]
        steps: u32,
    },
    /// Show applied and pending migrations
    Status,
    /// Drop every table and reapply all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let database_url = match cli.database_url {
        Some(url) => url,
        None => {
            config::load_config()
                .context("failed to load configuration")?
                .database_url
        }
    };
    config::init_tracing("info", false);

    let pool = db::establish_connection(&database_url)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Command::Up { steps } => {
            info!(?steps, "Applying migrations");
            Migrator::up(&pool, steps).await?;
        }
        Command::Down { steps } => {
            info!(steps, "Rolling back migrations");
            Migrator::down(&pool, Some(steps)).await?;
        }
        Command::Status => Migrator::status(&pool).await?,
        Command::Fresh => {
            info!("Recreating schema");
            Migrator::fresh(&pool).await?;
        }
    }

    info!("Migration command completed");
    Ok(())
}
