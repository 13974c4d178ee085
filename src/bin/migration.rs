use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inventree::{config, db};
use migrations::Migrator;
use sea_orm_migration::MigratorTrait;
use tracing::info;

#[derive(Parser)]
#[command(name = "migration", about = "Manage the inventory database schema", version)]
struct Cli {
    /// Database URL; defaults to the configured `database_url`
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Apply all pending migrations (default)
    Up,
    /// Roll back every applied migration
    Reset,
    /// Drop everything and re-apply all migrations
    Fresh,
    /// List applied and pending migrations
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = config::load_config().context("failed to load application config")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);
    if let Some(url) = cli.database_url {
        cfg.database_url = url;
    }

    let pool = db::establish_connection_from_app_config(&cfg)
        .await
        .context("failed to connect to database")?;

    match cli.command.unwrap_or(Command::Up) {
        Command::Up => db::run_migrations(&pool).await?,
        Command::Reset => db::reset_migrations(&pool).await?,
        Command::Fresh => {
            Migrator::fresh(&pool)
                .await
                .context("failed to rebuild schema")?;
            info!("Schema rebuilt from scratch");
        }
        Command::Status => {
            let applied = Migrator::get_applied_migrations(&pool).await?;
            let pending = Migrator::get_pending_migrations(&pool).await?;
            for migration in &applied {
                println!("applied  {}", migration.name());
            }
            for migration in &pending {
                println!("pending  {}", migration.name());
            }
        }
    }

    db::close_pool(pool).await?;
    Ok(())
}
