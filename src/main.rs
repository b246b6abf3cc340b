//! # Storefront API Main Entry Point
//!
//! This is the main entry point for the Storefront API service.

use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use storefront::{config::ConfigLoader, db::init_pool, server::run_server, telemetry};

#[derive(Parser)]
#[command(name = "storefront", version, about = "Schema-per-tenant storefront backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run pending migrations and start the HTTP server (default)
    Serve,
    /// Run pending migrations and exit
    Migrate,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from layered env files and variables
    let config_loader = ConfigLoader::new();
    let config = config_loader.load()?;

    telemetry::init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "Loaded configuration");
    if let Ok(redacted_json) = config.redacted_json() {
        tracing::debug!(configuration = %redacted_json, "Effective configuration");
    }

    let db = init_pool(&config).await?;
    Migrator::up(&db, None).await?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => run_server(config, db).await,
        Command::Migrate => {
            tracing::info!("Migrations applied");
            Ok(())
        }
    }
}
