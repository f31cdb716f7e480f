use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod db;
mod models;
mod transfer;

use commands::{BeerCommand, ConfigCommand, TypeCommand};
use config::Config;
use db::{init_db, BeerRepository};

#[derive(Parser)]
#[command(name = "beerlog")]
#[command(version)]
#[command(about = "A beer tasting log", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Log, list, share and import beers
    Beer(BeerCommand),

    /// Inspect beer types
    Type(TypeCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "beerlog=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Beer(cmd)) => {
            let pool = init_db(config.database_path.clone()).await?;
            let repo = BeerRepository::new(pool);
            cmd.run(&repo).await?;
        }
        Some(Commands::Type(cmd)) => {
            let pool = init_db(config.database_path.clone()).await?;
            let repo = BeerRepository::new(pool);
            cmd.run(&repo).await?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
