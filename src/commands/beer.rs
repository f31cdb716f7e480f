use clap::{Args, Subcommand, ValueEnum};
use std::io::Read;
use std::path::PathBuf;
use uuid::Uuid;

use crate::db::BeerRepository;
use crate::models::{Beer, BeerSubmission};
use crate::transfer::{decode_beer, encode_beer, transfer_beer};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct BeerCommand {
    #[command(subcommand)]
    pub command: BeerSubcommand,
}

#[derive(Subcommand)]
pub enum BeerSubcommand {
    /// Log a tasted beer
    Add {
        /// Beer type the beer belongs to (created if it does not exist)
        beer_type: String,

        /// Name of the beer
        name: String,

        /// Score given to the beer
        #[arg(long)]
        score: i32,

        /// Tasting note
        #[arg(long, default_value = "")]
        note: String,

        /// Path to an image of the beer
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// List logged beers
    List {
        /// Only beers of this beer type (exact name)
        #[arg(long = "type", value_name = "NAME")]
        beer_type: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a beer's details
    Show {
        /// Beer ID (UUID) or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print a beer as a shareable JSON payload
    Export {
        /// Beer ID (UUID) or name
        identifier: String,
    },

    /// Import a beer from a scanned JSON payload
    Import {
        /// File containing the payload; reads stdin when omitted
        file: Option<PathBuf>,
    },
}

impl BeerCommand {
    pub async fn run(&self, repo: &BeerRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            BeerSubcommand::Add {
                beer_type,
                name,
                score,
                note,
                image,
            } => {
                let mut submission =
                    BeerSubmission::new(beer_type.trim(), name.trim(), *score, note.clone());

                if let Some(path) = image {
                    let bytes = std::fs::read(path)
                        .map_err(|e| format!("Failed to read image '{}': {}", path.display(), e))?;
                    submission = submission.with_image(bytes);
                }

                submission.validate()?;

                let beer = repo.add_beer(&submission).await?;
                println!("Added beer:");
                println!("{}", beer);
                Ok(())
            }

            BeerSubcommand::List { beer_type, format } => {
                let beers = match beer_type {
                    Some(name) => {
                        let beer_type = repo
                            .find_type_by_name(name)
                            .await?
                            .ok_or_else(|| format!("Beer type not found: {}", name))?;
                        repo.beers_for_type(&beer_type).await?
                    }
                    None => repo.list().await?,
                };

                if beers.is_empty() {
                    println!("No beers found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        let transfers = beers
                            .iter()
                            .map(transfer_beer)
                            .collect::<Result<Vec<_>, _>>()?;
                        println!("{}", serde_json::to_string_pretty(&transfers)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<36}  {:<25}  {:<15}  SCORE", "ID", "NAME", "TYPE");
                        println!("{}", "-".repeat(84));
                        for beer in &beers {
                            let type_name = beer
                                .beer_type
                                .as_ref()
                                .map(|t| t.name.as_str())
                                .unwrap_or("?");
                            println!(
                                "{:<36}  {:<25}  {:<15}  {}",
                                beer.id, beer.name, type_name, beer.score
                            );
                        }
                        println!("\nTotal: {} beer(s)", beers.len());
                    }
                }
                Ok(())
            }

            BeerSubcommand::Show { identifier, format } => {
                let beer = find_beer(repo, identifier).await?;
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&transfer_beer(&beer)?)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", beer);
                    }
                }
                Ok(())
            }

            BeerSubcommand::Export { identifier } => {
                let beer = find_beer(repo, identifier).await?;
                println!("{}", encode_beer(&beer)?);
                Ok(())
            }

            BeerSubcommand::Import { file } => {
                let payload = match file {
                    Some(path) => std::fs::read_to_string(path)
                        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?,
                    None => {
                        let mut buf = String::new();
                        std::io::stdin().read_to_string(&mut buf)?;
                        buf
                    }
                };

                let scanned = decode_beer(&payload)?;
                let beer = repo.import_scanned(&scanned).await?;
                println!("Imported beer:");
                println!("{}", beer);
                Ok(())
            }
        }
    }
}

// Try to parse as UUID first, then fall back to name lookup
async fn find_beer(
    repo: &BeerRepository,
    identifier: &str,
) -> Result<Beer, Box<dyn std::error::Error>> {
    let beer = if let Ok(uuid) = Uuid::parse_str(identifier) {
        repo.get_by_id(uuid).await?
    } else {
        repo.find_by_name(identifier).await?
    };

    beer.ok_or_else(|| format!("Beer not found: {}", identifier).into())
}
