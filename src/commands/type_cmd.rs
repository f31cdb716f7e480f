use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use uuid::Uuid;

use crate::db::BeerRepository;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct TypeCommand {
    #[command(subcommand)]
    pub command: TypeSubcommand,
}

#[derive(Subcommand)]
pub enum TypeSubcommand {
    /// List beer types with the number of beers in each
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Serialize)]
struct TypeSummary {
    id: Uuid,
    name: String,
    beers: i64,
}

impl TypeCommand {
    pub async fn run(&self, repo: &BeerRepository) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            TypeSubcommand::List { format } => {
                let types = repo.list_types().await?;

                if types.is_empty() {
                    println!("No beer types found");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        let summaries: Vec<TypeSummary> = types
                            .into_iter()
                            .map(|(t, count)| TypeSummary {
                                id: t.id,
                                name: t.name,
                                beers: count,
                            })
                            .collect();
                        println!("{}", serde_json::to_string_pretty(&summaries)?);
                    }
                    OutputFormat::Text => {
                        for (beer_type, count) in &types {
                            println!("{} ({} beer(s))", beer_type, count);
                        }
                        println!("\nTotal: {} type(s)", types.len());
                    }
                }
                Ok(())
            }
        }
    }
}
