mod commands;
mod config;
mod cook;
mod samples;

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use client_core::{ApiClient, ClientError, FileTokenStore};
use shared::domain::{format_minutes, MealType};
use tokio::io::BufReader;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::{commands::RecipeListing, config::Settings};

#[derive(Parser, Debug)]
#[command(name = "kitchen", about = "Guided cooking and recipe backend client")]
struct Cli {
    /// Config file; defaults to ./kitchen.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Overrides the configured backend base URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Cook a recipe step by step with a countdown per step.
    Cook {
        #[arg(long, conflicts_with_all = ["sample", "slug"])]
        recipe: Option<PathBuf>,
        #[arg(long, conflicts_with = "slug")]
        sample: Option<String>,
        /// Fetch the recipe from the backend.
        #[arg(long)]
        slug: Option<String>,
    },
    /// List the bundled sample recipes.
    Samples,
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Profile,
    Recipes {
        #[arg(long, conflicts_with_all = ["popular", "search"])]
        featured: bool,
        #[arg(long, conflicts_with = "search")]
        popular: bool,
        #[arg(long)]
        search: Option<String>,
    },
    Recipe {
        slug: String,
    },
    Recommend {
        #[arg(long, value_parser = commands::parse_meal_type)]
        meal_type: Option<MealType>,
        #[arg(long)]
        max_prep: Option<u32>,
        #[arg(long)]
        count: Option<u32>,
    },
    MealPlan {
        #[arg(long)]
        days: Option<u32>,
        #[arg(long)]
        budget: Option<String>,
        #[arg(long)]
        family_size: Option<u32>,
    },
    Substitutes {
        ingredient: String,
        #[arg(long)]
        recipe: Option<String>,
    },
    /// Cultural background for a recipe.
    Insight {
        recipe_id: i64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let mut settings = config::load_settings(cli.config.as_deref());
    if let Some(url) = &cli.api_url {
        settings.api_base_url = url.clone();
    }
    init_tracing(&settings.log_filter);
    debug!(?settings, "settings loaded");

    if let Err(err) = run(cli.command, &settings).await {
        eprintln!("error: {err:#}");
        if let Some(hint) = reauth_hint(&err) {
            eprintln!("{hint}");
        }
        std::process::exit(1);
    }
}

fn reauth_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<ClientError>()
        .filter(|client_err| client_err.requires_reauth())
        .map(|_| "your session is missing or expired; run `kitchen login` again")
}

fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn api_client(settings: &Settings) -> Result<ApiClient> {
    let tokens = Arc::new(FileTokenStore::new(settings.token_path.clone()));
    Ok(ApiClient::new(&settings.api_base_url, tokens)?.with_auth_scheme(settings.auth_scheme.clone()))
}

async fn run(command: Command, settings: &Settings) -> Result<()> {
    match command {
        Command::Cook {
            recipe,
            sample,
            slug,
        } => {
            let recipe = match (recipe, sample, slug) {
                (Some(path), _, _) => samples::load_file(&path).await?,
                (_, _, Some(slug)) => {
                    let client = api_client(settings)?;
                    client.recipes().get(&slug).await?.into_recipe()?
                }
                (_, Some(name), _) => samples::find(&name)?,
                (None, None, None) => samples::find("jollof")?,
            };
            if recipe.steps.is_empty() {
                bail!("{} has no steps to cook", recipe.name);
            }
            cook::run_session(recipe, BufReader::new(tokio::io::stdin())).await
        }
        Command::Samples => {
            for recipe in samples::bundled()? {
                println!(
                    "{} · {} · {} steps, {}",
                    recipe.name,
                    recipe.region.as_deref().unwrap_or("-"),
                    recipe.steps.len(),
                    format_minutes(recipe.guided_minutes())
                );
            }
            Ok(())
        }
        Command::Login { email, password } => {
            commands::login(&api_client(settings)?, &email, &password).await
        }
        Command::Logout => commands::logout(&api_client(settings)?).await,
        Command::Profile => commands::profile(&api_client(settings)?).await,
        Command::Recipes {
            featured,
            popular,
            search,
        } => {
            let listing = if featured {
                RecipeListing::Featured
            } else if popular {
                RecipeListing::Popular
            } else if let Some(text) = search {
                RecipeListing::Search(text)
            } else {
                RecipeListing::All { search: None }
            };
            commands::recipes(&api_client(settings)?, listing).await
        }
        Command::Recipe { slug } => commands::recipe(&api_client(settings)?, &slug).await,
        Command::Recommend {
            meal_type,
            max_prep,
            count,
        } => commands::recommend(&api_client(settings)?, meal_type, max_prep, count).await,
        Command::MealPlan {
            days,
            budget,
            family_size,
        } => commands::meal_plan(&api_client(settings)?, days, budget, family_size).await,
        Command::Substitutes { ingredient, recipe } => {
            commands::substitutes(&api_client(settings)?, ingredient, recipe).await
        }
        Command::Insight { recipe_id } => {
            commands::insight(&api_client(settings)?, recipe_id).await
        }
    }
}
