// ABOUTME: Command-line front end for the Habitz nutrition layer
// ABOUTME: Searches USDA and Open Food Facts, looks up single foods, and manages the food item cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Search both providers (USDA is skipped without USDA_API_KEY)
//! habitz-nutrition search "greek yogurt"
//!
//! # Second page, storing every result in the food item cache
//! habitz-nutrition search "greek yogurt" --page 2 --cache
//!
//! # Single-item lookups
//! habitz-nutrition usda 171688
//! habitz-nutrition off 3017620422003 --cache
//!
//! # Inspect the cache
//! habitz-nutrition cache stats
//! habitz-nutrition cache find usda 171688
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use habitz_nutrition::{
    config::{DatabaseUrl, NutritionConfig},
    constants::search::DEFAULT_PAGE,
    logging::LoggingConfig,
    models::{FoodSource, NormalizedFoodResult},
    nutrition::NutritionService,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "habitz-nutrition",
    about = "Habitz food search and nutrition cache",
    long_about = "Search USDA FoodData Central and Open Food Facts, normalize results, and cache them locally."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Database URL override
    #[arg(long, global = true)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Search all providers
    Search {
        /// Free-text query
        query: String,

        /// Page number (1-based)
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: u32,

        /// Store every result in the food item cache
        #[arg(long)]
        cache: bool,
    },

    /// Look up a USDA food by FDC id
    Usda {
        /// `FoodData` Central id
        fdc_id: u64,

        /// Store the result in the food item cache
        #[arg(long)]
        cache: bool,
    },

    /// Look up an Open Food Facts product by barcode
    Off {
        /// Product barcode
        code: String,

        /// Store the result in the food item cache
        #[arg(long)]
        cache: bool,
    },

    /// Food item cache commands
    Cache {
        #[command(subcommand)]
        action: CacheCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum CacheCommand {
    /// Show how many items are cached
    Stats,

    /// Show a cached item by id
    Get {
        /// Food item id
        id: Uuid,
    },

    /// Show the cached item for an external reference
    Find {
        /// Source tag (usda, openfoodfacts, custom)
        source: FoodSource,

        /// Provider-assigned id
        source_id: String,
    },
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize output")?
    );
    Ok(())
}

async fn print_lookup(
    service: &NutritionService,
    result: Option<NormalizedFoodResult>,
    cache: bool,
) -> Result<()> {
    match result {
        Some(result) if cache => print_json(&service.cache_result(&result).await?),
        Some(result) => print_json(&result),
        None => {
            eprintln!("No matching food found");
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        "debug".clone_into(&mut logging.level);
    }
    logging.init()?;

    let mut config = NutritionConfig::from_env()?;
    if let Some(url) = &cli.database_url {
        config.database_url = DatabaseUrl::parse_url(url);
    }
    if !config.has_usda_api_key() {
        info!("USDA_API_KEY not set, searches will only use Open Food Facts");
    }

    let service = NutritionService::from_config(&config).await?;

    match cli.command {
        Command::Search { query, page, cache } => {
            let results = service.search_foods(&query, page).await;
            if cache {
                let mut items = Vec::with_capacity(results.len());
                for result in &results {
                    items.push(service.cache_result(result).await?);
                }
                print_json(&items)?;
            } else {
                print_json(&results)?;
            }
        }
        Command::Usda { fdc_id, cache } => {
            let result = service.get_usda_food(fdc_id).await?;
            print_lookup(&service, result, cache).await?;
        }
        Command::Off { code, cache } => {
            let result = service.get_openfoodfacts_product(&code).await?;
            print_lookup(&service, result, cache).await?;
        }
        Command::Cache { action } => match action {
            CacheCommand::Stats => {
                let count = service.count_food_items().await?;
                print_json(&serde_json::json!({ "food_items": count }))?;
            }
            CacheCommand::Get { id } => match service.get_food_item(id).await? {
                Some(item) => print_json(&item)?,
                None => eprintln!("No cached food item with id {id}"),
            },
            CacheCommand::Find { source, source_id } => {
                match service.find_food_item(source, &source_id).await? {
                    Some(item) => print_json(&item)?,
                    None => eprintln!("No cached food item for {source}:{source_id}"),
                }
            }
        },
    }

    Ok(())
}
