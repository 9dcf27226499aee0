// ABOUTME: Main library entry point for the Habitz nutrition layer
// ABOUTME: Provides provider adapters, multi-provider food search, and a persistent food item cache
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Habitz Nutrition
//!
//! Food search and nutrition lookup for the Habitz calorie tracker. Queries
//! USDA `FoodData` Central and Open Food Facts, normalizes both into a single
//! result schema, and caches chosen results as durable food items.
//!
//! ## Features
//!
//! - **Provider adapters**: USDA (API key required) and Open Food Facts (no key)
//! - **Fault-tolerant aggregation**: a failing provider never fails the search
//! - **Deduplicated cache**: at most one stored item per `(source, source_id)`
//!
//! ## Architecture
//!
//! - **External**: HTTP clients and the `FoodDataProvider` trait
//! - **Nutrition**: aggregator and the `NutritionService` facade
//! - **Database**: `SQLite` storage and the food item repository
//! - **Config**: environment-driven settings
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use habitz_nutrition::config::NutritionConfig;
//! use habitz_nutrition::nutrition::NutritionService;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = NutritionConfig::from_env()?;
//!     let service = NutritionService::from_config(&config).await?;
//!
//!     for result in service.search_foods("banana", 1).await {
//!         println!("{} ({}): {} kcal", result.name, result.source, result.calories);
//!     }
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Provider endpoints, nutrient ids and defaults
pub mod constants;

/// `SQLite` storage for cached food items
pub mod database;

/// Unified error handling
pub mod errors;

/// External nutrition provider clients
pub mod external;

/// Structured logging setup
pub mod logging;

/// Food data models
pub mod models;

/// Search aggregation and the nutrition service facade
pub mod nutrition;
