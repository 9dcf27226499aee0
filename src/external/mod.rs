// ABOUTME: External API client modules (USDA FoodData Central, Open Food Facts)
// ABOUTME: Provides provider adapters that normalize nutrition data into one schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! External API Clients
//!
//! Clients for the nutrition providers queried by the aggregator.

/// HTTP client construction with provider timeouts
pub mod http_client;
/// Open Food Facts product search
pub mod openfoodfacts_client;
/// Common provider trait
pub mod provider;
/// USDA `FoodData` Central search
pub mod usda_client;

pub use http_client::build_http_client;
pub use openfoodfacts_client::OpenFoodFactsClient;
pub use provider::FoodDataProvider;
pub use usda_client::{title_case, NutrientField, UsdaClient, NUTRIENT_FIELDS};
