// ABOUTME: Nutrition service wiring provider clients, the aggregator and the food item cache
// ABOUTME: Entry point for food search, single-item lookups and get-or-create persistence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Nutrition Service
//!
//! Search results from USDA `FoodData` Central and Open Food Facts are
//! normalized by their adapters, merged by [`FoodSearchAggregator`], and can
//! be persisted through [`NutritionService::get_or_create_food_item`], which
//! stores at most one row per `(source, source_id)`.

/// Ordered multi-provider search
pub mod aggregator;

pub use aggregator::{merge_outcomes, FoodSearchAggregator, ProviderOutcome};

use crate::config::NutritionConfig;
use crate::database::repositories::{FoodItemRepository, FoodItemRepositoryImpl};
use crate::database::Database;
use crate::errors::{AppResult, ProviderError};
use crate::external::{build_http_client, FoodDataProvider, OpenFoodFactsClient, UsdaClient};
use crate::models::{FoodItem, FoodItemData, FoodSource, NormalizedFoodResult};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Food search and caching facade
#[derive(Clone)]
pub struct NutritionService {
    usda: Arc<UsdaClient>,
    openfoodfacts: Arc<OpenFoodFactsClient>,
    aggregator: FoodSearchAggregator,
    food_items: Arc<dyn FoodItemRepository>,
}

impl NutritionService {
    /// Assemble a service from already-built clients and a food item repository
    ///
    /// The aggregator queries USDA first, then Open Food Facts.
    #[must_use]
    pub fn new(
        usda: UsdaClient,
        openfoodfacts: OpenFoodFactsClient,
        food_items: Arc<dyn FoodItemRepository>,
    ) -> Self {
        let usda = Arc::new(usda);
        let openfoodfacts = Arc::new(openfoodfacts);
        let providers = vec![
            Arc::clone(&usda) as Arc<dyn FoodDataProvider>,
            Arc::clone(&openfoodfacts) as Arc<dyn FoodDataProvider>,
        ];

        Self {
            usda,
            openfoodfacts,
            aggregator: FoodSearchAggregator::new(providers),
            food_items,
        }
    }

    /// Build clients sharing one HTTP client and open the configured database
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn from_config(config: &NutritionConfig) -> AppResult<Self> {
        let http_client = build_http_client(&config.http);
        let database = Database::new(&config.database_url.to_connection_string()).await?;

        info!(
            usda_enabled = config.has_usda_api_key(),
            database = %config.database_url,
            "Nutrition service initialized"
        );

        Ok(Self::new(
            UsdaClient::new(config.usda.clone(), http_client.clone()),
            OpenFoodFactsClient::new(config.openfoodfacts.clone(), http_client),
            Arc::new(FoodItemRepositoryImpl::new(database)),
        ))
    }

    /// Search USDA then Open Food Facts; failures of either are tolerated
    pub async fn search_foods(&self, query: &str, page: u32) -> Vec<NormalizedFoodResult> {
        self.aggregator.search_foods(query, page).await
    }

    /// Search USDA `FoodData` Central only
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout or malformed response
    pub async fn search_usda(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<NormalizedFoodResult>, ProviderError> {
        self.usda.search_usda(query, page, page_size).await
    }

    /// Search Open Food Facts only
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout or malformed response
    pub async fn search_openfoodfacts(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<NormalizedFoodResult>, ProviderError> {
        self.openfoodfacts
            .search_openfoodfacts(query, page, page_size)
            .await
    }

    /// Fetch one USDA food by `FoodData` Central id
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout or malformed response
    pub async fn get_usda_food(
        &self,
        fdc_id: u64,
    ) -> Result<Option<NormalizedFoodResult>, ProviderError> {
        self.usda.get_usda_food(fdc_id).await
    }

    /// Fetch one Open Food Facts product by barcode
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, timeout or malformed response
    pub async fn get_openfoodfacts_product(
        &self,
        code: &str,
    ) -> Result<Option<NormalizedFoodResult>, ProviderError> {
        self.openfoodfacts.get_openfoodfacts_product(code).await
    }

    /// Return the cached item for `data`, storing it first if it is new
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is missing or the database fails
    pub async fn get_or_create_food_item(&self, data: &FoodItemData) -> AppResult<FoodItem> {
        self.food_items.get_or_create(data).await
    }

    /// Persist a search result, reusing the stored row if one exists
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails
    pub async fn cache_result(&self, result: &NormalizedFoodResult) -> AppResult<FoodItem> {
        self.get_or_create_food_item(&FoodItemData::from(result)).await
    }

    /// Get a cached item by id
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails
    pub async fn get_food_item(&self, id: Uuid) -> AppResult<Option<FoodItem>> {
        self.food_items.get_by_id(id).await
    }

    /// Find the cached item for an external reference
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails
    pub async fn find_food_item(
        &self,
        source: FoodSource,
        source_id: &str,
    ) -> AppResult<Option<FoodItem>> {
        self.food_items.find_by_source(source, source_id).await
    }

    /// Number of cached items
    ///
    /// # Errors
    ///
    /// Returns an error if the database fails
    pub async fn count_food_items(&self) -> AppResult<i64> {
        self.food_items.count().await
    }
}
