// ABOUTME: SQLite-backed FoodItemRepository implementation
// ABOUTME: Delegates to Database, keeping its error codes intact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::FoodItemRepository;
use crate::database::Database;
use crate::errors::AppResult;
use crate::models::{FoodItem, FoodItemData, FoodSource};
use async_trait::async_trait;
use uuid::Uuid;

/// SQLite implementation of `FoodItemRepository`
pub struct FoodItemRepositoryImpl {
    db: Database,
}

impl FoodItemRepositoryImpl {
    /// Create a new `FoodItemRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodItemRepository for FoodItemRepositoryImpl {
    async fn get_or_create(&self, data: &FoodItemData) -> AppResult<FoodItem> {
        self.db.get_or_create_food_item(data).await
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<FoodItem>> {
        self.db.get_food_item(id).await
    }

    async fn find_by_source(
        &self,
        source: FoodSource,
        source_id: &str,
    ) -> AppResult<Option<FoodItem>> {
        self.db.find_food_item(source, source_id).await
    }

    async fn count(&self) -> AppResult<i64> {
        self.db.count_food_items().await
    }
}
