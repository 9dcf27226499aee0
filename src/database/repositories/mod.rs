// ABOUTME: Repository traits decoupling services from the concrete database
// ABOUTME: Defines FoodItemRepository and re-exports its SQLite implementation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod food_item_repository;

pub use food_item_repository::FoodItemRepositoryImpl;

use crate::errors::AppResult;
use crate::models::{FoodItem, FoodItemData, FoodSource};
use async_trait::async_trait;
use uuid::Uuid;

/// Food item cache operations
#[async_trait]
pub trait FoodItemRepository: Send + Sync {
    /// Return the stored item for `data`'s external reference, inserting it if absent
    ///
    /// A missing `name` is reported as `ErrorCode::MissingRequiredField`.
    async fn get_or_create(&self, data: &FoodItemData) -> AppResult<FoodItem>;

    /// Get a food item by id
    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<FoodItem>>;

    /// Find the item stored for an external reference
    async fn find_by_source(
        &self,
        source: FoodSource,
        source_id: &str,
    ) -> AppResult<Option<FoodItem>>;

    /// Count stored items
    async fn count(&self) -> AppResult<i64>;
}
