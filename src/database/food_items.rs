// ABOUTME: Food item persistence with deduplication on (source, source_id)
// ABOUTME: Implements get-or-create, lookups by id and external reference, and counting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::Database;
use crate::errors::{AppError, AppResult};
use crate::models::{FoodItem, FoodItemData, FoodSource};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::{debug, info};
use uuid::Uuid;

const FOOD_ITEM_COLUMNS: &str = "id, name, brand, source, source_id, calories, protein_g, \
     carbs_g, fat_g, fiber_g, serving_size, serving_weight_g, created_at";

impl Database {
    /// Return the stored item for an external reference, creating it first if needed
    ///
    /// When `data` carries a non-empty `source_id` the insert is conditional on
    /// the `(source, source_id)` unique index, so concurrent callers racing on
    /// the same reference end up with the same row. An existing row is returned
    /// unchanged even if `data` holds different nutrient values. Entries without
    /// an external id are always inserted.
    ///
    /// # Errors
    ///
    /// Returns an error if `name` is missing or a query fails
    pub async fn get_or_create_food_item(&self, data: &FoodItemData) -> AppResult<FoodItem> {
        let name = data
            .name
            .clone()
            .ok_or_else(|| AppError::missing_field("name"))?;

        let item = FoodItem {
            id: Uuid::new_v4(),
            name,
            brand: data.brand.clone(),
            source: data.resolved_source(),
            source_id: data.source_id.clone(),
            calories: data.calories.unwrap_or(0.0),
            protein_g: data.protein_g.unwrap_or(0.0),
            carbs_g: data.carbs_g.unwrap_or(0.0),
            fat_g: data.fat_g.unwrap_or(0.0),
            fiber_g: data.fiber_g,
            serving_size: data.composed_serving_size(),
            serving_weight_g: data.serving_weight_g,
            created_at: Utc::now(),
        };

        let Some((source, source_id)) = data.external_key() else {
            self.insert_food_item(&item).await?;
            info!(id = %item.id, source = %item.source, "Created food item");
            return Ok(item);
        };

        let inserted = sqlx::query(
            r"
            INSERT INTO food_items (
                id, name, brand, source, source_id, calories, protein_g,
                carbs_g, fat_g, fiber_g, serving_size, serving_weight_g, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT(source, source_id) WHERE source_id IS NOT NULL AND source_id <> ''
            DO NOTHING
            ",
        )
        .bind(item.id.to_string())
        .bind(&item.name)
        .bind(&item.brand)
        .bind(item.source.as_str())
        .bind(&item.source_id)
        .bind(item.calories)
        .bind(item.protein_g)
        .bind(item.carbs_g)
        .bind(item.fat_g)
        .bind(item.fiber_g)
        .bind(&item.serving_size)
        .bind(item.serving_weight_g)
        .bind(item.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert food item: {e}")))?
        .rows_affected();

        if inserted > 0 {
            info!(id = %item.id, %source, source_id, "Created food item");
            return Ok(item);
        }

        let existing = self
            .find_food_item(source, source_id)
            .await?
            .ok_or_else(|| {
                AppError::internal(format!(
                    "Food item {source}:{source_id} conflicted on insert but could not be read"
                ))
            })?;
        debug!(id = %existing.id, %source, source_id, "Reusing cached food item");
        Ok(existing)
    }

    async fn insert_food_item(&self, item: &FoodItem) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO food_items (
                id, name, brand, source, source_id, calories, protein_g,
                carbs_g, fat_g, fiber_g, serving_size, serving_weight_g, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ",
        )
        .bind(item.id.to_string())
        .bind(&item.name)
        .bind(&item.brand)
        .bind(item.source.as_str())
        .bind(&item.source_id)
        .bind(item.calories)
        .bind(item.protein_g)
        .bind(item.carbs_g)
        .bind(item.fat_g)
        .bind(item.fiber_g)
        .bind(&item.serving_size)
        .bind(item.serving_weight_g)
        .bind(item.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert food item: {e}")))?;

        Ok(())
    }

    /// Get a food item by its id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt
    pub async fn get_food_item(&self, id: Uuid) -> AppResult<Option<FoodItem>> {
        let row = sqlx::query(&format!(
            "SELECT {FOOD_ITEM_COLUMNS} FROM food_items WHERE id = $1"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get food item: {e}")))?;

        row.as_ref().map(row_to_food_item).transpose()
    }

    /// Find the food item stored for an external reference
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is corrupt
    pub async fn find_food_item(
        &self,
        source: FoodSource,
        source_id: &str,
    ) -> AppResult<Option<FoodItem>> {
        let row = sqlx::query(&format!(
            "SELECT {FOOD_ITEM_COLUMNS} FROM food_items WHERE source = $1 AND source_id = $2"
        ))
        .bind(source.as_str())
        .bind(source_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to find food item: {e}")))?;

        row.as_ref().map(row_to_food_item).transpose()
    }

    /// Number of stored food items
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn count_food_items(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM food_items")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to count food items: {e}")))?;

        Ok(count)
    }
}

fn row_to_food_item(row: &SqliteRow) -> AppResult<FoodItem> {
    let id: String = row.try_get("id")?;
    let source: String = row.try_get("source")?;
    let created_at: String = row.try_get("created_at")?;

    Ok(FoodItem {
        id: Uuid::parse_str(&id)
            .map_err(|e| AppError::database(format!("Invalid food item id {id}: {e}")))?,
        name: row.try_get("name")?,
        brand: row.try_get("brand")?,
        source: source.parse().map_err(AppError::database)?,
        source_id: row.try_get("source_id")?,
        calories: row.try_get("calories")?,
        protein_g: row.try_get("protein_g")?,
        carbs_g: row.try_get("carbs_g")?,
        fat_g: row.try_get("fat_g")?,
        fiber_g: row.try_get("fiber_g")?,
        serving_size: row.try_get("serving_size")?,
        serving_weight_g: row.try_get("serving_weight_g")?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map_err(|e| AppError::database(format!("Invalid created_at {created_at}: {e}")))?
            .with_timezone(&Utc),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ServingSize;

    async fn test_db() -> Database {
        Database::new("sqlite::memory:").await.unwrap()
    }

    fn usda_apple() -> FoodItemData {
        FoodItemData {
            name: Some("Apple, Raw".to_owned()),
            source: Some(FoodSource::Usda),
            source_id: Some("171688".to_owned()),
            calories: Some(52.0),
            serving_size: Some(ServingSize::from(100_u64)),
            serving_size_unit: Some("g".to_owned()),
            ..FoodItemData::default()
        }
    }

    #[tokio::test]
    async fn test_round_trip_through_row_mapping() {
        let db = test_db().await;
        let created = db.get_or_create_food_item(&usda_apple()).await.unwrap();

        let loaded = db.get_food_item(created.id).await.unwrap().unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.serving_size.as_deref(), Some("100g"));
        assert_eq!(loaded.fiber_g, None);
    }

    #[tokio::test]
    async fn test_existing_row_is_not_updated() {
        let db = test_db().await;
        let first = db.get_or_create_food_item(&usda_apple()).await.unwrap();

        let mut changed = usda_apple();
        changed.calories = Some(999.0);
        let second = db.get_or_create_food_item(&changed).await.unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.calories, 52.0);
        assert_eq!(db.count_food_items().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_source_id_is_not_deduplicated() {
        let db = test_db().await;
        let data = FoodItemData {
            name: Some("Homemade Soup".to_owned()),
            source_id: Some(String::new()),
            ..FoodItemData::default()
        };

        let a = db.get_or_create_food_item(&data).await.unwrap();
        let b = db.get_or_create_food_item(&data).await.unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.source, FoodSource::Custom);
        assert_eq!(db.count_food_items().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_food_item_is_none() {
        let db = test_db().await;
        assert!(db.get_food_item(Uuid::new_v4()).await.unwrap().is_none());
        assert!(db
            .find_food_item(FoodSource::OpenFoodFacts, "0000")
            .await
            .unwrap()
            .is_none());
    }
}
