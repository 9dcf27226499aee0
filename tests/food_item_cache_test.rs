// ABOUTME: Integration tests for the persistent food item cache
// ABOUTME: Verifies get-or-create deduplication, serving size composition and input validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use habitz_nutrition::database::repositories::{FoodItemRepository, FoodItemRepositoryImpl};
use habitz_nutrition::database::Database;
use habitz_nutrition::errors::ErrorCode;
use habitz_nutrition::models::{FoodItemData, FoodSource, NormalizedFoodResult, ServingSize};
use habitz_nutrition::nutrition::NutritionService;
use serde_json::json;
use std::sync::Arc;

fn offline_service(database: Database) -> NutritionService {
    // Nothing listens on port 9; the cache never touches the network
    NutritionService::new(
        common::usda_client("http://127.0.0.1:9", None),
        common::openfoodfacts_client("http://127.0.0.1:9"),
        Arc::new(FoodItemRepositoryImpl::new(database)),
    )
}

fn usda_cheddar() -> NormalizedFoodResult {
    let mut result = NormalizedFoodResult::new("Cheddar Cheese", FoodSource::Usda, "2345678");
    result.calories = 403.0;
    result.protein_g = 24.9;
    result.fat_g = 33.1;
    result.fiber_g = Some(0.0);
    result.serving_size = Some(ServingSize::from(100_u64));
    result
}

#[tokio::test]
async fn test_same_reference_is_stored_once() {
    let database = common::create_test_database().await.unwrap();
    let service = offline_service(database);

    let first = service.cache_result(&usda_cheddar()).await.unwrap();
    let second = service.cache_result(&usda_cheddar()).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(service.count_food_items().await.unwrap(), 1);
    assert_eq!(first.source, FoodSource::Usda);
    assert_eq!(first.source_id.as_deref(), Some("2345678"));
    assert_eq!(first.serving_size.as_deref(), Some("100g"));
    assert_eq!(first.carbs_g, 0.0);
}

#[tokio::test]
async fn test_existing_item_wins_over_new_values() {
    let database = common::create_test_database().await.unwrap();
    let service = offline_service(database);

    let stored = service.cache_result(&usda_cheddar()).await.unwrap();

    let mut revised = usda_cheddar();
    revised.name = "Cheddar, Extra Sharp".to_owned();
    revised.calories = 410.0;
    let cached = service.cache_result(&revised).await.unwrap();

    assert_eq!(cached.id, stored.id);
    assert_eq!(cached.name, "Cheddar Cheese");
    assert_eq!(cached.calories, 403.0);
}

#[tokio::test]
async fn test_same_id_under_different_sources_is_distinct() {
    let database = common::create_test_database().await.unwrap();
    let service = offline_service(database);

    let usda = service.cache_result(&usda_cheddar()).await.unwrap();
    let off = service
        .cache_result(&NormalizedFoodResult::new(
            "Cheddar",
            FoodSource::OpenFoodFacts,
            "2345678",
        ))
        .await
        .unwrap();

    assert_ne!(usda.id, off.id);
    assert_eq!(service.count_food_items().await.unwrap(), 2);
    assert_eq!(
        service
            .find_food_item(FoodSource::OpenFoodFacts, "2345678")
            .await
            .unwrap()
            .map(|item| item.id),
        Some(off.id)
    );
}

#[tokio::test]
async fn test_custom_items_without_reference_are_never_merged() {
    let database = common::create_test_database().await.unwrap();
    let service = offline_service(database);

    let data: FoodItemData = serde_json::from_value(json!({
        "name": "Grandma's Lasagna",
        "calories": 520,
        "serving_size": "1 slice"
    }))
    .unwrap();

    let a = service.get_or_create_food_item(&data).await.unwrap();
    let b = service.get_or_create_food_item(&data).await.unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(a.source, FoodSource::Custom);
    assert_eq!(a.source_id, None);
    assert_eq!(a.serving_size.as_deref(), Some("1 slice"));
    assert_eq!(a.protein_g, 0.0);
    assert_eq!(service.count_food_items().await.unwrap(), 2);
}

#[tokio::test]
async fn test_reference_without_source_dedupes_as_custom() {
    let database = common::create_test_database().await.unwrap();
    let service = offline_service(database);

    let data: FoodItemData =
        serde_json::from_value(json!({"name": "Office Salad", "source_id": "salad-7"})).unwrap();

    let a = service.get_or_create_food_item(&data).await.unwrap();
    let b = service.get_or_create_food_item(&data).await.unwrap();

    assert_eq!(a.id, b.id);
    assert_eq!(a.source, FoodSource::Custom);
}

#[tokio::test]
async fn test_missing_name_is_rejected() {
    let database = common::create_test_database().await.unwrap();
    let service = offline_service(database);

    let data: FoodItemData =
        serde_json::from_value(json!({"source": "usda", "source_id": "1"})).unwrap();
    let error = service.get_or_create_food_item(&data).await.unwrap_err();

    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert_eq!(service.count_food_items().await.unwrap(), 0);
}

#[tokio::test]
async fn test_repository_reports_missing_name_as_validation_error() {
    let database = common::create_test_database().await.unwrap();
    let repository = FoodItemRepositoryImpl::new(database);

    let error = repository
        .get_or_create(&FoodItemData::default())
        .await
        .unwrap_err();

    assert_eq!(error.code, ErrorCode::MissingRequiredField);
    assert_eq!(error.http_status(), 400);
    assert_eq!(repository.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_name_only_item_defaults_numeric_fields() {
    let database = common::create_test_database().await.unwrap();
    let service = offline_service(database);

    let data: FoodItemData = serde_json::from_value(json!({"name": "X"})).unwrap();
    let item = service.get_or_create_food_item(&data).await.unwrap();

    assert_eq!(item.name, "X");
    assert_eq!(item.calories, 0.0);
    assert_eq!(item.protein_g, 0.0);
    assert_eq!(item.carbs_g, 0.0);
    assert_eq!(item.fat_g, 0.0);
    assert_eq!(item.fiber_g, None);
    assert_eq!(item.serving_weight_g, None);
    assert_eq!(item.serving_size, None);
    assert_eq!(item.source, FoodSource::Custom);
    assert_eq!(item.source_id, None);

    let stored = service.get_food_item(item.id).await.unwrap().unwrap();
    assert_eq!(stored.calories, 0.0);
    assert_eq!(stored.fiber_g, None);
    assert_eq!(stored.serving_weight_g, None);
}

#[tokio::test]
async fn test_concurrent_creates_share_one_row() {
    let database = common::create_test_database().await.unwrap();
    let repository = FoodItemRepositoryImpl::new(database);
    let data = FoodItemData::from(usda_cheddar());

    let (a, b) = tokio::join!(repository.get_or_create(&data), repository.get_or_create(&data));

    assert_eq!(a.unwrap().id, b.unwrap().id);
    assert_eq!(repository.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_file_database_persists_across_reopen() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("nested/foods.db").display());

    let created = {
        let database = Database::new(&url).await.unwrap();
        database
            .get_or_create_food_item(&FoodItemData::from(usda_cheddar()))
            .await
            .unwrap()
    };

    let reopened = Database::new(&url).await.unwrap();
    let loaded = reopened.get_food_item(created.id).await.unwrap().unwrap();

    assert_eq!(loaded.name, "Cheddar Cheese");
    assert_eq!(reopened.count_food_items().await.unwrap(), 1);
}
