// ABOUTME: Integration tests for multi-provider food search aggregation
// ABOUTME: Verifies ordering, page size, and tolerance of failing or slow providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use async_trait::async_trait;
use habitz_nutrition::database::repositories::FoodItemRepositoryImpl;
use habitz_nutrition::errors::ProviderError;
use habitz_nutrition::external::FoodDataProvider;
use habitz_nutrition::models::{FoodSource, NormalizedFoodResult};
use habitz_nutrition::nutrition::{FoodSearchAggregator, NutritionService, ProviderOutcome};
use serde_json::json;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Provider returning canned names and recording the page arguments it saw
struct StubProvider {
    source: FoodSource,
    names: Vec<&'static str>,
    fail: bool,
    calls: Mutex<Vec<(u32, u32)>>,
}

impl StubProvider {
    fn answering(source: FoodSource, names: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            source,
            names,
            fail: false,
            calls: Mutex::new(Vec::new()),
        })
    }

    fn failing(source: FoodSource) -> Arc<Self> {
        Arc::new(Self {
            source,
            names: Vec::new(),
            fail: true,
            calls: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl FoodDataProvider for StubProvider {
    fn source(&self) -> FoodSource {
        self.source
    }

    async fn search(
        &self,
        _query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<NormalizedFoodResult>, ProviderError> {
        self.calls.lock().unwrap().push((page, page_size));
        if self.fail {
            return Err(ProviderError::NetworkError("connection refused".to_owned()));
        }
        Ok(self
            .names
            .iter()
            .map(|name| NormalizedFoodResult::new(*name, self.source, *name))
            .collect())
    }
}

fn as_provider(provider: &Arc<StubProvider>) -> Arc<dyn FoodDataProvider> {
    provider.clone()
}

fn names(results: &[NormalizedFoodResult]) -> Vec<&str> {
    results.iter().map(|r| r.name.as_str()).collect()
}

#[tokio::test]
async fn test_results_keep_provider_order() {
    common::init_test_logging();
    let usda = StubProvider::answering(FoodSource::Usda, vec!["A1", "A2"]);
    let off = StubProvider::answering(FoodSource::OpenFoodFacts, vec!["B1"]);
    let aggregator = FoodSearchAggregator::new(vec![as_provider(&usda), as_provider(&off)]);

    let results = aggregator.search_foods("apple", 2).await;

    assert_eq!(names(&results), ["A1", "A2", "B1"]);
    assert_eq!(*usda.calls.lock().unwrap(), [(2, 10)]);
    assert_eq!(*off.calls.lock().unwrap(), [(2, 10)]);
}

#[tokio::test]
async fn test_failing_provider_is_skipped() {
    common::init_test_logging();
    let usda = StubProvider::failing(FoodSource::Usda);
    let off = StubProvider::answering(FoodSource::OpenFoodFacts, vec!["B1", "B2"]);
    let aggregator = FoodSearchAggregator::new(vec![as_provider(&usda), as_provider(&off)]);

    let results = aggregator.search_foods("apple", 1).await;

    assert_eq!(names(&results), ["B1", "B2"]);
    assert_eq!(usda.calls.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_all_providers_failing_is_empty() {
    common::init_test_logging();
    let aggregator = FoodSearchAggregator::new(vec![
        as_provider(&StubProvider::failing(FoodSource::Usda)),
        as_provider(&StubProvider::failing(FoodSource::OpenFoodFacts)),
    ]);

    assert!(aggregator.search_foods("apple", 1).await.is_empty());
}

#[tokio::test]
async fn test_outcomes_record_each_provider() {
    common::init_test_logging();
    let aggregator = FoodSearchAggregator::new(vec![
        as_provider(&StubProvider::failing(FoodSource::Usda)),
        as_provider(&StubProvider::answering(FoodSource::OpenFoodFacts, vec![])),
    ]);
    assert_eq!(aggregator.provider_count(), 2);

    let outcomes = aggregator.collect_outcomes("apple", 1, 5).await;

    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes[0],
        ProviderOutcome::Failed {
            source: FoodSource::Usda,
            ..
        }
    ));
    assert!(matches!(
        &outcomes[1],
        ProviderOutcome::Success { source: FoodSource::OpenFoodFacts, results } if results.is_empty()
    ));
}

#[tokio::test]
async fn test_service_search_survives_slow_usda() {
    common::init_test_logging();
    let usda_server = MockServer::start().await;
    let off_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/foods/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"foods": [{"fdcId": 1, "description": "LATE"}]}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&usda_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/cgi/search.pl"))
        .and(query_param("page_size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"code": "42", "product_name": "Banana Chips"}]
        })))
        .mount(&off_server)
        .await;

    let service = NutritionService::new(
        common::usda_client(&usda_server.uri(), Some("test-key")),
        common::openfoodfacts_client(&off_server.uri()),
        Arc::new(FoodItemRepositoryImpl::new(
            common::create_test_database().await.unwrap(),
        )),
    );

    let results = service.search_foods("banana", 1).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Banana Chips");
    assert_eq!(results[0].source, FoodSource::OpenFoodFacts);
}
