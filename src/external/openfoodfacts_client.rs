// ABOUTME: Open Food Facts API client for crowd-sourced product nutrition data
// ABOUTME: Implements product search and barcode lookup normalized into the shared schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Open Food Facts client
//!
//! No API key is needed, but every request carries an identifying
//! `User-Agent` as the Open Food Facts usage policy asks.
//!
//! Nutriments are reported both per serving and per 100 g. The per-serving
//! value wins whenever it is present and non-zero; otherwise the per-100 g
//! value is used. An explicit `0` per serving therefore falls back to the
//! per-100 g figure. Products without a name are dropped.

use super::provider::FoodDataProvider;
use crate::config::OpenFoodFactsConfig;
use crate::constants::{food::DEFAULT_SERVING_UNIT, openfoodfacts as off};
use crate::errors::ProviderError;
use crate::models::{FoodSource, NormalizedFoodResult, ServingSize};
use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Search endpoint response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Product>,
}

/// Product lookup response
#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: Option<i64>,
    #[serde(default)]
    product: Option<Product>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Product {
    code: Option<Value>,
    product_name: Option<String>,
    brands: Option<String>,
    nutriments: Option<Map<String, Value>>,
    serving_size: Option<Value>,
}

impl Product {
    /// `None` for products without a usable name
    fn into_normalized(self) -> Option<NormalizedFoodResult> {
        let name = self.product_name.filter(|name| !name.is_empty())?;
        let source_id = match self.code {
            Some(Value::String(code)) => code,
            Some(Value::Number(code)) => code.to_string(),
            _ => String::new(),
        };
        let nutriments = self.nutriments.unwrap_or_default();

        let mut result = NormalizedFoodResult::new(name, FoodSource::OpenFoodFacts, source_id);
        result.brand = self.brands;
        result.calories = per_serving_or_100g(&nutriments, off::NUTRIMENT_ENERGY_KCAL).unwrap_or(0.0);
        result.protein_g = per_serving_or_100g(&nutriments, off::NUTRIMENT_PROTEINS).unwrap_or(0.0);
        result.carbs_g =
            per_serving_or_100g(&nutriments, off::NUTRIMENT_CARBOHYDRATES).unwrap_or(0.0);
        result.fat_g = per_serving_or_100g(&nutriments, off::NUTRIMENT_FAT).unwrap_or(0.0);
        result.fiber_g = per_serving_or_100g(&nutriments, off::NUTRIMENT_FIBER);
        result.serving_size = self.serving_size.as_ref().and_then(ServingSize::from_json);
        DEFAULT_SERVING_UNIT.clone_into(&mut result.serving_size_unit);
        Some(result)
    }
}

/// `<key>_serving` when truthy, else `<key>_100g`
fn per_serving_or_100g(nutriments: &Map<String, Value>, key: &str) -> Option<f64> {
    nutriments
        .get(&format!("{key}_serving"))
        .and_then(truthy_number)
        .or_else(|| nutriments.get(&format!("{key}_100g")).and_then(numeric))
}

/// Nutriments arrive as numbers or, for older products, numeric strings
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Zero, null and empty strings count as missing
fn truthy_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| *v != 0.0),
        Value::String(s) if !s.is_empty() => s.trim().parse().ok(),
        _ => None,
    }
}

/// Open Food Facts API client
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    config: OpenFoodFactsConfig,
    http_client: Client,
}

impl OpenFoodFactsClient {
    /// Create a new Open Food Facts client
    #[must_use]
    pub const fn new(config: OpenFoodFactsConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Search products by free-text query
    ///
    /// `page` and `page_size` are passed through unchanged. Returns an empty
    /// list when the API answers with a non-success status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, times out, or the
    /// response body is not valid search JSON
    pub async fn search_openfoodfacts(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<NormalizedFoodResult>, ProviderError> {
        let url = format!("{}{}", self.config.base_url, off::SEARCH_PATH);
        let page = page.to_string();
        let page_size = page_size.to_string();

        let response = self
            .http_client
            .get(&url)
            .header(USER_AGENT, &self.config.user_agent)
            .query(&[
                ("search_terms", query),
                ("search_simple", "1"),
                ("action", "process"),
                ("json", "1"),
                ("page", page.as_str()),
                ("page_size", page_size.as_str()),
                ("fields", off::SEARCH_FIELDS),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                provider = off::PROVIDER_NAME,
                status = status.as_u16(),
                "Open Food Facts search returned non-success status"
            );
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        let search: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::ParseError {
                provider: off::PROVIDER_NAME.to_owned(),
                field: "search_response",
                source: e,
            })?;

        let total = search.products.len();
        let results: Vec<NormalizedFoodResult> = search
            .products
            .into_iter()
            .filter_map(Product::into_normalized)
            .collect();

        debug!(
            provider = off::PROVIDER_NAME,
            query,
            page = %page,
            count = results.len(),
            skipped = total - results.len(),
            "Open Food Facts search completed"
        );
        Ok(results)
    }

    /// Look up a single product by barcode
    ///
    /// Returns `None` for unknown or unnamed products and for non-success
    /// statuses. Codes that are not plain alphanumeric barcodes are never sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, times out, or the
    /// response body is not valid product JSON
    pub async fn get_openfoodfacts_product(
        &self,
        code: &str,
    ) -> Result<Option<NormalizedFoodResult>, ProviderError> {
        if code.is_empty() || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            debug!(code, "Ignoring malformed Open Food Facts barcode");
            return Ok(None);
        }

        let url = format!("{}/api/v2/product/{code}.json", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .header(USER_AGENT, &self.config.user_agent)
            .query(&[("fields", off::SEARCH_FIELDS)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(code, "Open Food Facts product not found");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(
                provider = off::PROVIDER_NAME,
                status = status.as_u16(),
                code,
                "Open Food Facts product lookup returned non-success status"
            );
            return Ok(None);
        }

        let body = response.text().await?;
        let lookup: ProductResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::ParseError {
                provider: off::PROVIDER_NAME.to_owned(),
                field: "product_response",
                source: e,
            })?;

        if lookup.status != Some(off::PRODUCT_FOUND_STATUS) {
            return Ok(None);
        }
        Ok(lookup.product.and_then(Product::into_normalized))
    }
}

#[async_trait]
impl FoodDataProvider for OpenFoodFactsClient {
    fn source(&self) -> FoodSource {
        FoodSource::OpenFoodFacts
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<NormalizedFoodResult>, ProviderError> {
        self.search_openfoodfacts(query, page, page_size).await
    }
}
