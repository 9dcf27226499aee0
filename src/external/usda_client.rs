// ABOUTME: USDA FoodData Central API client for nutritional data retrieval
// ABOUTME: Implements filtered food search and detail lookup normalized into the shared schema
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! USDA `FoodData` Central API Client
//!
//! Searches are restricted to the `Survey (FNDDS)` and `Branded` data types.
//! Each returned food carries a heterogeneous nutrient list; the five values
//! the normalized schema needs are picked out by nutrient id using
//! [`NUTRIENT_FIELDS`].
//!
//! A missing API key or a non-success status yields an empty result rather
//! than an error. Transport failures and malformed bodies are returned as
//! [`ProviderError`] for the caller to handle.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>
//!
//! # Example
//! ```rust,no_run
//! use habitz_nutrition::config::{HttpClientConfig, UsdaConfig};
//! use habitz_nutrition::external::{build_http_client, UsdaClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = UsdaConfig {
//!     api_key: Some("your_api_key".to_owned()),
//!     ..UsdaConfig::default()
//! };
//! let client = UsdaClient::new(config, build_http_client(&HttpClientConfig::default()));
//! let results = client.search_usda("apple", 1, 10).await?;
//! # Ok(())
//! # }
//! ```

use super::provider::FoodDataProvider;
use crate::config::UsdaConfig;
use crate::constants::{food::DEFAULT_SERVING_UNIT, usda};
use crate::errors::ProviderError;
use crate::models::{FoodSource, NormalizedFoodResult, ServingSize};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Number;
use tracing::{debug, warn};

/// Normalized field populated from a USDA nutrient id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NutrientField {
    /// `calories`
    Calories,
    /// `protein_g`
    Protein,
    /// `carbs_g`
    Carbs,
    /// `fat_g`
    Fat,
    /// `fiber_g`
    Fiber,
}

/// USDA nutrient id to normalized field mapping
pub const NUTRIENT_FIELDS: [(u32, NutrientField); 5] = [
    (usda::NUTRIENT_ENERGY_KCAL, NutrientField::Calories),
    (usda::NUTRIENT_PROTEIN, NutrientField::Protein),
    (usda::NUTRIENT_CARBOHYDRATE, NutrientField::Carbs),
    (usda::NUTRIENT_TOTAL_FAT, NutrientField::Fat),
    (usda::NUTRIENT_FIBER, NutrientField::Fiber),
];

/// USDA API search response
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

/// One food in a search response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SearchFood {
    fdc_id: Option<u64>,
    description: Option<String>,
    brand_name: Option<String>,
    brand_owner: Option<String>,
    food_nutrients: Vec<SearchNutrient>,
    serving_size: Option<Number>,
    serving_size_unit: Option<String>,
}

/// Search responses flatten the nutrient id and amount
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    nutrient_id: Option<u32>,
    value: Option<f64>,
}

/// USDA API food details response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct FoodDetailsResponse {
    fdc_id: Option<u64>,
    description: Option<String>,
    brand_name: Option<String>,
    brand_owner: Option<String>,
    food_nutrients: Vec<DetailNutrient>,
    serving_size: Option<Number>,
    serving_size_unit: Option<String>,
}

/// Detail responses nest the nutrient id
#[derive(Debug, Deserialize)]
struct DetailNutrient {
    nutrient: Option<NutrientInfo>,
    amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct NutrientInfo {
    id: u32,
}

/// Nutrient id and amount, whichever response shape it came from
#[derive(Debug, Clone, Copy)]
struct NutrientAmount {
    nutrient_id: u32,
    value: f64,
}

/// Fields shared by search and detail payloads before normalization
struct UsdaFood {
    fdc_id: Option<u64>,
    description: Option<String>,
    brand_name: Option<String>,
    brand_owner: Option<String>,
    nutrients: Vec<NutrientAmount>,
    serving_size: Option<Number>,
    serving_size_unit: Option<String>,
}

impl From<SearchFood> for UsdaFood {
    fn from(food: SearchFood) -> Self {
        Self {
            fdc_id: food.fdc_id,
            description: food.description,
            brand_name: food.brand_name,
            brand_owner: food.brand_owner,
            nutrients: food
                .food_nutrients
                .into_iter()
                .filter_map(|n| {
                    Some(NutrientAmount {
                        nutrient_id: n.nutrient_id?,
                        value: n.value.unwrap_or(0.0),
                    })
                })
                .collect(),
            serving_size: food.serving_size,
            serving_size_unit: food.serving_size_unit,
        }
    }
}

impl From<FoodDetailsResponse> for UsdaFood {
    fn from(food: FoodDetailsResponse) -> Self {
        Self {
            fdc_id: food.fdc_id,
            description: food.description,
            brand_name: food.brand_name,
            brand_owner: food.brand_owner,
            nutrients: food
                .food_nutrients
                .into_iter()
                .filter_map(|n| {
                    Some(NutrientAmount {
                        nutrient_id: n.nutrient?.id,
                        value: n.amount.unwrap_or(0.0),
                    })
                })
                .collect(),
            serving_size: food.serving_size,
            serving_size_unit: food.serving_size_unit,
        }
    }
}

impl UsdaFood {
    fn into_normalized(self) -> NormalizedFoodResult {
        let mut result = NormalizedFoodResult::new(
            title_case(self.description.as_deref().unwrap_or_default()),
            FoodSource::Usda,
            self.fdc_id.map(|id| id.to_string()).unwrap_or_default(),
        );
        result.brand = self
            .brand_name
            .filter(|name| !name.is_empty())
            .or(self.brand_owner);

        for (nutrient_id, field) in NUTRIENT_FIELDS {
            let value = nutrient_value(&self.nutrients, nutrient_id);
            match field {
                NutrientField::Calories => result.calories = value,
                NutrientField::Protein => result.protein_g = value,
                NutrientField::Carbs => result.carbs_g = value,
                NutrientField::Fat => result.fat_g = value,
                NutrientField::Fiber => result.fiber_g = Some(value),
            }
        }

        result.serving_size = self.serving_size.map(ServingSize::Amount);
        result.serving_size_unit = self
            .serving_size_unit
            .unwrap_or_else(|| DEFAULT_SERVING_UNIT.to_owned());
        result
    }
}

/// First amount reported for `nutrient_id`, 0 when the food does not list it
fn nutrient_value(nutrients: &[NutrientAmount], nutrient_id: u32) -> f64 {
    nutrients
        .iter()
        .find(|n| n.nutrient_id == nutrient_id)
        .map_or(0.0, |n| n.value)
}

/// Capitalize the first letter of every alphabetic run, lowercase the rest
///
/// USDA descriptions are often upper case (`"CHEDDAR CHEESE, SHARP"`).
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut titled = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                titled.extend(ch.to_lowercase());
            } else {
                titled.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            titled.push(ch);
            in_word = false;
        }
    }
    titled
}

/// USDA `FoodData` Central API Client
#[derive(Debug, Clone)]
pub struct UsdaClient {
    config: UsdaConfig,
    http_client: Client,
}

impl UsdaClient {
    /// Create a new USDA API client
    #[must_use]
    pub const fn new(config: UsdaConfig, http_client: Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    fn api_key(&self) -> Option<&str> {
        self.config.api_key.as_deref().filter(|key| !key.is_empty())
    }

    /// Search for foods by free-text query
    ///
    /// `page` is 1-based. Returns an empty list when no API key is configured
    /// or when the API answers with a non-success status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, times out, or the
    /// response body is not valid search JSON
    pub async fn search_usda(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<NormalizedFoodResult>, ProviderError> {
        let Some(api_key) = self.api_key() else {
            debug!("USDA_API_KEY not configured, skipping USDA search");
            return Ok(Vec::new());
        };

        let url = format!("{}{}", self.config.base_url, usda::SEARCH_PATH);
        let page_size = page_size.to_string();
        let page_number = page.to_string();
        let mut params = vec![
            ("api_key", api_key),
            ("query", query),
            ("pageSize", page_size.as_str()),
            ("pageNumber", page_number.as_str()),
        ];
        params.extend(usda::SEARCH_DATA_TYPES.iter().map(|data_type| ("dataType", *data_type)));

        let response = self.http_client.get(&url).query(&params).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                provider = usda::PROVIDER_NAME,
                status = status.as_u16(),
                "USDA search returned non-success status"
            );
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        let search: SearchResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::ParseError {
                provider: usda::PROVIDER_NAME.to_owned(),
                field: "search_response",
                source: e,
            })?;

        let results: Vec<NormalizedFoodResult> = search
            .foods
            .into_iter()
            .map(|food| UsdaFood::from(food).into_normalized())
            .collect();

        debug!(
            provider = usda::PROVIDER_NAME,
            query,
            page,
            count = results.len(),
            "USDA search completed"
        );
        Ok(results)
    }

    /// Get a single food by FDC ID
    ///
    /// Returns `None` when no API key is configured, the food does not exist,
    /// or the API answers with another non-success status.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, times out, or the
    /// response body is not valid food JSON
    pub async fn get_usda_food(
        &self,
        fdc_id: u64,
    ) -> Result<Option<NormalizedFoodResult>, ProviderError> {
        let Some(api_key) = self.api_key() else {
            debug!("USDA_API_KEY not configured, skipping USDA food lookup");
            return Ok(None);
        };

        let url = format!("{}/food/{fdc_id}", self.config.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key)])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(fdc_id, "USDA food not found");
            return Ok(None);
        }
        if !status.is_success() {
            warn!(
                provider = usda::PROVIDER_NAME,
                status = status.as_u16(),
                fdc_id,
                "USDA food lookup returned non-success status"
            );
            return Ok(None);
        }

        let body = response.text().await?;
        let details: FoodDetailsResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::ParseError {
                provider: usda::PROVIDER_NAME.to_owned(),
                field: "food_details_response",
                source: e,
            })?;

        Ok(Some(UsdaFood::from(details).into_normalized()))
    }
}

#[async_trait]
impl FoodDataProvider for UsdaClient {
    fn source(&self) -> FoodSource {
        FoodSource::Usda
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<NormalizedFoodResult>, ProviderError> {
        self.search_usda(query, page, page_size).await
    }
}
