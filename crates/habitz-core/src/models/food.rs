// ABOUTME: Food models shared by the provider adapters and the food item store
// ABOUTME: FoodSource, ServingSize, NormalizedFoodResult, FoodItem and FoodItemData
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::food::DEFAULT_SERVING_UNIT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Origin of a food record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum FoodSource {
    /// USDA `FoodData` Central
    Usda,
    /// Open Food Facts
    #[serde(rename = "openfoodfacts")]
    OpenFoodFacts,
    /// Entered by a user, no external id
    #[default]
    Custom,
}

impl FoodSource {
    /// Stable tag stored in the database and emitted in JSON
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Usda => "usda",
            Self::OpenFoodFacts => "openfoodfacts",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for FoodSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FoodSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "usda" => Ok(Self::Usda),
            "openfoodfacts" => Ok(Self::OpenFoodFacts),
            "custom" => Ok(Self::Custom),
            other => Err(format!("unknown food source: {other}")),
        }
    }
}

/// Serving size as reported by a provider
///
/// USDA reports a number, Open Food Facts usually a free-form label such as
/// `"30 g"`. Numbers keep their JSON rendering so `100` stays `100` and
/// `100.0` stays `100.0` when composed with a unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ServingSize {
    /// Numeric amount
    Amount(Number),
    /// Free-form label
    Text(String),
}

impl ServingSize {
    /// Build from an arbitrary JSON value, ignoring shapes that are neither number nor string
    #[must_use]
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Some(Self::Amount(n.clone())),
            Value::String(s) => Some(Self::Text(s.clone())),
            _ => None,
        }
    }

    /// Zero amounts and empty labels carry no serving information
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Amount(n) => n.as_f64().is_some_and(|v| v != 0.0),
            Self::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for ServingSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Amount(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for ServingSize {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or_else(|| Self::Text(value.to_string()), Self::Amount)
    }
}

impl From<u64> for ServingSize {
    fn from(value: u64) -> Self {
        Self::Amount(Number::from(value))
    }
}

impl From<&str> for ServingSize {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Provider result translated into the shared schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFoodResult {
    /// Display name
    pub name: String,
    /// Brand or brand owner
    pub brand: Option<String>,
    /// Provider the result came from
    pub source: FoodSource,
    /// Provider-assigned id, unique per source
    pub source_id: String,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Fiber in grams, absent when the provider has no value
    pub fiber_g: Option<f64>,
    /// Serving size as reported
    pub serving_size: Option<ServingSize>,
    /// Unit for `serving_size`
    pub serving_size_unit: String,
}

impl NormalizedFoodResult {
    /// Empty result for the given source, all nutrients zeroed
    #[must_use]
    pub fn new(name: impl Into<String>, source: FoodSource, source_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brand: None,
            source,
            source_id: source_id.into(),
            calories: 0.0,
            protein_g: 0.0,
            carbs_g: 0.0,
            fat_g: 0.0,
            fiber_g: None,
            serving_size: None,
            serving_size_unit: DEFAULT_SERVING_UNIT.to_owned(),
        }
    }
}

/// Durable food record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    /// Synthetic identity
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Brand or brand owner
    pub brand: Option<String>,
    /// Origin of the record
    pub source: FoodSource,
    /// Provider-assigned id; `None` for custom entries
    pub source_id: Option<String>,
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein_g: f64,
    /// Carbohydrates in grams
    pub carbs_g: f64,
    /// Fat in grams
    pub fat_g: f64,
    /// Fiber in grams
    pub fiber_g: Option<f64>,
    /// Serving label, size and unit concatenated (`"100g"`)
    pub serving_size: Option<String>,
    /// Serving weight in grams when known
    pub serving_weight_g: Option<f64>,
    /// Insertion time
    pub created_at: DateTime<Utc>,
}

/// Loosely typed upsert input
///
/// Deserializes from any JSON object with compatible keys; unknown keys are
/// ignored and every field is optional so the store can decide which absences
/// are defaults and which are contract violations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FoodItemData {
    /// Display name (required when a record is created)
    pub name: Option<String>,
    /// Brand or brand owner
    pub brand: Option<String>,
    /// Origin; `custom` when absent
    #[serde(deserialize_with = "deserialize_source")]
    pub source: Option<FoodSource>,
    /// Provider-assigned id
    #[serde(deserialize_with = "deserialize_external_id")]
    pub source_id: Option<String>,
    /// Energy in kcal
    pub calories: Option<f64>,
    /// Protein in grams
    pub protein_g: Option<f64>,
    /// Carbohydrates in grams
    pub carbs_g: Option<f64>,
    /// Fat in grams
    pub fat_g: Option<f64>,
    /// Fiber in grams
    pub fiber_g: Option<f64>,
    /// Serving size, numeric or label
    pub serving_size: Option<ServingSize>,
    /// Unit appended to a numeric serving size
    pub serving_size_unit: Option<String>,
    /// Serving weight in grams
    pub serving_weight_g: Option<f64>,
}

impl FoodItemData {
    /// Source the record will be stored under
    #[must_use]
    pub fn resolved_source(&self) -> FoodSource {
        self.source.unwrap_or_default()
    }

    /// Deduplication key, present only when the external id is non-empty
    ///
    /// An id given without a source is keyed as `custom`, so repeated calls
    /// with the same id reuse one row.
    #[must_use]
    pub fn external_key(&self) -> Option<(FoodSource, &str)> {
        self.source_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| (self.resolved_source(), id))
    }

    /// Serving label as stored: size immediately followed by unit
    ///
    /// A falsy size is kept as its plain rendering, a missing one stays absent.
    #[must_use]
    pub fn composed_serving_size(&self) -> Option<String> {
        let serving = self.serving_size.as_ref()?;
        match self.serving_size_unit.as_deref() {
            Some(unit) if serving.is_truthy() && !unit.is_empty() => {
                Some(format!("{serving}{unit}"))
            }
            _ => Some(serving.to_string()),
        }
    }
}

impl From<NormalizedFoodResult> for FoodItemData {
    fn from(result: NormalizedFoodResult) -> Self {
        Self {
            name: Some(result.name),
            brand: result.brand,
            source: Some(result.source),
            source_id: Some(result.source_id),
            calories: Some(result.calories),
            protein_g: Some(result.protein_g),
            carbs_g: Some(result.carbs_g),
            fat_g: Some(result.fat_g),
            fiber_g: result.fiber_g,
            serving_size: result.serving_size,
            serving_size_unit: Some(result.serving_size_unit),
            serving_weight_g: None,
        }
    }
}

impl From<&NormalizedFoodResult> for FoodItemData {
    fn from(result: &NormalizedFoodResult) -> Self {
        Self::from(result.clone())
    }
}

/// Empty strings and nulls mean "no source"
fn deserialize_source<'de, D>(deserializer: D) -> Result<Option<FoodSource>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(tag) => tag.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// External ids arrive as strings from Open Food Facts and as numbers from USDA
fn deserialize_external_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "source_id must be a string or number, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_food_source_tags() {
        assert_eq!(FoodSource::OpenFoodFacts.as_str(), "openfoodfacts");
        assert_eq!("usda".parse::<FoodSource>(), Ok(FoodSource::Usda));
        assert!("spoonacular".parse::<FoodSource>().is_err());
        assert_eq!(
            serde_json::to_value(FoodSource::OpenFoodFacts).ok(),
            Some(json!("openfoodfacts"))
        );
    }

    #[test]
    fn test_serving_size_keeps_json_rendering() {
        let int: ServingSize = serde_json::from_value(json!(100)).unwrap();
        let float: ServingSize = serde_json::from_value(json!(28.5)).unwrap();
        let label: ServingSize = serde_json::from_value(json!("1 cup (240 ml)")).unwrap();

        assert_eq!(int.to_string(), "100");
        assert_eq!(float.to_string(), "28.5");
        assert_eq!(label, ServingSize::Text("1 cup (240 ml)".to_owned()));
    }

    #[test]
    fn test_composed_serving_size() {
        let data = FoodItemData {
            serving_size: Some(ServingSize::from(100_u64)),
            serving_size_unit: Some("g".to_owned()),
            ..FoodItemData::default()
        };
        assert_eq!(data.composed_serving_size().as_deref(), Some("100g"));

        let no_unit = FoodItemData {
            serving_size: Some(ServingSize::from(30_u64)),
            ..FoodItemData::default()
        };
        assert_eq!(no_unit.composed_serving_size().as_deref(), Some("30"));

        let zero = FoodItemData {
            serving_size: Some(ServingSize::from(0_u64)),
            serving_size_unit: Some("g".to_owned()),
            ..FoodItemData::default()
        };
        assert_eq!(zero.composed_serving_size().as_deref(), Some("0"));

        assert_eq!(FoodItemData::default().composed_serving_size(), None);
    }

    #[test]
    fn test_food_item_data_from_loose_json() {
        let data: FoodItemData = serde_json::from_value(json!({
            "name": "Oat Milk",
            "source": "usda",
            "source_id": 2_345_678,
            "calories": 120,
            "unexpected": true
        }))
        .unwrap();

        assert_eq!(data.external_key(), Some((FoodSource::Usda, "2345678")));
        assert_eq!(data.calories, Some(120.0));
        assert_eq!(data.protein_g, None);
    }

    #[test]
    fn test_external_key_requires_non_empty_id() {
        let data: FoodItemData =
            serde_json::from_value(json!({"name": "X", "source": "", "source_id": ""})).unwrap();
        assert_eq!(data.external_key(), None);
        assert_eq!(data.resolved_source(), FoodSource::Custom);
    }
}
