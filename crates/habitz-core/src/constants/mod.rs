// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Provider endpoints, nutrient id tables, and configuration defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the provider or concern they belong to rather than
//! living in a single flat namespace.

/// USDA `FoodData` Central constants
pub mod usda {
    /// Provider name used in logs and errors
    pub const PROVIDER_NAME: &str = "USDA FoodData Central";
    /// Default API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Search endpoint path
    pub const SEARCH_PATH: &str = "/foods/search";
    /// Data categories the search is restricted to
    pub const SEARCH_DATA_TYPES: [&str; 2] = ["Survey (FNDDS)", "Branded"];

    /// Energy in kcal
    pub const NUTRIENT_ENERGY_KCAL: u32 = 1008;
    /// Protein in grams
    pub const NUTRIENT_PROTEIN: u32 = 1003;
    /// Carbohydrate, by difference, in grams
    pub const NUTRIENT_CARBOHYDRATE: u32 = 1005;
    /// Total lipid (fat) in grams
    pub const NUTRIENT_TOTAL_FAT: u32 = 1004;
    /// Total dietary fiber in grams
    pub const NUTRIENT_FIBER: u32 = 1079;
}

/// Open Food Facts constants
pub mod openfoodfacts {
    /// Provider name used in logs and errors
    pub const PROVIDER_NAME: &str = "Open Food Facts";
    /// Default site base URL
    pub const DEFAULT_BASE_URL: &str = "https://world.openfoodfacts.org";
    /// Legacy search endpoint path
    pub const SEARCH_PATH: &str = "/cgi/search.pl";
    /// Product fields requested from the search endpoint
    pub const SEARCH_FIELDS: &str = "code,product_name,brands,nutriments,serving_size";
    /// Identifying user agent required by the Open Food Facts usage policy
    pub const DEFAULT_USER_AGENT: &str = "Habitz CalorieTracker/1.0 (https://github.com/habitz)";
    /// Product lookup returns `status: 1` when the barcode is known
    pub const PRODUCT_FOUND_STATUS: i64 = 1;

    /// Energy nutriment key prefix
    pub const NUTRIMENT_ENERGY_KCAL: &str = "energy-kcal";
    /// Protein nutriment key prefix
    pub const NUTRIMENT_PROTEINS: &str = "proteins";
    /// Carbohydrate nutriment key prefix
    pub const NUTRIMENT_CARBOHYDRATES: &str = "carbohydrates";
    /// Fat nutriment key prefix
    pub const NUTRIMENT_FAT: &str = "fat";
    /// Fiber nutriment key prefix
    pub const NUTRIMENT_FIBER: &str = "fiber";
}

/// Search defaults
pub mod search {
    /// First page number (1-based)
    pub const DEFAULT_PAGE: u32 = 1;
    /// Results requested per provider page
    pub const DEFAULT_PAGE_SIZE: u32 = 10;
}

/// Food item defaults
pub mod food {
    /// Unit assumed when a provider does not report one
    pub const DEFAULT_SERVING_UNIT: &str = "g";
}

/// HTTP client defaults
pub mod http {
    /// Provider request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
    /// Provider connect timeout in seconds
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
}

/// Persistence defaults
pub mod database {
    /// Default `SQLite` database location
    pub const DEFAULT_DATABASE_URL: &str = "sqlite:./data/habitz.db";
}

/// Service names
pub mod service_names {
    /// Service name used in structured logs
    pub const HABITZ_NUTRITION: &str = "habitz-nutrition";
}

/// Environment variable names
pub mod env_vars {
    /// USDA API key
    pub const USDA_API_KEY: &str = "USDA_API_KEY";
    /// USDA base URL override
    pub const USDA_BASE_URL: &str = "USDA_BASE_URL";
    /// Open Food Facts base URL override
    pub const OPENFOODFACTS_BASE_URL: &str = "OPENFOODFACTS_BASE_URL";
    /// Open Food Facts user agent override
    pub const OPENFOODFACTS_USER_AGENT: &str = "OPENFOODFACTS_USER_AGENT";
    /// Provider request timeout
    pub const PROVIDER_TIMEOUT_SECS: &str = "PROVIDER_TIMEOUT_SECS";
    /// Provider connect timeout
    pub const PROVIDER_CONNECT_TIMEOUT_SECS: &str = "PROVIDER_CONNECT_TIMEOUT_SECS";
    /// Database URL
    pub const DATABASE_URL: &str = "DATABASE_URL";
}
