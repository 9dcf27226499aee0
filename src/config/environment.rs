// ABOUTME: Environment configuration for provider credentials, endpoints and storage
// ABOUTME: Parses environment variables into a typed NutritionConfig with defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use crate::constants::{database, env_vars, http, openfoodfacts, usda};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Type-safe database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string; anything without the `sqlite:` scheme is treated as a file path
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::parse_url(database::DEFAULT_DATABASE_URL)
    }
}

impl std::fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// USDA `FoodData` Central settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsdaConfig {
    /// API key; searches return nothing without one
    pub api_key: Option<String>,
    /// API base URL
    pub base_url: String,
}

impl Default for UsdaConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: usda::DEFAULT_BASE_URL.to_owned(),
        }
    }
}

/// Open Food Facts settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenFoodFactsConfig {
    /// Site base URL
    pub base_url: String,
    /// Identifying user agent sent with every request
    pub user_agent: String,
}

impl Default for OpenFoodFactsConfig {
    fn default() -> Self {
        Self {
            base_url: openfoodfacts::DEFAULT_BASE_URL.to_owned(),
            user_agent: openfoodfacts::DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Outbound HTTP settings shared by both providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Whole-request timeout in seconds
    pub timeout_secs: u64,
    /// Connect timeout in seconds
    pub connect_timeout_secs: u64,
}

impl HttpClientConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout as a `Duration`
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: http::DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: http::DEFAULT_CONNECT_TIMEOUT_SECS,
        }
    }
}

/// Complete configuration for the nutrition layer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// USDA settings
    pub usda: UsdaConfig,
    /// Open Food Facts settings
    pub openfoodfacts: OpenFoodFactsConfig,
    /// HTTP client settings
    pub http: HttpClientConfig,
    /// Food item cache location
    pub database_url: DatabaseUrl,
}

impl NutritionConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading nutrition configuration from environment variables");

        let config = Self {
            usda: UsdaConfig {
                api_key: env::var(env_vars::USDA_API_KEY)
                    .ok()
                    .filter(|key| !key.trim().is_empty()),
                base_url: env_var_or(env_vars::USDA_BASE_URL, usda::DEFAULT_BASE_URL),
            },
            openfoodfacts: OpenFoodFactsConfig {
                base_url: env_var_or(
                    env_vars::OPENFOODFACTS_BASE_URL,
                    openfoodfacts::DEFAULT_BASE_URL,
                ),
                user_agent: env_var_or(
                    env_vars::OPENFOODFACTS_USER_AGENT,
                    openfoodfacts::DEFAULT_USER_AGENT,
                ),
            },
            http: HttpClientConfig {
                timeout_secs: env_var_or(
                    env_vars::PROVIDER_TIMEOUT_SECS,
                    &http::DEFAULT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid PROVIDER_TIMEOUT_SECS value")?,
                connect_timeout_secs: env_var_or(
                    env_vars::PROVIDER_CONNECT_TIMEOUT_SECS,
                    &http::DEFAULT_CONNECT_TIMEOUT_SECS.to_string(),
                )
                .parse()
                .context("Invalid PROVIDER_CONNECT_TIMEOUT_SECS value")?,
            },
            database_url: DatabaseUrl::parse_url(&env_var_or(
                env_vars::DATABASE_URL,
                database::DEFAULT_DATABASE_URL,
            )),
        };

        debug!(
            usda_configured = config.usda.api_key.is_some(),
            usda_base_url = %config.usda.base_url,
            openfoodfacts_base_url = %config.openfoodfacts.base_url,
            timeout_secs = config.http.timeout_secs,
            database = %config.database_url,
            "Nutrition configuration loaded"
        );

        Ok(config)
    }

    /// Whether USDA searches can run
    #[must_use]
    pub const fn has_usda_api_key(&self) -> bool {
        self.usda.api_key.is_some()
    }
}

/// Read an environment variable, falling back to `default` when unset
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_url_parsing() {
        assert_eq!(DatabaseUrl::parse_url("sqlite::memory:"), DatabaseUrl::Memory);
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/foods.db"),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/foods.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("/var/lib/habitz/foods.db").to_connection_string(),
            "sqlite:/var/lib/habitz/foods.db"
        );
    }

    #[test]
    fn test_defaults() {
        let config = NutritionConfig::default();
        assert!(!config.has_usda_api_key());
        assert_eq!(config.http.timeout(), Duration::from_secs(10));
        assert_eq!(config.usda.base_url, "https://api.nal.usda.gov/fdc/v1");
        assert!(!config.database_url.is_memory());
    }
}
