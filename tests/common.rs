// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides logging, in-memory database, and mock-provider configuration helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `habitz_nutrition`

use anyhow::Result;
use habitz_nutrition::config::{HttpClientConfig, OpenFoodFactsConfig, UsdaConfig};
use habitz_nutrition::constants::openfoodfacts::DEFAULT_USER_AGENT;
use habitz_nutrition::database::test_utils::create_test_db;
use habitz_nutrition::database::Database;
use habitz_nutrition::external::{build_http_client, OpenFoodFactsClient, UsdaClient};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            Ok("WARN" | "ERROR") | _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    Ok(create_test_db().await?)
}

/// HTTP settings with a short timeout so hanging mocks fail fast
pub fn test_http_config() -> HttpClientConfig {
    HttpClientConfig {
        timeout_secs: 1,
        connect_timeout_secs: 1,
    }
}

/// USDA client pointed at a mock server
pub fn usda_client(base_url: &str, api_key: Option<&str>) -> UsdaClient {
    UsdaClient::new(
        UsdaConfig {
            api_key: api_key.map(str::to_owned),
            base_url: base_url.to_owned(),
        },
        build_http_client(&test_http_config()),
    )
}

/// Open Food Facts client pointed at a mock server
pub fn openfoodfacts_client(base_url: &str) -> OpenFoodFactsClient {
    OpenFoodFactsClient::new(
        OpenFoodFactsConfig {
            base_url: base_url.to_owned(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        },
        build_http_client(&test_http_config()),
    )
}
