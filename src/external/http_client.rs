// ABOUTME: HTTP client construction for nutrition provider API calls
// ABOUTME: Applies the configured request and connect timeouts to a pooled reqwest client
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::HttpClientConfig;
use reqwest::{Client, ClientBuilder};
use tracing::warn;

/// Build the pooled client shared by both provider adapters
///
/// Falls back to a client without timeouts only if the TLS backend cannot be
/// initialized, which `reqwest` reports as a builder error.
#[must_use]
pub fn build_http_client(config: &HttpClientConfig) -> Client {
    ClientBuilder::new()
        .timeout(config.timeout())
        .connect_timeout(config.connect_timeout())
        .build()
        .unwrap_or_else(|e| {
            warn!("Failed to build configured HTTP client, using defaults: {e}");
            Client::new()
        })
}
