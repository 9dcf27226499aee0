// ABOUTME: Provider abstraction implemented by every external nutrition data source
// ABOUTME: Lets the aggregator query USDA, Open Food Facts or test doubles uniformly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ProviderError;
use crate::models::{FoodSource, NormalizedFoodResult};
use async_trait::async_trait;

/// External nutrition source that can be searched by free text
#[async_trait]
pub trait FoodDataProvider: Send + Sync {
    /// Source tag attached to every result this provider produces
    fn source(&self) -> FoodSource;

    /// Search one page of results
    ///
    /// Implementations degrade to an empty list for missing configuration and
    /// non-success HTTP statuses.
    ///
    /// # Errors
    ///
    /// Returns an error for transport failures, timeouts and malformed bodies
    async fn search(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<NormalizedFoodResult>, ProviderError>;
}
