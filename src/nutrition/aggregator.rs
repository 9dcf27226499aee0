// ABOUTME: Multi-provider food search that tolerates individual provider failures
// ABOUTME: Queries providers in order and concatenates the successful result lists
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::search::DEFAULT_PAGE_SIZE;
use crate::errors::ProviderError;
use crate::external::FoodDataProvider;
use crate::models::{FoodSource, NormalizedFoodResult};
use std::sync::Arc;
use tracing::{debug, warn};

/// What one provider contributed to a search
#[derive(Debug)]
pub enum ProviderOutcome {
    /// Provider answered (possibly with an empty list)
    Success {
        /// Provider that answered
        source: FoodSource,
        /// Normalized results in provider order
        results: Vec<NormalizedFoodResult>,
    },
    /// Provider failed and contributes nothing
    Failed {
        /// Provider that failed
        source: FoodSource,
        /// Why it failed
        error: ProviderError,
    },
}

impl ProviderOutcome {
    /// Wrap a provider call result
    #[must_use]
    pub fn from_result(
        source: FoodSource,
        result: Result<Vec<NormalizedFoodResult>, ProviderError>,
    ) -> Self {
        match result {
            Ok(results) => Self::Success { source, results },
            Err(error) => Self::Failed { source, error },
        }
    }

    /// Provider this outcome belongs to
    #[must_use]
    pub const fn source(&self) -> FoodSource {
        match self {
            Self::Success { source, .. } | Self::Failed { source, .. } => *source,
        }
    }

    /// Whether the provider answered
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Concatenate successful outcomes in order, logging the failed ones
#[must_use]
pub fn merge_outcomes(outcomes: Vec<ProviderOutcome>) -> Vec<NormalizedFoodResult> {
    let mut merged = Vec::new();
    for outcome in outcomes {
        match outcome {
            ProviderOutcome::Success { results, .. } => merged.extend(results),
            ProviderOutcome::Failed { source, error } => {
                warn!(
                    %source,
                    retryable = error.is_retryable(),
                    error = %error,
                    "Food provider search failed, continuing without it"
                );
            }
        }
    }
    merged
}

/// Ordered set of providers searched together
#[derive(Clone)]
pub struct FoodSearchAggregator {
    providers: Vec<Arc<dyn FoodDataProvider>>,
}

impl FoodSearchAggregator {
    /// Create an aggregator over `providers`, queried in the given order
    #[must_use]
    pub fn new(providers: Vec<Arc<dyn FoodDataProvider>>) -> Self {
        Self { providers }
    }

    /// Number of configured providers
    #[must_use]
    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Query every provider one after another and record each outcome
    pub async fn collect_outcomes(
        &self,
        query: &str,
        page: u32,
        page_size: u32,
    ) -> Vec<ProviderOutcome> {
        let mut outcomes = Vec::with_capacity(self.providers.len());
        for provider in &self.providers {
            let result = provider.search(query, page, page_size).await;
            outcomes.push(ProviderOutcome::from_result(provider.source(), result));
        }
        outcomes
    }

    /// Search all providers for `query`, ten results per provider
    ///
    /// Results keep provider order, then each provider's own order. A failing
    /// provider is skipped; if all fail the result is empty.
    pub async fn search_foods(&self, query: &str, page: u32) -> Vec<NormalizedFoodResult> {
        let outcomes = self.collect_outcomes(query, page, DEFAULT_PAGE_SIZE).await;
        let answered = outcomes.iter().filter(|o| o.is_success()).count();
        let results = merge_outcomes(outcomes);

        debug!(
            query,
            page,
            providers = self.providers.len(),
            answered,
            count = results.len(),
            "Aggregated food search completed"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_order_and_skips_failures() {
        let outcomes = vec![
            ProviderOutcome::from_result(
                FoodSource::Usda,
                Ok(vec![NormalizedFoodResult::new("Rice", FoodSource::Usda, "1")]),
            ),
            ProviderOutcome::from_result(
                FoodSource::OpenFoodFacts,
                Err(ProviderError::NetworkError("connection reset".to_owned())),
            ),
            ProviderOutcome::from_result(
                FoodSource::Custom,
                Ok(vec![
                    NormalizedFoodResult::new("Beans", FoodSource::Custom, "b"),
                    NormalizedFoodResult::new("Corn", FoodSource::Custom, "c"),
                ]),
            ),
        ];

        assert!(!outcomes[1].is_success());
        assert_eq!(outcomes[1].source(), FoodSource::OpenFoodFacts);

        let names: Vec<String> = merge_outcomes(outcomes)
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["Rice", "Beans", "Corn"]);
    }

    #[test]
    fn test_merge_of_only_failures_is_empty() {
        let outcomes = vec![ProviderOutcome::from_result(
            FoodSource::Usda,
            Err(ProviderError::NetworkError("timed out".to_owned())),
        )];
        assert!(merge_outcomes(outcomes).is_empty());
    }
}
