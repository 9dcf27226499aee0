// ABOUTME: Configuration management module for provider and storage settings
// ABOUTME: Re-exports the environment-driven NutritionConfig
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All settings come from the process environment; see [`environment`].

/// Environment and provider configuration
pub mod environment;

pub use environment::{
    DatabaseUrl, HttpClientConfig, NutritionConfig, OpenFoodFactsConfig, UsdaConfig,
};
