// ABOUTME: Core data models for the Habitz nutrition layer
// ABOUTME: Re-exports normalized search results, persisted food items and upsert input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Every provider is translated into [`NormalizedFoodResult`] before it leaves
//! its adapter. Results become durable [`FoodItem`] rows through the upsert,
//! which accepts the looser [`FoodItemData`] shape so callers can hand over
//! either a search result or an arbitrary JSON object.

mod food;

pub use food::{FoodItem, FoodItemData, FoodSource, NormalizedFoodResult, ServingSize};
