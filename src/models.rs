// ABOUTME: Food data models re-exported from habitz-core
// ABOUTME: NormalizedFoodResult, FoodItem, FoodItemData, FoodSource and ServingSize
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use habitz_core::models::*;
