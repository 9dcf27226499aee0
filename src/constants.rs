// ABOUTME: Provider endpoints, nutrient ids and configuration defaults re-exported from habitz-core
// ABOUTME: Grouped by domain (usda, openfoodfacts, search, http, database, env_vars)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use habitz_core::constants::*;
