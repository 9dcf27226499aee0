// ABOUTME: Error types re-exported from habitz-core
// ABOUTME: AppError, ErrorCode, ProviderError and DatabaseError for the whole crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use habitz_core::errors::*;
