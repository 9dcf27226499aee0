// ABOUTME: Core types and constants for Habitz food nutrition aggregation
// ABOUTME: Foundation crate with error handling, food models, and provider constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Habitz Core
//!
//! Foundation crate providing shared types and constants for the Habitz
//! nutrition aggregation layer. This crate is designed to change infrequently,
//! enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and domain-specific errors
//! - **constants**: Provider endpoints, nutrient identifiers, and configuration defaults
//! - **models**: Normalized search results and persisted food items

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core food data models (normalized results, persisted items, upsert input)
pub mod models;
