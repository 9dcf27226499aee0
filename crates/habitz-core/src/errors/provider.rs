// ABOUTME: Error type for the external nutrition provider adapters
// ABOUTME: Distinguishes transport failures from malformed payloads
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised while talking to an external nutrition provider
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Connection, TLS or timeout failure
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response body could not be decoded
    #[error("{provider} returned malformed {field}: {source}")]
    ParseError {
        /// Provider name
        provider: String,
        /// Payload being decoded
        field: &'static str,
        /// Underlying decode error
        source: serde_json::Error,
    },
}

impl ProviderError {
    /// Whether retrying the same request could plausibly succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::NetworkError(_))
    }
}

#[cfg(feature = "provider-errors")]
impl From<reqwest::Error> for ProviderError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::NetworkError(format!("request timed out: {error}"))
        } else {
            Self::NetworkError(error.to_string())
        }
    }
}
