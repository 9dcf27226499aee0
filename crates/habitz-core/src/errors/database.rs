// ABOUTME: Structured error types for food item storage operations
// ABOUTME: Provides domain-specific errors with context for better error handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Query failed to execute
    #[error("Database query failed: {context}")]
    QueryError {
        /// What was being attempted
        context: String,
    },

    /// Pool could not be created or a connection was lost
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// Uniqueness or other constraint rejected the write
    #[error("Constraint violation on {table}: {details}")]
    ConstraintViolation {
        /// Table that rejected the write
        table: &'static str,
        /// Driver message
        details: String,
    },

    /// Row lookup by identity found nothing
    #[error("{entity_type} {entity_id} not found")]
    NotFound {
        /// Kind of row
        entity_type: &'static str,
        /// Identity that was looked up
        entity_id: String,
    },

    /// Stored value could not be decoded
    #[error("Failed to decode stored value: {0}")]
    SerializationError(String),
}

#[cfg(feature = "database-errors")]
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => Self::NotFound {
                entity_type: "row",
                entity_id: "unknown".to_owned(),
            },
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Self::ConnectionError(error.to_string())
            }
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                Self::SerializationError(error.to_string())
            }
            sqlx::Error::Database(ref db_error) if db_error.is_unique_violation() => {
                Self::ConstraintViolation {
                    table: "food_items",
                    details: db_error.message().to_owned(),
                }
            }
            other => Self::QueryError {
                context: other.to_string(),
            },
        }
    }
}
