// ABOUTME: SQLite database management for the food item cache
// ABOUTME: Owns the connection pool and idempotent schema migrations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Persistent storage for normalized food items. Rows are only ever inserted;
//! the cache never updates or deletes what it has stored.

mod food_items;

/// Repository traits over the database
pub mod repositories;

/// Helpers for creating isolated in-memory databases
pub mod test_utils;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

/// Database manager for the food item cache
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Open (creating if needed) the database and run migrations
    ///
    /// In-memory databases are pinned to a single connection so every query
    /// sees the same schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the database directory cannot be created, the pool
    /// cannot connect, or a migration fails
    pub async fn new(database_url: &str) -> AppResult<Self> {
        let url = DatabaseUrl::parse_url(database_url);

        let pool = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&url.to_connection_string())
                .await
        } else {
            if let DatabaseUrl::SQLite { path } = &url {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
            // Ensure SQLite creates the database file if it doesn't exist
            SqlitePoolOptions::new()
                .connect(&format!("{}?mode=rwc", url.to_connection_string()))
                .await
        }
        .map_err(|e| AppError::database(format!("Failed to connect to {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;

        info!(database = %url, "Food item database ready");
        Ok(db)
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if a schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_food_items().await?;
        debug!("Database migrations applied");
        Ok(())
    }

    async fn migrate_food_items(&self) -> AppResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_items (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                brand TEXT,
                source TEXT NOT NULL DEFAULT 'custom',
                source_id TEXT,
                calories REAL NOT NULL DEFAULT 0,
                protein_g REAL NOT NULL DEFAULT 0,
                carbs_g REAL NOT NULL DEFAULT 0,
                fat_g REAL NOT NULL DEFAULT 0,
                fiber_g REAL,
                serving_size TEXT,
                serving_weight_g REAL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create food_items table: {e}")))?;

        // One row per external id; custom entries without an id are exempt
        sqlx::query(
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_food_items_source_ref
            ON food_items(source, source_id)
            WHERE source_id IS NOT NULL AND source_id <> ''
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create source index: {e}")))?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_food_items_name ON food_items(name)")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to create name index: {e}")))?;

        Ok(())
    }
}
