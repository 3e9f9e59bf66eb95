// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Create, open & migrate SQLite database files for the article store
//!

use crate::StoreError;
use log::info;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Sqlite, SqlitePool, migrate::MigrateDatabase};
use std::path::Path;

/// Setup a database at the supplied path (ensure the file exists and run the
/// migrations)
pub async fn setup_database_at_path(path: &Path) -> Result<(), StoreError> {
    let db_url = db_url_from_path(path);

    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Create the database file (if not already extant)
    if !Sqlite::database_exists(&db_url).await.unwrap_or(false) {
        info!("Creating database at {}", path.to_string_lossy());
        Sqlite::create_database(&db_url).await?;
    } else {
        info!("Database already exists at {}", path.to_string_lossy());
    }

    let pool = SqlitePool::connect(&db_url).await?;
    migrate(&pool).await?;
    info!(
        "Migrations applied successfully to {}",
        path.to_string_lossy()
    );

    Ok(())
}

/// Open an existing database, applying any outstanding migrations
pub async fn open_database_at_path(path: &Path) -> Result<SqlitePool, StoreError> {
    let pool = SqlitePool::connect(&db_url_from_path(path)).await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// A fresh, migrated in-memory database.  Everything is lost when the pool
/// is dropped.
pub async fn in_memory_database() -> Result<SqlitePool, StoreError> {
    // A single connection, otherwise each connection gets its own database
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Run the migrations (embedded at compile time)
pub async fn migrate(pool: &SqlitePool) -> Result<(), StoreError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Create a URL for the SQLite database using the path to the database
pub fn db_url_from_path(path: &Path) -> String {
    format!("sqlite://{}", path.to_string_lossy())
}
