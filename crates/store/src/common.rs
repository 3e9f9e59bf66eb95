// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Store traits and errors
//!

use sqlx::{Sqlite, Transaction};
use thiserror::Error;
use timeline_calendar_core::{DateError, RangeError};

/// Alias of u64
pub type RowsAffected = u64;

/// Implementing types can be fetched using their ID
#[allow(async_fn_in_trait)]
pub trait FetchById: Sized {
    /// Fetch the thing using its ID
    async fn fetch_by_id(
        transaction: &mut Transaction<'_, Sqlite>,
        id: i64,
    ) -> Result<Self, StoreError>;
}

/// Implementing types can be created in the database
#[allow(async_fn_in_trait)]
pub trait Create {
    /// Create the data in the database
    async fn create(&mut self, transaction: &mut Transaction<'_, Sqlite>)
    -> Result<(), StoreError>;
}

/// All errors that could occur when reading or writing the article store
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Date error: {0}")]
    Date(#[from] DateError),

    #[error("Range error: {0}")]
    Range(#[from] RangeError),

    #[error("The article's slug ('{0}') is already in use")]
    SlugAlreadyInUse(String),

    #[error("The ID is not in the database")]
    IdNotInDb,

    #[error("SQLx database error: {0}")]
    SqlxDbError(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Database migration error: {0}")]
    DbMigrate(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(value: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = value {
            return StoreError::IdNotInDb;
        }
        Self::SqlxDbError(value.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(value: sqlx::migrate::MigrateError) -> Self {
        StoreError::DbMigrate(value.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        StoreError::Io(value.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        StoreError::Json(value.to_string())
    }
}
