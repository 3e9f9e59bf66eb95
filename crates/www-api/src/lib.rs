// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the Timeline Calendar project*
//!
//! This crate provides the read-only web API that the calendar widgets fetch
//! from: the articles of a month, per-month counts over a range of years, the
//! years that have articles, the calendar settings, and "this day in
//! history".
//!

mod error;
mod handlers;
mod helpers;
mod queries;

pub use error::*;
pub use helpers::*;
pub use queries::*;

use axum::Router;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::{str::FromStr, sync::Arc};
use timeline_calendar_core::YearPolicy;
use tower_http::trace::TraceLayer;

/// Open the database (read-only) and build the API router
pub async fn prepare_api_router(db_url: &str, policy: YearPolicy) -> Result<Router, sqlx::Error> {
    let connect_options = SqliteConnectOptions::from_str(db_url)?.read_only(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(connect_options)
        .await?;

    Ok(api_router(pool, policy))
}

/// The API router, with all routes under `/api/v1`
pub fn api_router(pool: Pool<Sqlite>, policy: YearPolicy) -> Router {
    let apiv1 = handlers::router().with_state(Arc::new(ApiState { pool, policy }));
    Router::new()
        .nest("/api/v1", apiv1)
        .layer(TraceLayer::new_for_http())
}
