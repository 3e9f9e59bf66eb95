// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Generic helpers
//!

use crate::ApiError;
use serde::Serialize;
use sqlx::{Pool, Sqlite, Transaction};
use timeline_calendar_core::YearPolicy;

#[derive(Serialize)]
pub struct ErrorMsg {
    pub error_msg: String,
}

/// Shared by every handler
#[derive(Debug, Clone)]
pub struct ApiState {
    pub pool: Pool<Sqlite>,
    pub policy: YearPolicy,
}

impl ApiState {
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>, ApiError> {
        Ok(self.pool.begin().await?)
    }
}
