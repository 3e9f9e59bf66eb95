// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Web API for the years that have articles
//!

use crate::{ApiError, ApiState};
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use timeline_calendar_store::fetch_distinct_years;

/// Handle a request for the distinct years, as strings in numeric order
pub async fn handle_get_years(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<String>>, ApiError> {
    let mut transaction = state.begin().await?;
    let years = fetch_distinct_years(&mut transaction).await?;
    Ok(Json(years.iter().map(ToString::to_string).collect()))
}
