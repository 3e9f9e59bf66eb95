// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! Web API for the calendar settings
//!

use crate::ApiState;
use axum::Json;
use axum::extract::State;
use std::sync::Arc;
use timeline_calendar_core::YearPolicy;

/// Handle a request for the year policy the server was started with
pub async fn handle_get_settings(State(state): State<Arc<ApiState>>) -> Json<YearPolicy> {
    Json(state.policy)
}
