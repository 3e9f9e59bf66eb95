// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! API error response
//!

use crate::helpers::ErrorMsg;
use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use log::error;
use timeline_calendar_core::RangeError;
use timeline_calendar_store::StoreError;

/// Container for API errors.  Can be sent back to the client
pub struct ApiError(pub (StatusCode, Json<ErrorMsg>));

impl ApiError {
    pub fn new(status: StatusCode, error_msg: impl Into<String>) -> Self {
        ApiError((
            status,
            Json(ErrorMsg {
                error_msg: error_msg.into(),
            }),
        ))
    }

    pub fn status(&self) -> StatusCode {
        self.0.0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(value: sqlx::Error) -> Self {
        let value: StoreError = value.into();
        value.into()
    }
}

impl From<StoreError> for ApiError {
    fn from(value: StoreError) -> Self {
        error!("Store error: {value}");
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, value.to_string())
    }
}

impl From<RangeError> for ApiError {
    fn from(value: RangeError) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, value.to_string())
    }
}

/// Missing or invalid query parameters
impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, value.body_text())
    }
}
