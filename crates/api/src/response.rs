//! Uniform success envelope.
//!
//! Every successful response has the shape
//! `{ "success": true, "message": .., "data": .., "code": 200, "timestamp": .. }`.
//! Errors use the same keys with `success: false`; see [`crate::error`].

use std::collections::BTreeMap;

use admisiones_core::types::Timestamp;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;

/// Success envelope wrapping any serializable payload.
///
/// ```ignore
/// Ok(ApiResponse::ok("Información guardada", row))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: T,
    pub code: u16,
    pub timestamp: Timestamp,
    #[serde(skip)]
    status: StatusCode,
}

impl<T: Serialize> ApiResponse<T> {
    fn with_status(status: StatusCode, message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            code: status.as_u16(),
            timestamp: Utc::now(),
            status,
        }
    }

    /// 200 OK.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, data)
    }

    /// 201 Created.
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, data)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

/// A page of rows plus the total matching count.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// A persisted record plus any warning-level validation messages.
#[derive(Debug, Serialize)]
pub struct Saved<T: Serialize> {
    #[serde(flatten)]
    pub record: T,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub warnings: BTreeMap<String, String>,
}
