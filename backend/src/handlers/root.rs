// src/handlers/root.rs

use axum::{Json, http::Uri, response::IntoResponse};
use serde_json::json;

use crate::error::AppError;

/// API health check.
pub async fn welcome() -> impl IntoResponse {
    Json(json!({ "message": "Welcome to Skyview School API" }))
}

/// Fallback for unmatched routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("Not Found - {}", uri.path()))
}
