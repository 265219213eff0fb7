//! API route handlers
//!
//! This module contains all HTTP endpoint implementations for the drawing
//! server. Routes are organized by functionality:
//!
//! - `health`: Health checks and API info
//! - `draw`: The overlay-drawing endpoint and docs redirect

pub mod draw;
pub mod health;

use crate::error::{ServerError, ServerResult};
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

/// API version and base info
///
/// Returns server information including version and available endpoints.
/// This is the root endpoint (GET /) and requires no authentication.
pub async fn api_info() -> ServerResult<impl IntoResponse> {
    Ok(Json(json!({
        "name": "Imprint Drawing Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": [
            "/drawing/draw",
            "/docs",
            "/health"
        ]
    })))
}

/// 404 Not Found handler
///
/// Returns a standardized error response for undefined routes.
pub async fn not_found() -> ServerError {
    ServerError::NotFound
}
