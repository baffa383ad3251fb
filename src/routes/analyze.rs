// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food-photo analysis route.

use crate::error::{AppError, Result};
use crate::services::analysis;
use crate::AppState;
use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

/// Photos arrive inline as data URIs, so allow more than axum's default.
const MAX_ANALYZE_BODY_BYTES: usize = 10 * 1024 * 1024;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/analyze-food",
        post(analyze_food).layer(DefaultBodyLimit::max(MAX_ANALYZE_BODY_BYTES)),
    )
}

#[derive(Deserialize)]
struct AnalyzeFoodRequest {
    #[serde(default)]
    image: Option<String>,
}

/// Estimate foods, calories and macros in a meal photo.
///
/// The model's JSON object is returned as parsed.
async fn analyze_food(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>> {
    let request: AnalyzeFoodRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("invalid JSON body: {}", e)))?;

    let image = request
        .image
        .as_deref()
        .map(str::trim)
        .filter(|image| !image.is_empty())
        .ok_or_else(|| AppError::Validation("image is required".to_string()))?;

    analysis::validate_image(image)?;

    let vision = state.vision.as_ref().ok_or_else(|| {
        AppError::Configuration("vision model API key is not set".to_string())
    })?;

    let result = analysis::analyze_image(vision.as_ref(), image).await?;
    Ok(Json(result))
}
