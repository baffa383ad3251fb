// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog and food diary routes.

use crate::error::{AppError, Result};
use crate::models::{Challenge, DailyTotals, Meal, ModuleInfo, Recipe, DEFAULT_CALORIE_GOAL};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/recipes", get(list_recipes))
        .route("/api/challenges", get(list_challenges))
        .route("/api/modules", get(list_modules))
        .route("/api/diary/totals", post(diary_totals))
}

async fn list_recipes(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Recipe>>> {
    Ok(Json(state.content.recipes().await?))
}

async fn list_challenges(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Challenge>>> {
    Ok(Json(state.content.challenges().await?))
}

async fn list_modules(State(state): State<Arc<AppState>>) -> Result<Json<Vec<ModuleInfo>>> {
    Ok(Json(state.content.modules().await?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DiaryTotalsRequest {
    meals: Vec<Meal>,
    #[serde(default)]
    calorie_goal: Option<f64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DiaryTotalsResponse {
    #[serde(flatten)]
    daily: DailyTotals,
    calorie_goal: f64,
    /// Percent of the goal reached, capped at 100
    goal_progress: f64,
}

/// Sum a day's meals. The diary itself lives on the client.
async fn diary_totals(body: Bytes) -> Result<Json<DiaryTotalsResponse>> {
    let request: DiaryTotalsRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::Validation(format!("invalid JSON body: {}", e)))?;

    let calorie_goal = request
        .calorie_goal
        .filter(|goal| *goal > 0.0)
        .unwrap_or(DEFAULT_CALORIE_GOAL);
    let daily = DailyTotals::from_meals(&request.meals);

    Ok(Json(DiaryTotalsResponse {
        daily,
        calorie_goal,
        goal_progress: daily.goal_progress(calorie_goal),
    }))
}
