// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Read-only catalog content: recipes, challenges and app modules.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A recipe in the meal plan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    /// Minutes
    pub prep_time: u32,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub image_url: String,
    pub is_premium: bool,
}

/// A gamified challenge. Progress is tracked on the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Challenge {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Days
    pub duration: u32,
    pub points: u32,
    pub icon: String,
}

/// Feature modules shown on the home grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ModuleKind {
    MealPlanBasic,
    FoodDiary,
    Challenges,
    MealPlanAdvanced,
    Workouts,
    AiAnalysis,
    Community,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 7] = [
        ModuleKind::MealPlanBasic,
        ModuleKind::FoodDiary,
        ModuleKind::Challenges,
        ModuleKind::MealPlanAdvanced,
        ModuleKind::Workouts,
        ModuleKind::AiAnalysis,
        ModuleKind::Community,
    ];

    /// Whether the module sits behind the subscription paywall.
    pub fn is_premium(self) -> bool {
        matches!(
            self,
            ModuleKind::MealPlanAdvanced
                | ModuleKind::Workouts
                | ModuleKind::AiAnalysis
                | ModuleKind::Community
        )
    }
}

/// Module entry returned to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ModuleInfo {
    pub kind: ModuleKind,
    pub title: String,
    pub description: String,
    pub is_premium: bool,
}
