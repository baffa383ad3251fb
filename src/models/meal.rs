// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food diary entries and daily aggregation.

use super::food::NutritionTotals;
use serde::{Deserialize, Serialize};

/// Daily calorie target used when the client does not send one.
pub const DEFAULT_CALORIE_GOAL: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

/// One logged meal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Meal {
    pub name: String,
    #[serde(rename = "type")]
    pub meal_type: MealType,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    #[serde(default)]
    pub is_ai_analyzed: bool,
}

/// Totals for a day of meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub totals: NutritionTotals,
    pub meal_count: usize,
}

impl DailyTotals {
    pub fn from_meals<'a>(meals: impl IntoIterator<Item = &'a Meal>) -> Self {
        let mut daily = DailyTotals::default();
        for meal in meals {
            daily
                .totals
                .add(meal.calories, meal.protein, meal.carbs, meal.fat);
            daily.meal_count += 1;
        }
        daily
    }

    /// Percentage of `goal` calories consumed, capped at 100.
    pub fn goal_progress(&self, goal: f64) -> f64 {
        if goal <= 0.0 {
            return 0.0;
        }
        (self.totals.calories * 100.0 / goal).min(100.0)
    }
}
