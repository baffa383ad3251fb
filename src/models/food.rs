// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nutritional estimate returned by food-photo analysis.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Totals may differ from the per-item sums by this much before we log it.
const TOTALS_TOLERANCE: f64 = 1.0;

/// A single food identified in the photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FoodItem {
    #[serde(default, deserialize_with = "loose_text")]
    pub name: String,
    /// Free text, e.g. "1 cup" or "150g"
    #[serde(default, deserialize_with = "loose_text")]
    pub quantity: String,
    #[serde(default, deserialize_with = "loose_number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "loose_number")]
    pub protein: f64,
    #[serde(default, deserialize_with = "loose_number")]
    pub carbs: f64,
    #[serde(default, deserialize_with = "loose_number")]
    pub fat: f64,
}

/// Structured estimate for one meal photo.
///
/// The reported totals come straight from the model and are not forced to
/// match the per-item values. Decoding is lenient: the model's JSON is not
/// schema-checked, so absent or null numbers read as 0 and a numeric
/// `quantity` is kept as text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FoodAnalysisResult {
    #[serde(default, deserialize_with = "loose_foods")]
    pub foods: Vec<FoodItem>,
    #[serde(default, deserialize_with = "loose_number")]
    pub total_calories: f64,
    #[serde(default, deserialize_with = "loose_number")]
    pub total_protein: f64,
    #[serde(default, deserialize_with = "loose_number")]
    pub total_carbs: f64,
    #[serde(default, deserialize_with = "loose_number")]
    pub total_fat: f64,
    /// Expected in [0, 1], not validated
    #[serde(default, deserialize_with = "loose_number")]
    pub confidence: f64,
}

fn loose_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s.trim().parse().unwrap_or_default(),
        _ => 0.0,
    })
}

fn loose_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// Non-array `foods` reads as empty; entries that are not objects are skipped.
fn loose_foods<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<FoodItem>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| FoodItem::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

/// Calorie and macro totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl NutritionTotals {
    pub fn add(&mut self, calories: f64, protein: f64, carbs: f64, fat: f64) {
        self.calories += calories;
        self.protein += protein;
        self.carbs += carbs;
        self.fat += fat;
    }

    /// Fields whose values differ by more than `tolerance`.
    pub fn differing_fields(&self, other: &NutritionTotals, tolerance: f64) -> Vec<&'static str> {
        [
            ("calories", self.calories, other.calories),
            ("protein", self.protein, other.protein),
            ("carbs", self.carbs, other.carbs),
            ("fat", self.fat, other.fat),
        ]
        .into_iter()
        .filter(|(_, a, b)| (a - b).abs() > tolerance)
        .map(|(name, _, _)| name)
        .collect()
    }
}

impl FoodAnalysisResult {
    /// Typed view of a model reply. `None` when the reply is not a JSON object.
    pub fn from_reply(reply: &Value) -> Option<Self> {
        if !reply.is_object() {
            return None;
        }
        Self::deserialize(reply).ok()
    }

    /// Totals as reported by the model.
    pub fn reported_totals(&self) -> NutritionTotals {
        NutritionTotals {
            calories: self.total_calories,
            protein: self.total_protein,
            carbs: self.total_carbs,
            fat: self.total_fat,
        }
    }

    /// Totals recomputed from the individual foods.
    pub fn summed_totals(&self) -> NutritionTotals {
        let mut totals = NutritionTotals::default();
        for food in &self.foods {
            totals.add(food.calories, food.protein, food.carbs, food.fat);
        }
        totals
    }

    /// Names of totals that disagree with the per-item sums.
    pub fn inconsistent_totals(&self) -> Vec<&'static str> {
        self.reported_totals()
            .differing_fields(&self.summed_totals(), TOTALS_TOLERANCE)
    }
}
