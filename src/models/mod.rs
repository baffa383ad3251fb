// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod checkout;
pub mod content;
pub mod event;
pub mod food;
pub mod meal;

pub use checkout::{CheckoutRequest, CheckoutSession, CheckoutSessionParams};
pub use content::{Challenge, ModuleInfo, ModuleKind, Recipe};
pub use event::{SubscriptionEvent, WebhookEvent};
pub use food::{FoodAnalysisResult, FoodItem, NutritionTotals};
pub use meal::{DailyTotals, Meal, MealType, DEFAULT_CALORIE_GOAL};
