// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Catalog content provider.

use crate::error::AppError;
use crate::models::content::{Challenge, ModuleInfo, ModuleKind, Recipe};
use async_trait::async_trait;

/// Source of read-only catalog content.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn recipes(&self) -> Result<Vec<Recipe>, AppError>;
    async fn challenges(&self) -> Result<Vec<Challenge>, AppError>;
    async fn modules(&self) -> Result<Vec<ModuleInfo>, AppError>;
}

/// Catalog bundled with the binary.
#[derive(Clone)]
pub struct StaticContentProvider {
    recipes: Vec<Recipe>,
    challenges: Vec<Challenge>,
}

impl Default for StaticContentProvider {
    fn default() -> Self {
        Self {
            recipes: sample_recipes(),
            challenges: sample_challenges(),
        }
    }
}

#[async_trait]
impl ContentProvider for StaticContentProvider {
    async fn recipes(&self) -> Result<Vec<Recipe>, AppError> {
        Ok(self.recipes.clone())
    }

    async fn challenges(&self) -> Result<Vec<Challenge>, AppError> {
        Ok(self.challenges.clone())
    }

    async fn modules(&self) -> Result<Vec<ModuleInfo>, AppError> {
        Ok(ModuleKind::ALL
            .iter()
            .map(|&kind| {
                let (title, description) = module_text(kind);
                ModuleInfo {
                    kind,
                    title: title.to_string(),
                    description: description.to_string(),
                    is_premium: kind.is_premium(),
                }
            })
            .collect())
    }
}

fn module_text(kind: ModuleKind) -> (&'static str, &'static str) {
    match kind {
        ModuleKind::MealPlanBasic => ("Basic Meal Plan", "Simple, balanced recipes for every day"),
        ModuleKind::FoodDiary => (
            "Food Diary",
            "Log your meals and track your calorie progress",
        ),
        ModuleKind::Challenges => ("Challenges", "Build healthy habits and earn points"),
        ModuleKind::MealPlanAdvanced => (
            "Advanced Meal Plan",
            "Personalized plans tailored to your goal",
        ),
        ModuleKind::Workouts => ("Workouts", "HIIT, functional, cardio and strength sessions"),
        ModuleKind::AiAnalysis => (
            "AI Photo Analysis",
            "Estimate calories and macros from a photo of your meal",
        ),
        ModuleKind::Community => ("Community", "Share progress and tips with other members"),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn sample_recipes() -> Vec<Recipe> {
    vec![
        Recipe {
            id: "1".to_string(),
            name: "Egg White Omelette with Vegetables".to_string(),
            category: "Breakfast".to_string(),
            calories: 180.0,
            protein: 22.0,
            carbs: 8.0,
            fat: 6.0,
            prep_time: 15,
            ingredients: strings(&[
                "4 egg whites",
                "1 chopped tomato",
                "1/2 chopped onion",
                "Spinach to taste",
                "Salt and pepper",
            ]),
            instructions: strings(&[
                "Lightly beat the egg whites",
                "Sauté the vegetables",
                "Add the egg whites and cook until set",
                "Season and serve",
            ]),
            image_url: "https://images.unsplash.com/photo-1525351484163-7529414344d8?w=400&h=300&fit=crop".to_string(),
            is_premium: false,
        },
        Recipe {
            id: "2".to_string(),
            name: "Quinoa Salad with Chicken".to_string(),
            category: "Lunch".to_string(),
            calories: 420.0,
            protein: 35.0,
            carbs: 42.0,
            fat: 12.0,
            prep_time: 25,
            ingredients: strings(&[
                "150g grilled chicken breast",
                "1 cup cooked quinoa",
                "Lettuce, tomato, cucumber",
                "Olive oil and lemon",
            ]),
            instructions: strings(&[
                "Cook the quinoa",
                "Grill the chicken and dice it",
                "Assemble the salad with the vegetables",
                "Dress with olive oil and lemon",
            ]),
            image_url: "https://images.unsplash.com/photo-1546069901-ba9599a7e63c?w=400&h=300&fit=crop".to_string(),
            is_premium: false,
        },
        Recipe {
            id: "3".to_string(),
            name: "Salmon with Sweet Potato".to_string(),
            category: "Dinner".to_string(),
            calories: 480.0,
            protein: 38.0,
            carbs: 35.0,
            fat: 18.0,
            prep_time: 30,
            ingredients: strings(&[
                "180g salmon",
                "200g sweet potato",
                "Steamed broccoli",
                "Fine herbs",
            ]),
            instructions: strings(&[
                "Roast the diced sweet potato",
                "Grill the salmon with herbs",
                "Steam the broccoli",
                "Plate and serve",
            ]),
            image_url: "https://images.unsplash.com/photo-1467003909585-2f8a72700288?w=400&h=300&fit=crop".to_string(),
            is_premium: false,
        },
    ]
}

fn challenge(id: &str, title: &str, description: &str, duration: u32, points: u32, icon: &str) -> Challenge {
    Challenge {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        duration,
        points,
        icon: icon.to_string(),
    }
}

fn sample_challenges() -> Vec<Challenge> {
    vec![
        challenge("1", "Daily Hydration", "Drink 2 liters of water a day for 7 days", 7, 50, "Droplets"),
        challenge("2", "Zero Sugar", "Avoid refined sugar for 3 days in a row", 3, 30, "Candy"),
        challenge("3", "Morning Walk", "Walk 30 minutes every morning for 5 days", 5, 40, "Footprints"),
        challenge("4", "Mindful Eating", "Log every meal for 7 days", 7, 60, "BookOpen"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_catalog() {
        let provider = StaticContentProvider::default();

        let recipes = provider.recipes().await.unwrap();
        assert_eq!(recipes.len(), 3);
        assert!(recipes.iter().all(|r| !r.ingredients.is_empty()));

        let challenges = provider.challenges().await.unwrap();
        assert_eq!(challenges.len(), 4);
        assert_eq!(challenges.iter().map(|c| c.points).sum::<u32>(), 180);
    }

    #[tokio::test]
    async fn test_modules_mark_premium() {
        let modules = StaticContentProvider::default().modules().await.unwrap();
        assert_eq!(modules.len(), ModuleKind::ALL.len());

        let ai = modules
            .iter()
            .find(|m| m.kind == ModuleKind::AiAnalysis)
            .unwrap();
        assert!(ai.is_premium);
    }
}
