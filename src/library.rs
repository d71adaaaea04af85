// ABOUTME: Recipe library CRUD with read-time servings scaling
// ABOUTME: Pure search predicates over category, title and ingredient names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Recipe Library
//!
//! CRUD over the recipe collection, keyed by identifier. Ingredient amounts
//! live at the recipe's servings basis; [`scale`] derives amounts for a
//! different serving count at read time, at full precision. Rounding is a
//! display concern only ([`display_amount`]).

use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{normalize_name, Ingredient, Recipe, RecipeCategory};
use crate::state::AppState;

/// Scale a recipe's ingredients to a requested serving count
///
/// Every amount is multiplied by `requested / servings` and kept at full
/// precision; quantities sent onward to shopping must not lose precision to
/// display rounding. A recipe with a zero servings basis (rejected at upsert,
/// but representable) scales as identity.
#[must_use]
pub fn scale(recipe: &Recipe, requested_servings: u8) -> Vec<Ingredient> {
    if recipe.servings == 0 {
        return recipe.ingredients.clone();
    }
    let factor = f64::from(requested_servings) / f64::from(recipe.servings);
    recipe
        .ingredients
        .iter()
        .map(|ingredient| Ingredient {
            name: ingredient.name.clone(),
            amount: ingredient.amount * factor,
            unit: ingredient.unit.clone(),
        })
        .collect()
}

/// Round an amount to two decimal places for rendering
///
/// Stored and propagated amounts stay at full precision; only the rendered
/// number is rounded.
#[must_use]
pub fn display_amount(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

impl AppState {
    /// Look up a recipe by id
    #[must_use]
    pub fn recipe(&self, recipe_id: Uuid) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == recipe_id)
    }

    /// Insert a recipe, or replace the existing recipe with the same id
    ///
    /// Ingredient names feed the food-portion registry on success.
    ///
    /// # Errors
    ///
    /// Returns a validation error (blank title, no ingredients, zero
    /// servings, negative amount); the library is untouched in that case
    pub fn upsert_recipe(&mut self, recipe: Recipe) -> AppResult<Uuid> {
        recipe.validate()?;

        let entries: Vec<(String, f64, String)> = recipe
            .ingredients
            .iter()
            .map(|i| (i.name.clone(), i.amount, i.unit.clone()))
            .collect();
        let recipe_id = recipe.id;

        match self.recipes.iter_mut().find(|r| r.id == recipe_id) {
            Some(existing) => *existing = recipe,
            None => self.recipes.push(recipe),
        }

        self.persist_recipes()?;
        self.register_foods(entries)?;
        debug!(recipe = %recipe_id, "Upserted recipe");
        Ok(recipe_id)
    }

    /// Remove a recipe from the library
    ///
    /// No cascading delete: past meal-plan entries referencing the recipe are
    /// left as they are.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no recipe has the given id
    pub fn remove_recipe(&mut self, recipe_id: Uuid) -> AppResult<()> {
        let before = self.recipes.len();
        self.recipes.retain(|r| r.id != recipe_id);
        if self.recipes.len() == before {
            return Err(AppError::not_found(format!("recipe {recipe_id}")));
        }
        self.persist_recipes()
    }

    /// Recipes in a category, in library order
    #[must_use]
    pub fn recipes_by_category(&self, category: RecipeCategory) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|r| r.category == category)
            .collect()
    }

    /// Recipes whose title contains the needle, case-insensitively
    #[must_use]
    pub fn recipes_by_title(&self, needle: &str) -> Vec<&Recipe> {
        let needle = normalize_name(needle);
        self.recipes
            .iter()
            .filter(|r| r.title.to_lowercase().contains(&needle))
            .collect()
    }

    /// Recipes using any of the given ingredient names
    ///
    /// A recipe matches when any needle is a case-insensitive substring of
    /// any of its ingredient names.
    #[must_use]
    pub fn recipes_by_ingredients(&self, needles: &[String]) -> Vec<&Recipe> {
        let needles: Vec<String> = needles.iter().map(|n| normalize_name(n)).collect();
        self.recipes
            .iter()
            .filter(|recipe| {
                recipe.ingredients.iter().any(|ingredient| {
                    let name = ingredient.name.to_lowercase();
                    needles.iter().any(|needle| name.contains(needle))
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Store};

    fn memory_state() -> AppState {
        AppState::load(Store::Memory(MemoryStore::new()))
    }

    fn curry() -> Recipe {
        let mut recipe = Recipe::new("Chicken Curry", RecipeCategory::Main);
        recipe.servings = 4;
        recipe.ingredients = vec![
            Ingredient::new("Chicken", 400.0, "g"),
            Ingredient::new("Coconut milk", 200.0, "ml"),
            Ingredient::new("Rice", 250.0, "g"),
        ];
        recipe
    }

    #[test]
    fn scaling_half_and_identity() {
        let recipe = curry();

        let halved = scale(&recipe, 2);
        assert!((halved[0].amount - 200.0).abs() < f64::EPSILON);
        assert!((halved[1].amount - 100.0).abs() < f64::EPSILON);

        let identity = scale(&recipe, 4);
        for (scaled, original) in identity.iter().zip(&recipe.ingredients) {
            assert!((scaled.amount - original.amount).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn scaling_keeps_full_precision() {
        let mut recipe = curry();
        recipe.servings = 3;
        let scaled = scale(&recipe, 1);
        //  400 / 3 is not representable in two decimals; precision survives
        assert!((scaled[0].amount - 400.0 / 3.0).abs() < 1e-9);
        assert!((display_amount(scaled[0].amount) - 133.33).abs() < f64::EPSILON);
    }

    #[test]
    fn upsert_replaces_by_id() {
        let mut state = memory_state();
        let mut recipe = curry();
        let id = state.upsert_recipe(recipe.clone()).unwrap();

        recipe.title = "Green Curry".into();
        state.upsert_recipe(recipe).unwrap();
        assert_eq!(state.recipes().len(), 1);
        assert_eq!(state.recipe(id).unwrap().title, "Green Curry");
    }

    #[test]
    fn upsert_rejects_invalid_without_mutating() {
        let mut state = memory_state();
        let mut bad = curry();
        bad.title = String::new();
        assert!(state.upsert_recipe(bad).is_err());
        assert!(state.recipes().is_empty());
        assert!(state.settings().food_portions.is_empty());
    }

    #[test]
    fn removal_does_not_cascade_into_the_plan() {
        let mut state = memory_state();
        let id = state.upsert_recipe(curry()).unwrap();
        let day = chrono::NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        state
            .set_meal(day, crate::models::MealSlot::Lunch, Some(id))
            .unwrap();

        state.remove_recipe(id).unwrap();
        assert!(state.recipe(id).is_none());
        // the plan entry survives; resolution simply fails now
        assert_eq!(state.meal_plan().len(), 1);
        assert!(state
            .planned_recipe(day, crate::models::MealSlot::Lunch)
            .is_none());
    }

    #[test]
    fn search_predicates_do_not_mutate() {
        let mut state = memory_state();
        state.upsert_recipe(curry()).unwrap();
        let mut salad = Recipe::new("Rice Salad", RecipeCategory::Side);
        salad.ingredients = vec![Ingredient::new("Rice", 150.0, "g")];
        state.upsert_recipe(salad).unwrap();

        assert_eq!(state.recipes_by_category(RecipeCategory::Main).len(), 1);
        assert_eq!(state.recipes_by_title("curry").len(), 1);
        assert_eq!(state.recipes_by_title("RICE").len(), 1);
        assert_eq!(
            state
                .recipes_by_ingredients(&["rice".to_owned(), "tofu".to_owned()])
                .len(),
            2
        );
        assert_eq!(state.recipes().len(), 2);
    }
}
