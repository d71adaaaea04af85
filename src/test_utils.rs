// ABOUTME: Test utilities for creating domain structs and seeded state in a consistent way
// ABOUTME: Centralizes test data creation to avoid duplication and ensure consistency across tests
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Larder Contributors

use crate::models::{Ingredient, Recipe, RecipeCategory, ShoppingListItem};
use crate::state::AppState;
use crate::store::{MemoryStore, Store};

/// Create an in-memory application state with empty collections
#[must_use]
pub fn memory_state() -> AppState {
    AppState::load(Store::Memory(MemoryStore::new()))
}

/// Create a test recipe with two ingredients and default servings
#[must_use]
pub fn create_test_recipe(title: &str) -> Recipe {
    let mut recipe = Recipe::new(title, RecipeCategory::Main);
    recipe.description = "Test recipe".to_owned();
    recipe.ingredients = vec![
        Ingredient::new("Pasta", 400.0, "g"),
        Ingredient::new("Tomato sauce", 250.0, "ml"),
    ];
    recipe.instructions = vec!["Boil".to_owned(), "Combine".to_owned()];
    recipe.prep_time_mins = 10;
    recipe.cook_time_mins = 15;
    recipe
}

/// Create a test recipe with the given category and ingredient lines
#[must_use]
pub fn create_test_recipe_with(
    title: &str,
    category: RecipeCategory,
    ingredients: &[(&str, f64, &str)],
) -> Recipe {
    let mut recipe = Recipe::new(title, category);
    recipe.ingredients = ingredients
        .iter()
        .map(|(name, amount, unit)| Ingredient::new(*name, *amount, *unit))
        .collect();
    recipe.instructions = vec!["Cook".to_owned()];
    recipe
}

/// Create unchecked shopping items from name/amount/unit triples
#[must_use]
pub fn create_test_items(lines: &[(&str, f64, &str)]) -> Vec<ShoppingListItem> {
    lines
        .iter()
        .map(|(name, amount, unit)| ShoppingListItem::new(*name, *amount, *unit))
        .collect()
}
