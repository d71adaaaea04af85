// ABOUTME: Recipe library commands for larder-cli
// ABOUTME: Handles add, list, show, and remove operations for recipes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

use std::collections::HashSet;

use uuid::Uuid;

use larder::errors::AppResult;
use larder::models::{Ingredient, Recipe, RecipeCategory};
use larder::state::AppState;

use crate::helpers::{display, resolve};

type Result<T> = AppResult<T>;

/// Add a recipe to the library
#[allow(clippy::too_many_arguments)]
pub fn add(
    state: &mut AppState,
    title: String,
    category: &str,
    servings: u8,
    description: Option<String>,
    prep_mins: u16,
    cook_mins: u16,
    ingredients: &[String],
    steps: Vec<String>,
    tags: Vec<String>,
) -> Result<()> {
    let category: RecipeCategory = category.parse()?;

    let mut recipe = Recipe::new(title, category);
    recipe.servings = servings;
    recipe.description = description.unwrap_or_default();
    recipe.prep_time_mins = prep_mins;
    recipe.cook_time_mins = cook_mins;
    recipe.instructions = steps;
    recipe.tags = tags.into_iter().collect();
    for raw in ingredients {
        let (name, amount, unit) = resolve::parse_triple(raw)?;
        recipe.ingredients.push(Ingredient::new(name, amount, unit));
    }

    let title = recipe.title.clone();
    let id = state.upsert_recipe(recipe)?;
    println!("Added recipe '{title}' ({})", display::short_id(id));
    Ok(())
}

/// List recipes, applying any combination of filters
pub fn list(
    state: &AppState,
    category: Option<&str>,
    search: Option<&str>,
    ingredients: &[String],
) -> Result<()> {
    let mut rows: Vec<&Recipe> = state.recipes().iter().collect();

    if let Some(raw) = category {
        let wanted: RecipeCategory = raw.parse()?;
        rows.retain(|recipe| recipe.category == wanted);
    }
    if let Some(needle) = search {
        let keep: HashSet<Uuid> = state
            .recipes_by_title(needle)
            .iter()
            .map(|recipe| recipe.id)
            .collect();
        rows.retain(|recipe| keep.contains(&recipe.id));
    }
    if !ingredients.is_empty() {
        let keep: HashSet<Uuid> = state
            .recipes_by_ingredients(ingredients)
            .iter()
            .map(|recipe| recipe.id)
            .collect();
        rows.retain(|recipe| keep.contains(&recipe.id));
    }

    display::display_recipe_rows(&rows);
    Ok(())
}

/// Show one recipe in full, optionally scaled
pub fn show(state: &AppState, needle: &str, servings: Option<u8>) -> Result<()> {
    let recipe = resolve::resolve_recipe(state, needle)?;
    display::display_recipe(recipe, servings);
    Ok(())
}

/// Remove a recipe from the library
pub fn remove(state: &mut AppState, needle: &str) -> Result<()> {
    let found = resolve::resolve_recipe(state, needle)?;
    let (id, title) = (found.id, found.title.clone());
    state.remove_recipe(id)?;
    println!("Removed recipe '{title}'");
    Ok(())
}
