// ABOUTME: AI-backed discovery commands for larder-cli
// ABOUTME: Handles suggest, search, image, prices, and stores operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

use std::fs;
use std::path::Path;

use larder::ai::{AiService, GeminiClient, SuggestionRequest};
use larder::errors::{AppError, AppResult};
use larder::state::AppState;

use crate::helpers::{display, resolve};

type Result<T> = AppResult<T>;

/// Suggest one recipe from available ingredients and wishes
pub async fn suggest(
    state: &mut AppState,
    service: &AiService<GeminiClient>,
    language: &str,
    criteria: Option<String>,
    ingredients: Vec<String>,
    use_reserve: bool,
    save: bool,
) -> Result<()> {
    let mut available = ingredients;
    if use_reserve {
        available.extend(state.reserve_items().iter().map(|item| item.name.clone()));
    }

    let mut request = SuggestionRequest::new()
        .with_ingredients(available)
        .with_dietary(state.settings().dietary_restrictions.clone())
        .with_language(language);
    if let Some(criteria) = criteria {
        request = request.with_criteria(criteria);
    }

    let Some(generated) = service.suggest_recipe(&request).await? else {
        println!("No suggestion available right now, try again.");
        return Ok(());
    };
    display::display_generated_recipe(&generated);

    if save {
        let recipe = generated.into_recipe();
        let title = recipe.title.clone();
        let id = state.upsert_recipe(recipe)?;
        println!("\nSaved '{title}' to the library ({})", display::short_id(id));
    }
    Ok(())
}

/// Search the web for recipes matching a query
pub async fn search(
    service: &AiService<GeminiClient>,
    language: &str,
    query: &str,
) -> Result<()> {
    let Some(result) = service.search_recipes(query, language).await? else {
        println!("Search returned nothing usable, try again.");
        return Ok(());
    };
    display::display_search_results(&result);
    Ok(())
}

/// Generate a cover image for a recipe and attach it as a data URI
pub async fn image(
    state: &mut AppState,
    service: &AiService<GeminiClient>,
    needle: &str,
    out: Option<&Path>,
) -> Result<()> {
    let mut recipe = resolve::resolve_recipe(state, needle)?.clone();

    let Some(image) = service
        .generate_recipe_image(&recipe.title, &recipe.description)
        .await?
    else {
        println!("Image generation failed, try again.");
        return Ok(());
    };

    if let Some(path) = out {
        let bytes = image.decode_bytes()?;
        fs::write(path, bytes)
            .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", path.display())))?;
        println!("Wrote image to {}", path.display());
    }

    recipe.image = Some(image.data_uri());
    let title = recipe.title.clone();
    state.upsert_recipe(recipe)?;
    println!("Attached cover image to '{title}'");
    Ok(())
}

/// Compare basket prices for the shopping list across nearby stores
pub async fn prices(
    state: &AppState,
    service: &AiService<GeminiClient>,
    language: &str,
    location: &str,
) -> Result<()> {
    let items = state.shopping_list();
    if items.is_empty() {
        println!("Shopping list is empty, nothing to price.");
        return Ok(());
    }

    let Some(comparison) = service.compare_prices(items, location, language).await? else {
        println!("No price estimates available, try again.");
        return Ok(());
    };
    display::display_price_comparison(&comparison);
    Ok(())
}

/// Locate stores near a location that stock the shopping list
pub async fn stores(
    state: &AppState,
    service: &AiService<GeminiClient>,
    language: &str,
    location: &str,
) -> Result<()> {
    let items = state.shopping_list();
    if items.is_empty() {
        println!("Shopping list is empty, nothing to locate.");
        return Ok(());
    }

    let Some(stores) = service.locate_stores(items, location, language).await? else {
        println!("No store suggestions available, try again.");
        return Ok(());
    };
    display::display_store_suggestions(&stores);
    Ok(())
}
