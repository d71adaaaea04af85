// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors
// ABOUTME: Output formatting helpers for larder-cli
// ABOUTME: Provides consistent display functions for recipes, lists, groups and AI results

use chrono::NaiveDate;
use uuid::Uuid;

use larder::ai::{GeneratedRecipe, PriceComparison, RecipeSearchResult, StoreSuggestion};
use larder::library;
use larder::models::{DayPlan, MealSlot, PantryGroup, Recipe, ShoppingListItem, UserSettings};
use larder::shopping::ConsolidatedLine;
use larder::state::AppState;

/// First eight characters of a hyphenated id, enough to address entries
pub fn short_id(id: Uuid) -> String {
    let full = id.to_string();
    full.chars().take(8).collect()
}

/// Render an amount rounded for display, dropping a trailing `.0`
pub fn format_amount(amount: f64) -> String {
    let rounded = library::display_amount(amount);
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded}")
    }
}

/// Display a list of recipe summary rows
pub fn display_recipe_rows(recipes: &[&Recipe]) {
    if recipes.is_empty() {
        println!("No recipes found.");
        return;
    }
    println!("{} recipe(s):", recipes.len());
    for recipe in recipes {
        println!(
            "  {}  {} ({}, serves {}, {} min)",
            short_id(recipe.id),
            recipe.title,
            recipe.category,
            recipe.servings,
            recipe.total_time_mins()
        );
    }
}

/// Display one recipe in full, optionally scaled to a serving count
pub fn display_recipe(recipe: &Recipe, servings: Option<u8>) {
    println!("\n{}", recipe.title);
    println!("{}", "=".repeat(60));
    println!("  Id: {}", recipe.id);
    println!("  Category: {}", recipe.category);
    println!(
        "  Time: {} min prep, {} min cook",
        recipe.prep_time_mins, recipe.cook_time_mins
    );
    if !recipe.description.is_empty() {
        println!("  {}", recipe.description);
    }
    if !recipe.tags.is_empty() {
        let tags: Vec<&str> = recipe.tags.iter().map(String::as_str).collect();
        println!("  Tags: {}", tags.join(", "));
    }
    if recipe.image.is_some() {
        println!("  Cover image: attached");
    }

    let (basis, ingredients) = match servings {
        Some(requested) => (requested, library::scale(recipe, requested)),
        None => (recipe.servings, recipe.ingredients.clone()),
    };
    println!("\nIngredients (serves {basis}):");
    for ingredient in &ingredients {
        println!(
            "  - {} {} {}",
            format_amount(ingredient.amount),
            ingredient.unit,
            ingredient.name
        );
    }

    if !recipe.instructions.is_empty() {
        println!("\nSteps:");
        for (index, step) in recipe.instructions.iter().enumerate() {
            println!("  {}. {step}", index + 1);
        }
    }
}

/// Display the raw shopping list with checked markers
pub fn display_shopping_list(items: &[ShoppingListItem]) {
    if items.is_empty() {
        println!("Shopping list is empty.");
        return;
    }
    println!("Shopping list ({} line(s)):", items.len());
    for item in items {
        let marker = if item.checked { "[x]" } else { "[ ]" };
        let category = item
            .category
            .as_deref()
            .map(|c| format!("  ({c})"))
            .unwrap_or_default();
        println!(
            "  {marker} {}  {} {} {}{category}",
            short_id(item.id),
            format_amount(item.amount),
            item.unit,
            item.name
        );
    }
}

/// Display the consolidated store-ready view
pub fn display_consolidated(lines: &[ConsolidatedLine]) {
    if lines.is_empty() {
        println!("Shopping list is empty.");
        return;
    }
    println!("Consolidated ({} line(s)):", lines.len());
    for line in lines {
        println!(
            "  - {} {} {}",
            format_amount(line.amount),
            line.unit,
            line.name
        );
    }
}

/// Display every pantry group with in-stock markers
pub fn display_groups(groups: &[PantryGroup]) {
    if groups.is_empty() {
        println!("No pantry groups saved.");
        return;
    }
    for group in groups {
        let in_stock = group.items.iter().filter(|item| item.checked).count();
        println!(
            "\n{}  {} ({} of {} in stock)",
            short_id(group.id),
            group.name,
            in_stock,
            group.items.len()
        );
        for item in &group.items {
            let marker = if item.checked { "[x]" } else { "[ ]" };
            println!(
                "  {marker} {}  {} {} {}",
                short_id(item.id),
                format_amount(item.amount),
                item.unit,
                item.name
            );
        }
    }
}

/// Display the in-stock reserve
pub fn display_reserve(items: &[ShoppingListItem]) {
    if items.is_empty() {
        println!("Reserve is empty.");
        return;
    }
    println!("In stock ({} item(s)):", items.len());
    for item in items {
        println!(
            "  {}  {} {} {}",
            short_id(item.id),
            format_amount(item.amount),
            item.unit,
            item.name
        );
    }
}

/// Display the profile and preferences
pub fn display_settings(settings: &UserSettings) {
    let name = if settings.display_name.is_empty() {
        "(not set)"
    } else {
        settings.display_name.as_str()
    };
    println!("Display name:     {name}");
    println!("Language:         {}", settings.language);
    println!("Default servings: {}", settings.default_servings);
    if settings.dietary_restrictions.is_empty() {
        println!("Dietary:          none");
    } else {
        println!(
            "Dietary:          {}",
            settings.dietary_restrictions.join(", ")
        );
    }
    println!("Known foods:      {}", settings.food_portions.len());
}

/// Display a range of planned days with sent markers
pub fn display_plan(state: &AppState, days: &[(NaiveDate, DayPlan)]) {
    if days.is_empty() {
        println!("Nothing planned in this range.");
        return;
    }
    for (date, _) in days {
        println!("\n{date}");
        for slot in [MealSlot::Lunch, MealSlot::Dinner] {
            let sent = if state.is_meal_sent(*date, slot) {
                "  (sent)"
            } else {
                ""
            };
            match state.planned_recipe(*date, slot) {
                Some(recipe) => println!("  {slot}: {}{sent}", recipe.title),
                None => println!("  {slot}: -"),
            }
        }
    }
}

/// Display an AI-suggested recipe before it enters the library
pub fn display_generated_recipe(recipe: &GeneratedRecipe) {
    println!("\n{}", recipe.title);
    println!("{}", "=".repeat(60));
    if !recipe.description.is_empty() {
        println!("  {}", recipe.description);
    }
    if let Some(category) = &recipe.category {
        println!("  Category: {category}");
    }
    println!(
        "  Time: {} min prep, {} min cook, serves {}",
        recipe.prep_time_mins, recipe.cook_time_mins, recipe.servings
    );
    if !recipe.tags.is_empty() {
        println!("  Tags: {}", recipe.tags.join(", "));
    }

    if !recipe.ingredients.is_empty() {
        println!("\nIngredients:");
        for ingredient in &recipe.ingredients {
            println!(
                "  - {} {} {}",
                format_amount(ingredient.amount),
                ingredient.unit,
                ingredient.name
            );
        }
    }
    if !recipe.instructions.is_empty() {
        println!("\nSteps:");
        for (index, step) in recipe.instructions.iter().enumerate() {
            println!("  {}. {step}", index + 1);
        }
    }
}

/// Display web search results with their sources
pub fn display_search_results(result: &RecipeSearchResult) {
    if !result.summary.is_empty() {
        println!("\n{}", result.summary);
    }
    for recipe in &result.recipes {
        display_generated_recipe(recipe);
    }
    if !result.sources.is_empty() {
        println!("\nSources:");
        for source in &result.sources {
            if source.title.is_empty() {
                println!("  - {}", source.url);
            } else {
                println!("  - {} ({})", source.title, source.url);
            }
        }
    }
}

/// Display a basket price comparison across stores
pub fn display_price_comparison(comparison: &PriceComparison) {
    if comparison.stores.is_empty() {
        println!("No price estimates returned.");
        return;
    }
    println!("Estimated basket totals:");
    println!("{}", "=".repeat(60));
    for store in &comparison.stores {
        let notes = store
            .notes
            .as_deref()
            .map(|n| format!("  ({n})"))
            .unwrap_or_default();
        println!(
            "  {}: {} {}{notes}",
            store.store,
            format_amount(store.estimated_total),
            store.currency
        );
    }
}

/// Display suggested stores for the current list
pub fn display_store_suggestions(stores: &[StoreSuggestion]) {
    if stores.is_empty() {
        println!("No stores suggested.");
        return;
    }
    println!("Suggested stores:");
    println!("{}", "=".repeat(60));
    for store in stores {
        println!("  {}", store.name);
        if !store.address.is_empty() {
            println!("    {}", store.address);
        }
        if let Some(reason) = &store.reason {
            println!("    {reason}");
        }
    }
}
