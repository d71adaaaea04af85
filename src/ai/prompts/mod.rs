// ABOUTME: Fixed prompts for the five AI operations loaded at compile time
// ABOUTME: Builds language-aware user prompts with embedded JSON response schemas
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Operation Prompts
//!
//! This module provides the fixed prompts behind each AI operation. The
//! system prompt is loaded at compile time from a markdown file for easy
//! maintenance; per-operation prompts embed the JSON schema the response
//! layer expects back.

use crate::models::ShoppingListItem;

/// Culinary assistant system prompt
pub const CULINARY_SYSTEM_PROMPT: &str = include_str!("recipe_system.md");

/// Get the system prompt shared by all recipe operations
#[must_use]
pub const fn culinary_system_prompt() -> &'static str {
    CULINARY_SYSTEM_PROMPT
}

/// Map a language code to the reply-language instruction
fn language_clause(language: &str) -> String {
    let name = match language {
        "fr" => "French",
        "de" => "German",
        "es" => "Spanish",
        "it" => "Italian",
        _ => "English",
    };
    format!("Reply in {name}.")
}

/// Build the recipe suggestion prompt
///
/// The model receives available ingredients, free-form criteria, and the
/// dietary restrictions it must honor, and returns one recipe as JSON.
#[must_use]
pub fn suggest_recipe(
    ingredients: &[String],
    criteria: Option<&str>,
    dietary: &[String],
    language: &str,
) -> String {
    let mut prompt = String::from("Suggest one recipe for a home cook.\n");
    if !ingredients.is_empty() {
        prompt.push_str(&format!(
            "Prefer using these available ingredients: {}.\n",
            ingredients.join(", ")
        ));
    }
    if let Some(criteria) = criteria.filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!("The user asked for: {criteria}.\n"));
    }
    if !dietary.is_empty() {
        prompt.push_str(&format!(
            "The recipe MUST comply with these dietary restrictions: {}.\n",
            dietary.join(", ")
        ));
    }
    prompt.push_str(&language_clause(language));
    prompt.push_str(concat!(
        "\nReturn a single JSON object with this exact shape:\n",
        r#"{"title": "...", "description": "...", "ingredients": [{"name": "...", "amount": 200.0, "unit": "g"}], "#,
        r#""instructions": ["step 1", "step 2"], "prep_time_mins": 15, "cook_time_mins": 30, "#,
        r#""servings": 4, "category": "main", "tags": ["quick"]}"#,
        "\nThe category must be one of: breakfast, starter, main, side, dessert, snack, drink."
    ));
    prompt
}

/// Build the grounded recipe search prompt
#[must_use]
pub fn search_recipes(query: &str, language: &str) -> String {
    let language = language_clause(language);
    format!(
        concat!(
            "Search the web for recipes matching: {query}.\n",
            "{language}\n",
            "Return a JSON object with this exact shape:\n",
            r#"{{"summary": "...", "recipes": [{{"title": "...", "description": "...", "#,
            r#""ingredients": [{{"name": "...", "amount": 200.0, "unit": "g"}}], "#,
            r#""instructions": ["step 1"], "prep_time_mins": 15, "cook_time_mins": 30, "#,
            r#""servings": 4, "category": "main", "tags": []}}], "#,
            r#""sources": [{{"title": "...", "url": "https://..."}}]}}"#,
            "\nInclude at most five recipes and cite the pages they came from."
        ),
        query = query,
        language = language
    )
}

/// Build the recipe image generation prompt
#[must_use]
pub fn recipe_image(title: &str, description: &str) -> String {
    format!(
        concat!(
            "Professional food photography of \"{title}\": {description}. ",
            "Overhead shot on a rustic wooden table, natural daylight, ",
            "shallow depth of field, no text or watermarks."
        ),
        title = title,
        description = description
    )
}

/// Build the grounded price comparison prompt for shopping list items
#[must_use]
pub fn compare_prices(items: &[ShoppingListItem], location: &str, language: &str) -> String {
    let list = format_item_lines(items);
    let language = language_clause(language);
    format!(
        concat!(
            "Estimate current grocery prices near {location} for this shopping list:\n",
            "{list}\n",
            "Compare at least two supermarket chains available there.\n",
            "{language}\n",
            "Return a JSON object with this exact shape:\n",
            r#"{{"stores": [{{"store": "...", "estimated_total": 42.50, "currency": "EUR", "#,
            r#""notes": "..."}}]}}"#
        ),
        location = location,
        list = list,
        language = language
    )
}

/// Build the grounded store lookup prompt
#[must_use]
pub fn locate_stores(items: &[ShoppingListItem], location: &str, language: &str) -> String {
    let list = format_item_lines(items);
    let language = language_clause(language);
    format!(
        concat!(
            "Find grocery stores near {location} that stock this shopping list:\n",
            "{list}\n",
            "{language}\n",
            "Return a JSON array with this exact shape:\n",
            r#"[{{"name": "...", "address": "...", "reason": "..."}}]"#,
            "\nList at most five stores, closest first."
        ),
        location = location,
        list = list,
        language = language
    )
}

fn format_item_lines(items: &[ShoppingListItem]) -> String {
    items
        .iter()
        .map(|item| format!("- {} {} {}", item.amount, item.unit, item.name))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggestion_prompt_carries_restrictions_and_language() {
        let prompt = suggest_recipe(
            &["tomatoes".into(), "basil".into()],
            Some("quick pasta"),
            &["vegetarian".into()],
            "fr",
        );
        assert!(prompt.contains("tomatoes, basil"));
        assert!(prompt.contains("quick pasta"));
        assert!(prompt.contains("vegetarian"));
        assert!(prompt.contains("Reply in French."));
        assert!(prompt.contains(r#""category": "main""#));
    }

    #[test]
    fn suggestion_prompt_omits_empty_sections() {
        let prompt = suggest_recipe(&[], None, &[], "en");
        assert!(!prompt.contains("available ingredients"));
        assert!(!prompt.contains("dietary restrictions"));
        assert!(prompt.contains("Reply in English."));
    }

    #[test]
    fn shopping_prompts_render_item_lines() {
        let items = vec![ShoppingListItem::new("Pâtes", 300.0, "g")];
        let prices = compare_prices(&items, "Lyon", "fr");
        assert!(prices.contains("- 300 g Pâtes"));
        assert!(prices.contains("Lyon"));

        let stores = locate_stores(&items, "Lyon", "en");
        assert!(stores.contains("- 300 g Pâtes"));
        assert!(stores.contains("closest first"));
    }

    #[test]
    fn system_prompt_is_embedded() {
        assert!(culinary_system_prompt().contains("culinary assistant"));
    }
}
