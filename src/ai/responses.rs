// ABOUTME: Response payload schemas for the five AI operations
// ABOUTME: Strips markdown code fences and parses leniently into domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # AI Response Payloads
//!
//! Models reply with JSON documents, sometimes wrapped in markdown code
//! fences despite instructions. This module strips that wrapping and parses
//! the payloads leniently: every field the model might omit has a default,
//! and a payload that still fails to parse yields `None` rather than an
//! error.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::constants::defaults;
use crate::models::{Ingredient, Recipe, RecipeCategory};

/// Remove a surrounding markdown code fence from a model reply
///
/// Handles ```` ```json ````, bare ```` ``` ````, and unfenced payloads.
#[must_use]
pub fn strip_code_fences(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // The info string ("json", "JSON", ...) runs to the first newline.
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a model reply into a payload type, or `None` when it is malformed
#[must_use]
pub fn parse_payload<T: serde::de::DeserializeOwned>(payload: &str) -> Option<T> {
    let body = strip_code_fences(payload);
    match serde_json::from_str(body) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Discarding unparseable AI payload");
            None
        }
    }
}

fn default_quantity() -> f64 {
    defaults::QUANTITY
}

fn default_unit() -> String {
    defaults::UNIT.to_string()
}

fn default_servings() -> u8 {
    defaults::SERVINGS
}

/// One ingredient line in a generated recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedIngredient {
    /// Ingredient name
    pub name: String,
    /// Quantity for the stated servings
    #[serde(default = "default_quantity")]
    pub amount: f64,
    /// Measurement unit
    #[serde(default = "default_unit")]
    pub unit: String,
}

/// A recipe produced by the model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    /// Recipe title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Ingredient lines
    #[serde(default)]
    pub ingredients: Vec<GeneratedIngredient>,
    /// Preparation steps in order
    #[serde(default)]
    pub instructions: Vec<String>,
    /// Preparation time in minutes
    #[serde(default)]
    pub prep_time_mins: u16,
    /// Cooking time in minutes
    #[serde(default)]
    pub cook_time_mins: u16,
    /// Number of servings the amounts describe
    #[serde(default = "default_servings")]
    pub servings: u8,
    /// Category name as produced by the model
    #[serde(default)]
    pub category: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
}

impl GeneratedRecipe {
    /// Convert into a library recipe with a fresh identity
    ///
    /// Unrecognized categories fall back to the default category and a zero
    /// servings count falls back to the application default.
    #[must_use]
    pub fn into_recipe(self) -> Recipe {
        let category: RecipeCategory = self
            .category
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or_default();
        let mut recipe = Recipe::new(self.title, category);
        recipe.description = self.description;
        recipe.ingredients = self
            .ingredients
            .into_iter()
            .map(|i| Ingredient::new(i.name, i.amount, i.unit))
            .collect();
        recipe.instructions = self.instructions;
        recipe.prep_time_mins = self.prep_time_mins;
        recipe.cook_time_mins = self.cook_time_mins;
        if self.servings > 0 {
            recipe.servings = self.servings;
        }
        recipe.tags = self.tags.into_iter().collect();
        recipe
    }
}

/// Result of a grounded recipe web search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSearchResult {
    /// One-paragraph summary of what was found
    #[serde(default)]
    pub summary: String,
    /// Recipes extracted from the results
    #[serde(default)]
    pub recipes: Vec<GeneratedRecipe>,
    /// Web pages the recipes came from
    #[serde(default)]
    pub sources: Vec<SearchSource>,
}

/// A cited web source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchSource {
    /// Page title
    #[serde(default)]
    pub title: String,
    /// Page URL
    pub url: String,
}

/// Result of a grounded price comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceComparison {
    /// Per-store estimates
    #[serde(default)]
    pub stores: Vec<StorePrice>,
}

/// Estimated basket price at one store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorePrice {
    /// Store or chain name
    pub store: String,
    /// Estimated total for the basket
    #[serde(default)]
    pub estimated_total: f64,
    /// Currency code for the estimate
    #[serde(default)]
    pub currency: String,
    /// Availability or substitution notes
    #[serde(default)]
    pub notes: Option<String>,
}

/// A suggested grocery store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSuggestion {
    /// Store name
    pub name: String,
    /// Street address
    #[serde(default)]
    pub address: String,
    /// Why this store fits the list
    #[serde(default)]
    pub reason: Option<String>,
}
