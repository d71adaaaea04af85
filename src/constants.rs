// ABOUTME: Application constants organized by domain
// ABOUTME: Groups persistence keys, seed defaults and environment helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! Constants module
//!
//! Application constants grouped by domain: persistence key names, seed
//! defaults for fresh installations, and environment-variable helpers.

use std::env;

/// Persistence key names, one per top-level collection
///
/// The store maps each of these keys to a JSON snapshot of the collection.
pub mod storage_keys {
    /// Recipe library collection
    pub const RECIPES: &str = "recipes";
    /// Meal plan (date to day-plan mapping)
    pub const MEAL_PLAN: &str = "meal_plan";
    /// Sent-meal markers (array of `date-slot` strings)
    pub const SENT_MEALS: &str = "sent_meals";
    /// Recurring-purchase pantry groups
    pub const PANTRY_GROUPS: &str = "pantry_groups";
    /// In-stock ("reserve") items held at home
    pub const RESERVE_ITEMS: &str = "reserve_items";
    /// Active shopping list
    pub const SHOPPING_LIST: &str = "shopping_list";
    /// User settings including the food-portion registry
    pub const SETTINGS: &str = "settings";

    /// Every key, in rehydration order
    pub const ALL: &[&str] = &[
        RECIPES,
        MEAL_PLAN,
        SENT_MEALS,
        PANTRY_GROUPS,
        RESERVE_ITEMS,
        SHOPPING_LIST,
        SETTINGS,
    ];
}

/// Seed defaults applied when a collection is absent or unreadable
pub mod defaults {
    /// Default servings basis for new recipes
    pub const SERVINGS: u8 = 4;

    /// Generic unit marker used when an import row carries no unit
    pub const UNIT: &str = "pcs";

    /// Default interface language code
    pub const LANGUAGE: &str = "en";

    /// Quantity assumed when an import row carries no quantity
    pub const QUANTITY: f64 = 1.0;

    /// Starter food names seeded into an empty portion registry
    pub const SEED_FOODS: &[(&str, f64, &str)] = &[
        ("Eggs", 4.0, "pcs"),
        ("Milk", 1.0, "l"),
        ("Butter", 250.0, "g"),
        ("Flour", 500.0, "g"),
        ("Rice", 250.0, "g"),
        ("Pasta", 250.0, "g"),
        ("Olive oil", 2.0, "tbsp"),
        ("Salt", 1.0, "tsp"),
    ];
}

/// Sheet interchange constants
pub mod sheets {
    /// Name of the recurring-group sheet
    pub const GROUPS_SHEET: &str = "Recurring Lists";
    /// Name of the in-stock sheet
    pub const STOCK_SHEET: &str = "In Stock";

    /// Accepted header spellings for the group-name column
    pub const GROUP_HEADERS: &[&str] = &["group", "groupe", "list", "liste"];
    /// Accepted header spellings for the article column
    pub const ARTICLE_HEADERS: &[&str] = &["article", "item", "name", "produit", "nom"];
    /// Accepted header spellings for the quantity column
    pub const QUANTITY_HEADERS: &[&str] = &["quantity", "qty", "amount", "quantite", "quantité"];
    /// Accepted header spellings for the unit column
    pub const UNIT_HEADERS: &[&str] = &["unit", "unite", "unité", "uom"];
}

/// Environment-based configuration helpers
pub mod env_config {
    use super::env;

    /// Environment variable naming the data directory
    pub const DATA_DIR_ENV: &str = "LARDER_DATA_DIR";

    /// Environment variable selecting the AI model
    pub const AI_MODEL_ENV: &str = "LARDER_AI_MODEL";

    /// Get the configured data directory, if any
    #[must_use]
    pub fn data_dir() -> Option<String> {
        env::var(DATA_DIR_ENV).ok()
    }

    /// Get the AI model override, if any
    #[must_use]
    pub fn ai_model() -> Option<String> {
        env::var(AI_MODEL_ENV).ok()
    }
}
