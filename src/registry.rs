// ABOUTME: Food-portion registry powering autocomplete suggestions
// ABOUTME: Grows append-only from every entry point and syncs after bulk imports
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Food-Portion Registry
//!
//! The registry is the known-food list behind autocomplete. Every entry point
//! that accepts a food name — recipe save, shopping add, pantry save, bulk
//! import — feeds unseen names into it. It is append-only: nothing removes an
//! entry automatically.

use tracing::debug;

use crate::constants::defaults;
use crate::errors::AppResult;
use crate::models::{normalize_name, FoodPortion};
use crate::state::AppState;

impl AppState {
    /// Record food names, adding registry entries for unseen ones
    ///
    /// Blank names are ignored. The first sighting of a name fixes its
    /// default amount and unit. Settings persist only when something was
    /// actually added.
    ///
    /// # Errors
    ///
    /// Returns a storage error when persistence fails
    pub(crate) fn register_foods(
        &mut self,
        entries: impl IntoIterator<Item = (String, f64, String)>,
    ) -> AppResult<usize> {
        let mut added = 0;
        for (name, amount, unit) in entries {
            let normalized = normalize_name(&name);
            if normalized.is_empty() {
                continue;
            }
            let known = self
                .settings
                .food_portions
                .iter()
                .any(|portion| normalize_name(&portion.name) == normalized);
            if !known {
                self.settings
                    .food_portions
                    .push(FoodPortion::new(name.trim(), amount, unit));
                added += 1;
            }
        }
        if added > 0 {
            debug!(added, "Registered new foods for autocomplete");
            self.persist_settings()?;
        }
        Ok(added)
    }

    /// Seed the registry with a starter set of common foods
    ///
    /// Only acts on an empty registry, so entries a user has built up are
    /// never disturbed.
    ///
    /// # Errors
    ///
    /// Returns a storage error when persistence fails
    pub fn seed_food_registry(&mut self) -> AppResult<usize> {
        if !self.settings.food_portions.is_empty() {
            return Ok(0);
        }
        let entries: Vec<(String, f64, String)> = defaults::SEED_FOODS
            .iter()
            .map(|(name, amount, unit)| ((*name).to_owned(), *amount, (*unit).to_owned()))
            .collect();
        self.register_foods(entries)
    }

    /// Autocomplete suggestions whose names start with the given prefix
    ///
    /// Matching is case-insensitive; an empty prefix suggests everything.
    #[must_use]
    pub fn suggest_foods(&self, prefix: &str) -> Vec<&FoodPortion> {
        let needle = normalize_name(prefix);
        self.settings
            .food_portions
            .iter()
            .filter(|portion| normalize_name(&portion.name).starts_with(&needle))
            .collect()
    }

    /// Scan every collection and register names the registry has not seen
    ///
    /// Runs after bulk imports so imported recipes, lists and templates feed
    /// autocomplete like hand-entered data does.
    ///
    /// # Errors
    ///
    /// Returns a storage error when persistence fails
    pub fn sync_registry(&mut self) -> AppResult<usize> {
        let mut entries: Vec<(String, f64, String)> = Vec::new();

        for recipe in &self.recipes {
            for ingredient in &recipe.ingredients {
                entries.push((
                    ingredient.name.clone(),
                    ingredient.amount,
                    ingredient.unit.clone(),
                ));
            }
        }
        for item in &self.shopping_list {
            entries.push((item.name.clone(), item.amount, item.unit.clone()));
        }
        for group in &self.pantry_groups {
            for item in &group.items {
                entries.push((item.name.clone(), item.amount, item.unit.clone()));
            }
        }
        for item in &self.reserve_items {
            entries.push((item.name.clone(), item.amount, item.unit.clone()));
        }

        self.register_foods(entries)
    }
}
