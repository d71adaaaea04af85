// ABOUTME: Application state aggregate owning every top-level collection
// ABOUTME: Loads state from the store at startup and mirrors mutations back after every command
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Application State
//!
//! [`AppState`] is the single ownership root for all domain collections. Every
//! mutation flows through a manager command (defined in the per-domain
//! modules as `impl AppState` blocks) and is mirrored to the persistence
//! adapter before the command returns.
//!
//! Rehydration is per key and best-effort: a missing or malformed persisted
//! value falls back to that collection's default and is logged, never
//! propagated as an error.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{info, warn};

use crate::constants::storage_keys;
use crate::errors::{AppError, AppResult};
use crate::models::{
    normalize_name, MealPlan, PantryGroup, Recipe, SentMeals, ShoppingListItem, UserSettings,
};
use crate::store::{KeyValueStore, Store};

/// The application state aggregate
///
/// Collections are only mutated through manager commands; read access goes
/// through the borrow accessors below.
pub struct AppState {
    store: Store,
    pub(crate) recipes: Vec<Recipe>,
    pub(crate) meal_plan: MealPlan,
    pub(crate) sent_meals: SentMeals,
    pub(crate) pantry_groups: Vec<PantryGroup>,
    pub(crate) reserve_items: Vec<ShoppingListItem>,
    pub(crate) shopping_list: Vec<ShoppingListItem>,
    pub(crate) settings: UserSettings,
}

impl AppState {
    /// Rehydrate application state from the store
    ///
    /// Each collection loads independently; a key that is absent or holds
    /// malformed JSON yields that collection's default value.
    #[must_use]
    pub fn load(store: Store) -> Self {
        let recipes: Vec<Recipe> = load_collection(&store, storage_keys::RECIPES);
        let meal_plan: MealPlan = load_collection(&store, storage_keys::MEAL_PLAN);
        let sent_meals: SentMeals = load_collection(&store, storage_keys::SENT_MEALS);
        let pantry_groups: Vec<PantryGroup> = load_collection(&store, storage_keys::PANTRY_GROUPS);
        let reserve_items: Vec<ShoppingListItem> =
            load_collection(&store, storage_keys::RESERVE_ITEMS);
        let shopping_list: Vec<ShoppingListItem> =
            load_collection(&store, storage_keys::SHOPPING_LIST);
        let settings: UserSettings = load_collection(&store, storage_keys::SETTINGS);

        info!(
            recipes = recipes.len(),
            planned_days = meal_plan.len(),
            pantry_groups = pantry_groups.len(),
            reserve_items = reserve_items.len(),
            shopping_items = shopping_list.len(),
            "Application state loaded"
        );

        Self {
            store,
            recipes,
            meal_plan,
            sent_meals,
            pantry_groups,
            reserve_items,
            shopping_list,
            settings,
        }
    }

    /// The persistence adapter backing this state
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    // ================================
    // Read accessors
    // ================================

    /// Recipe library
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Calendar of planned meals
    #[must_use]
    pub const fn meal_plan(&self) -> &MealPlan {
        &self.meal_plan
    }

    /// Slots whose ingredients were already sent to shopping
    #[must_use]
    pub const fn sent_meals(&self) -> &SentMeals {
        &self.sent_meals
    }

    /// Recurring-purchase templates
    #[must_use]
    pub fn pantry_groups(&self) -> &[PantryGroup] {
        &self.pantry_groups
    }

    /// Items currently held at home
    #[must_use]
    pub fn reserve_items(&self) -> &[ShoppingListItem] {
        &self.reserve_items
    }

    /// The active shopping list
    #[must_use]
    pub fn shopping_list(&self) -> &[ShoppingListItem] {
        &self.shopping_list
    }

    /// User profile and the food-portion registry
    #[must_use]
    pub const fn settings(&self) -> &UserSettings {
        &self.settings
    }

    // ================================
    // Profile commands
    // ================================

    /// Update profile fields, leaving `None` fields untouched
    ///
    /// Returns whether anything changed; settings persist only on change.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a zero servings basis, `InvalidInput`
    /// for a blank language code, and a storage error when persistence fails
    pub fn update_profile(
        &mut self,
        display_name: Option<String>,
        default_servings: Option<u8>,
        language: Option<String>,
    ) -> AppResult<bool> {
        if default_servings == Some(0) {
            return Err(AppError::out_of_range("Servings basis must be at least 1"));
        }
        if let Some(code) = &language {
            if code.trim().is_empty() {
                return Err(AppError::invalid_input("Language code must not be blank"));
            }
        }

        let mut changed = false;
        if let Some(name) = display_name {
            let name = name.trim().to_owned();
            if name != self.settings.display_name {
                self.settings.display_name = name;
                changed = true;
            }
        }
        if let Some(servings) = default_servings {
            if servings != self.settings.default_servings {
                self.settings.default_servings = servings;
                changed = true;
            }
        }
        if let Some(code) = language {
            let code = code.trim().to_lowercase();
            if code != self.settings.language {
                self.settings.language = code;
                changed = true;
            }
        }
        if changed {
            self.persist_settings()?;
        }
        Ok(changed)
    }

    /// Add a dietary restriction tag, ignoring case-insensitive duplicates
    ///
    /// Returns whether the tag was new.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank tag and a storage error when
    /// persistence fails
    pub fn add_dietary_restriction(&mut self, tag: &str) -> AppResult<bool> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input("Dietary tag must not be blank"));
        }
        let normalized = normalize_name(trimmed);
        let known = self
            .settings
            .dietary_restrictions
            .iter()
            .any(|existing| normalize_name(existing) == normalized);
        if known {
            return Ok(false);
        }
        self.settings.dietary_restrictions.push(trimmed.to_owned());
        self.persist_settings()?;
        Ok(true)
    }

    /// Remove a dietary restriction tag by case-insensitive match
    ///
    /// Removing an unknown tag is a no-op reported as `Ok(false)`.
    ///
    /// # Errors
    ///
    /// Returns a storage error when persistence fails
    pub fn remove_dietary_restriction(&mut self, tag: &str) -> AppResult<bool> {
        let normalized = normalize_name(tag);
        let before = self.settings.dietary_restrictions.len();
        self.settings
            .dietary_restrictions
            .retain(|existing| normalize_name(existing) != normalized);
        if self.settings.dietary_restrictions.len() == before {
            return Ok(false);
        }
        self.persist_settings()?;
        Ok(true)
    }

    // ================================
    // Persistence mirroring
    // ================================

    pub(crate) fn persist<T>(&self, key: &str, value: &T) -> AppResult<()>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)?;
        self.store.set(key, &json)?;
        Ok(())
    }

    pub(crate) fn persist_recipes(&self) -> AppResult<()> {
        self.persist(storage_keys::RECIPES, &self.recipes)
    }

    pub(crate) fn persist_meal_plan(&self) -> AppResult<()> {
        self.persist(storage_keys::MEAL_PLAN, &self.meal_plan)
    }

    pub(crate) fn persist_sent_meals(&self) -> AppResult<()> {
        self.persist(storage_keys::SENT_MEALS, &self.sent_meals)
    }

    pub(crate) fn persist_pantry_groups(&self) -> AppResult<()> {
        self.persist(storage_keys::PANTRY_GROUPS, &self.pantry_groups)
    }

    pub(crate) fn persist_reserve_items(&self) -> AppResult<()> {
        self.persist(storage_keys::RESERVE_ITEMS, &self.reserve_items)
    }

    pub(crate) fn persist_shopping_list(&self) -> AppResult<()> {
        self.persist(storage_keys::SHOPPING_LIST, &self.shopping_list)
    }

    pub(crate) fn persist_settings(&self) -> AppResult<()> {
        self.persist(storage_keys::SETTINGS, &self.settings)
    }

    /// Mirror every collection to the store
    ///
    /// # Errors
    ///
    /// Returns the first persistence failure encountered
    pub fn persist_all(&self) -> AppResult<()> {
        self.persist_recipes()?;
        self.persist_meal_plan()?;
        self.persist_sent_meals()?;
        self.persist_pantry_groups()?;
        self.persist_reserve_items()?;
        self.persist_shopping_list()?;
        self.persist_settings()?;
        Ok(())
    }
}

/// Load one collection, falling back to its default on any failure
fn load_collection<T>(store: &Store, key: &str) -> T
where
    T: DeserializeOwned + Default,
{
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "Malformed persisted value, using default");
                T::default()
            }
        },
        Ok(None) => T::default(),
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read persisted value, using default");
            T::default()
        }
    }
}
