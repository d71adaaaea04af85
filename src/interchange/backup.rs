// ABOUTME: Whole-state JSON backup export and additive-replace import
// ABOUTME: Sections absent from an imported document are left untouched
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! JSON backup document and the import/export commands

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppResult};
use crate::models::{MealPlan, PantryGroup, Recipe, SentMeals, ShoppingListItem, UserSettings};
use crate::state::AppState;

/// A whole-state backup document
///
/// Every section is optional so a document can carry a partial restore.
/// On import, present sections replace their collection wholesale and
/// absent sections leave the current data untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupDocument {
    /// Recipe library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipes: Option<Vec<Recipe>>,
    /// Calendar of planned meals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_plan: Option<MealPlan>,
    /// Slots whose ingredients were already sent to shopping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_meals: Option<SentMeals>,
    /// User profile and the food-portion registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<UserSettings>,
    /// The active shopping list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shopping_list: Option<Vec<ShoppingListItem>>,
    /// Recurring-purchase templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantry_groups: Option<Vec<PantryGroup>>,
    /// Items currently held at home
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reserve_items: Option<Vec<ShoppingListItem>>,
}

impl AppState {
    /// Export every collection as a pretty-printed JSON backup
    ///
    /// # Errors
    ///
    /// Returns a serialization error when the document cannot be encoded
    pub fn export_backup(&self) -> AppResult<String> {
        let document = BackupDocument {
            recipes: Some(self.recipes.clone()),
            meal_plan: Some(self.meal_plan.clone()),
            sent_meals: Some(self.sent_meals.clone()),
            settings: Some(self.settings.clone()),
            shopping_list: Some(self.shopping_list.clone()),
            pantry_groups: Some(self.pantry_groups.clone()),
            reserve_items: Some(self.reserve_items.clone()),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Import a JSON backup, replacing exactly the sections it carries
    ///
    /// Returns the names of the replaced sections. After the restore the
    /// food-portion registry is synchronized with the imported data.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when the payload is not a valid backup
    /// document; the current state is left untouched in that case.
    pub fn import_backup(&mut self, payload: &str) -> AppResult<Vec<&'static str>> {
        let document: BackupDocument = serde_json::from_str(payload)
            .map_err(|e| AppError::invalid_format(format!("Backup document rejected: {e}")))?;

        let mut replaced = Vec::new();
        if let Some(recipes) = document.recipes {
            self.recipes = recipes;
            self.persist_recipes()?;
            replaced.push("recipes");
        }
        if let Some(meal_plan) = document.meal_plan {
            self.meal_plan = meal_plan;
            self.persist_meal_plan()?;
            replaced.push("mealPlan");
        }
        if let Some(sent_meals) = document.sent_meals {
            self.sent_meals = sent_meals;
            self.persist_sent_meals()?;
            replaced.push("sentMeals");
        }
        if let Some(settings) = document.settings {
            self.settings = settings;
            self.persist_settings()?;
            replaced.push("settings");
        }
        if let Some(shopping_list) = document.shopping_list {
            self.shopping_list = shopping_list;
            self.persist_shopping_list()?;
            replaced.push("shoppingList");
        }
        if let Some(pantry_groups) = document.pantry_groups {
            self.pantry_groups = pantry_groups;
            self.persist_pantry_groups()?;
            replaced.push("pantryGroups");
        }
        if let Some(reserve_items) = document.reserve_items {
            self.reserve_items = reserve_items;
            self.persist_reserve_items()?;
            replaced.push("reserveItems");
        }

        let registered = self.sync_registry()?;
        info!(
            sections = replaced.len(),
            registered_foods = registered,
            "Backup imported"
        );
        Ok(replaced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, RecipeCategory};
    use crate::store::{MemoryStore, Store};

    fn memory_state() -> AppState {
        AppState::load(Store::Memory(MemoryStore::new()))
    }

    fn seeded_state() -> AppState {
        let mut state = memory_state();
        let mut recipe = Recipe::new("Gratin", RecipeCategory::Main);
        recipe
            .ingredients
            .push(Ingredient::new("Potatoes", 800.0, "g"));
        state.upsert_recipe(recipe).unwrap();
        state.add_shopping_item("Milk", 1.0, "l", None).unwrap();
        state
            .save_group("Weekly", vec![ShoppingListItem::new("Rice", 500.0, "g")])
            .unwrap();
        state
    }

    #[test]
    fn export_then_import_restores_collections() {
        let source = seeded_state();
        let backup = source.export_backup().unwrap();

        let mut target = memory_state();
        let replaced = target.import_backup(&backup).unwrap();

        assert_eq!(replaced.len(), 7);
        assert_eq!(target.recipes().len(), 1);
        assert_eq!(target.shopping_list().len(), 1);
        assert_eq!(target.pantry_groups().len(), 1);
    }

    #[test]
    fn backup_keys_are_camel_case() {
        let backup = seeded_state().export_backup().unwrap();
        assert!(backup.contains("\"shoppingList\""));
        assert!(backup.contains("\"pantryGroups\""));
        assert!(backup.contains("\"mealPlan\""));
        assert!(backup.contains("\"sentMeals\""));
        assert!(backup.contains("\"reserveItems\""));
    }

    #[test]
    fn absent_sections_leave_current_data_untouched() {
        let mut state = seeded_state();
        let groups_before = state.pantry_groups().to_vec();

        let replaced = state
            .import_backup(r#"{"shoppingList": []}"#)
            .unwrap();

        assert_eq!(replaced, vec!["shoppingList"]);
        assert!(state.shopping_list().is_empty());
        assert_eq!(state.pantry_groups(), groups_before.as_slice());
        assert_eq!(state.recipes().len(), 1);
    }

    #[test]
    fn malformed_document_is_one_error_and_no_mutation() {
        let mut state = seeded_state();
        let err = state.import_backup("{definitely not json").unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::InvalidFormat);
        assert_eq!(state.shopping_list().len(), 1);
    }

    #[test]
    fn import_feeds_food_registry() {
        let source = seeded_state();
        let backup = source.export_backup().unwrap();

        let mut target = memory_state();
        target.import_backup(&backup).unwrap();

        let names: Vec<&str> = target
            .settings()
            .food_portions
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert!(names.contains(&"Potatoes"));
        assert!(names.contains(&"Milk"));
        assert!(names.contains(&"Rice"));
    }
}
