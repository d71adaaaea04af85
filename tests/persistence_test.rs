// ABOUTME: Integration tests for state persistence over the file-backed store
// ABOUTME: Verifies collections survive reloads and degrade per key on damage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::fs;

use chrono::NaiveDate;
use tempfile::TempDir;

use larder::models::{MealSlot, RecipeCategory, ShoppingListItem};
use larder::state::AppState;
use larder::store::{FileStore, Store};
use larder::test_utils::create_test_recipe_with;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn file_state(dir: &TempDir) -> AppState {
    let store = FileStore::open(dir.path()).unwrap();
    AppState::load(Store::File(store))
}

#[test]
fn whole_household_survives_a_restart() {
    let dir = TempDir::new().unwrap();

    let (recipe_id, group_id) = {
        let mut state = file_state(&dir);

        let recipe = create_test_recipe_with(
            "Shakshuka",
            RecipeCategory::Breakfast,
            &[("Eggs", 4.0, "pcs"), ("Canned tomatoes", 2.0, "pcs")],
        );
        let recipe_id = state.upsert_recipe(recipe).unwrap();
        state
            .set_meal(date(2025, 4, 6), MealSlot::Lunch, Some(recipe_id))
            .unwrap();
        state
            .send_meal_ingredients(date(2025, 4, 6), MealSlot::Lunch)
            .unwrap();

        let group_id = state
            .save_group("Brunch", vec![ShoppingListItem::new("Bread", 1.0, "pcs")])
            .unwrap();
        state.add_reserve_item("Harissa", 1.0, "pcs").unwrap();

        (recipe_id, group_id)
    };

    let reloaded = file_state(&dir);
    assert_eq!(reloaded.recipes().len(), 1);
    assert_eq!(reloaded.recipes()[0].id, recipe_id);
    assert_eq!(
        reloaded
            .planned_recipe(date(2025, 4, 6), MealSlot::Lunch)
            .unwrap()
            .title,
        "Shakshuka"
    );
    assert!(reloaded.is_meal_sent(date(2025, 4, 6), MealSlot::Lunch));
    assert_eq!(reloaded.shopping_list().len(), 2);
    assert_eq!(reloaded.pantry_group(group_id).unwrap().name, "Brunch");
    assert_eq!(reloaded.reserve_items().len(), 1);

    // Registry entries live in settings and reload with them
    assert!(!reloaded.suggest_foods("egg").is_empty());
}

#[test]
fn one_damaged_file_does_not_poison_the_others() {
    let dir = TempDir::new().unwrap();

    {
        let mut state = file_state(&dir);
        let recipe = create_test_recipe_with(
            "Dal",
            RecipeCategory::Main,
            &[("Red lentils", 300.0, "g")],
        );
        state.upsert_recipe(recipe).unwrap();
        state
            .add_shopping_item("Naan", 2.0, "pcs", None)
            .unwrap();
    }

    // Corrupt only the recipes file
    fs::write(dir.path().join("recipes.json"), "{definitely not json").unwrap();

    let reloaded = file_state(&dir);
    assert!(reloaded.recipes().is_empty());
    assert_eq!(reloaded.shopping_list().len(), 1);
    assert_eq!(reloaded.shopping_list()[0].name, "Naan");
}

#[test]
fn collections_write_one_json_file_per_key() {
    let dir = TempDir::new().unwrap();

    {
        let mut state = file_state(&dir);
        state.add_shopping_item("Milk", 1.0, "l", None).unwrap();
        state.add_reserve_item("Butter", 250.0, "g").unwrap();
    }

    assert!(dir.path().join("shopping_list.json").exists());
    assert!(dir.path().join("reserve_items.json").exists());
    // Registry writes ride along with settings
    assert!(dir.path().join("settings.json").exists());
    assert!(!dir.path().join("recipes.json").exists());
}

#[test]
fn open_creates_missing_nested_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("larder").join("data");

    let store = FileStore::open(&nested).unwrap();
    assert_eq!(store.root(), nested.as_path());

    let mut state = AppState::load(Store::File(store));
    state.add_shopping_item("Salt", 1.0, "pcs", None).unwrap();
    assert!(nested.join("shopping_list.json").exists());
}
