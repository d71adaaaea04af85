// ABOUTME: Integration tests for JSON backup and CSV sheet interchange
// ABOUTME: Verifies section-wise restore semantics and bilingual sheet import
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;

use larder::errors::ErrorCode;
use larder::models::{MealSlot, RecipeCategory, ShoppingListItem};
use larder::test_utils::{create_test_recipe_with, memory_state};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn populated_state() -> larder::state::AppState {
    let mut state = memory_state();
    let recipe = create_test_recipe_with(
        "Ratatouille",
        RecipeCategory::Main,
        &[("Aubergine", 2.0, "pcs"), ("Courgette", 2.0, "pcs")],
    );
    let id = state.upsert_recipe(recipe).unwrap();
    state
        .set_meal(date(2025, 5, 2), MealSlot::Dinner, Some(id))
        .unwrap();
    state
        .send_meal_ingredients(date(2025, 5, 2), MealSlot::Dinner)
        .unwrap();
    state
        .save_group(
            "Marche",
            vec![ShoppingListItem::new("Tomates", 6.0, "pcs")],
        )
        .unwrap();
    state.add_reserve_item("Huile d'olive", 1.0, "l").unwrap();
    state
}

#[test]
fn backup_moves_a_household_between_stores() {
    let source = populated_state();
    let payload = source.export_backup().unwrap();

    let mut target = memory_state();
    let sections = target.import_backup(&payload).unwrap();
    assert_eq!(sections.len(), 7);

    assert_eq!(target.recipes().len(), source.recipes().len());
    assert_eq!(target.shopping_list().len(), source.shopping_list().len());
    assert!(target.is_meal_sent(date(2025, 5, 2), MealSlot::Dinner));
    assert!(target.pantry_group_by_name("marche").is_some());
    assert_eq!(target.reserve_items().len(), 1);

    // The imported names are known to autocomplete on the new side too
    assert!(!target.suggest_foods("tomate").is_empty());
}

#[test]
fn importing_a_single_section_leaves_the_rest_alone() {
    let mut state = populated_state();
    let recipes_before = state.recipes().len();
    let groups_before = state.pantry_groups().to_vec();

    let sections = state
        .import_backup(r#"{"shoppingList": []}"#)
        .unwrap();
    assert_eq!(sections, vec!["shoppingList"]);

    assert!(state.shopping_list().is_empty());
    assert_eq!(state.recipes().len(), recipes_before);
    assert_eq!(state.pantry_groups(), groups_before.as_slice());
}

#[test]
fn malformed_backup_is_rejected_before_any_mutation() {
    let mut state = populated_state();
    let list_before = state.shopping_list().to_vec();

    let err = state.import_backup("{\"recipes\": [}").unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidFormat);
    assert_eq!(state.shopping_list(), list_before.as_slice());
}

#[test]
fn sheets_round_trip_through_a_second_household() {
    let mut source = memory_state();
    source
        .save_group(
            "Weekly",
            vec![
                ShoppingListItem::new("Rice", 500.0, "g"),
                ShoppingListItem::new("Milk", 2.0, "l"),
            ],
        )
        .unwrap();
    source.add_reserve_item("Flour", 1.0, "kg").unwrap();

    let groups_csv = source.export_groups_sheet().unwrap();
    let stock_csv = source.export_stock_sheet().unwrap();

    let mut target = memory_state();
    let groups_summary = target.import_groups_sheet(&groups_csv).unwrap();
    let stock_summary = target.import_stock_sheet(&stock_csv).unwrap();

    assert_eq!(groups_summary.imported, 2);
    assert_eq!(stock_summary.imported, 1);
    assert_eq!(target.pantry_group_by_name("Weekly").unwrap().items.len(), 2);
    assert_eq!(target.reserve_items()[0].name, "Flour");
}

#[test]
fn french_headers_and_comma_decimals_import_cleanly() {
    let mut state = memory_state();
    // Quoted comma decimal, as French spreadsheet exports produce
    let sheet = "Groupe,Produit,Quantité,Unité\n\
                 Hebdo,Beurre,\"0,25\",kg\n";

    let summary = state.import_groups_sheet(sheet).unwrap();
    assert_eq!(summary.imported, 1);

    let group = state.pantry_group_by_name("Hebdo").unwrap();
    assert_eq!(group.items[0].name, "Beurre");
    assert!((group.items[0].amount - 0.25).abs() < f64::EPSILON);
    assert_eq!(group.items[0].unit, "kg");
}

#[test]
fn stock_sheet_without_an_article_column_is_rejected() {
    let mut state = memory_state();
    let err = state
        .import_stock_sheet("Quantity,Unit\n4,pcs\n")
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingRequiredField);
    assert!(state.reserve_items().is_empty());
}
