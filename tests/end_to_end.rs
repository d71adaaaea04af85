// ABOUTME: End-to-end integration tests for the weekly meal planning flow
// ABOUTME: Covers planning, sending, pantry groups, reconciliation and the registry together
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use chrono::NaiveDate;

use larder::models::{MealSlot, RecipeCategory, ShoppingListItem};
use larder::test_utils::{create_test_recipe_with, memory_state};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn weekly_flow_from_plan_to_checkout() {
    let mut state = memory_state();

    let curry = create_test_recipe_with(
        "Chickpea curry",
        RecipeCategory::Main,
        &[
            ("Chickpeas", 400.0, "g"),
            ("Coconut milk", 400.0, "ml"),
            ("Rice", 300.0, "g"),
        ],
    );
    let soup = create_test_recipe_with(
        "Minestrone",
        RecipeCategory::Starter,
        &[("Carrots", 3.0, "pcs"), ("Rice", 100.0, "g")],
    );
    let curry_id = state.upsert_recipe(curry).unwrap();
    let soup_id = state.upsert_recipe(soup).unwrap();

    // Plan two meals across the week and send both to shopping
    let monday = date(2025, 3, 10);
    let tuesday = date(2025, 3, 11);
    state.set_meal(monday, MealSlot::Dinner, Some(curry_id)).unwrap();
    state.set_meal(tuesday, MealSlot::Lunch, Some(soup_id)).unwrap();
    assert_eq!(
        state.send_meal_ingredients(monday, MealSlot::Dinner).unwrap(),
        3
    );
    assert_eq!(
        state.send_meal_ingredients(tuesday, MealSlot::Lunch).unwrap(),
        2
    );
    assert!(state.is_meal_sent(monday, MealSlot::Dinner));

    // The two rice demands merged into one open line
    let rice: Vec<&ShoppingListItem> = state
        .shopping_list()
        .iter()
        .filter(|item| item.name == "Rice")
        .collect();
    assert_eq!(rice.len(), 1);
    assert!((rice[0].amount - 400.0).abs() < f64::EPSILON);

    // A staples group where the oil is already in stock
    let staples = vec![
        ShoppingListItem::new("Olive oil", 1.0, "l"),
        ShoppingListItem::new("Rice", 500.0, "g"),
    ];
    let group_id = state.save_group("Staples", staples).unwrap();
    let oil_id = state
        .pantry_group(group_id)
        .unwrap()
        .items
        .iter()
        .find(|item| item.name == "Olive oil")
        .unwrap()
        .id;
    state.toggle_group_item(group_id, oil_id).unwrap();

    // Only the rice is missing, and it lands on the existing line
    assert_eq!(state.send_group_to_shopping(group_id).unwrap(), 1);
    let rice_total: f64 = state
        .shopping_list()
        .iter()
        .filter(|item| item.name == "Rice")
        .map(|item| item.amount)
        .sum();
    assert!((rice_total - 900.0).abs() < f64::EPSILON);

    // Direct entry keeps its category label on the new line
    state
        .add_shopping_item("Sparkling water", 6.0, "pcs", Some("drinks".to_owned()))
        .unwrap();
    let water = state
        .shopping_list()
        .iter()
        .find(|item| item.name == "Sparkling water")
        .unwrap();
    assert_eq!(water.category.as_deref(), Some("drinks"));

    // Consolidation groups without mutating the list
    let before = state.shopping_list().len();
    let consolidated = state.consolidated_shopping();
    assert_eq!(consolidated.len(), before);
    assert_eq!(state.shopping_list().len(), before);

    // Check off the chickpeas and finalize only the purchased part
    let chickpeas_id = state
        .shopping_list()
        .iter()
        .find(|item| item.name == "Chickpeas")
        .unwrap()
        .id;
    state.set_item_checked(chickpeas_id, true).unwrap();
    assert_eq!(state.clear_checked_items().unwrap(), 1);
    assert!(state.shopping_list().iter().all(|item| !item.checked));
    assert!(state
        .shopping_list()
        .iter()
        .all(|item| item.name != "Chickpeas"));

    // Every entry point fed the autocomplete registry
    assert!(!state.suggest_foods("spark").is_empty());
    assert!(!state.suggest_foods("olive").is_empty());
    assert!(!state.suggest_foods("chick").is_empty());
}

#[test]
fn imported_sheet_groups_feed_the_shopping_list() {
    let mut state = memory_state();

    let sheet = "Group,Article,Quantity,Unit\n\
                 Weekly,Rice,500,g\n\
                 Weekly,Olive oil,1,l\n";
    let summary = state.import_groups_sheet(sheet).unwrap();
    assert_eq!(summary.imported, 2);

    let group_id = state.pantry_group_by_name("weekly").unwrap().id;
    assert_eq!(state.send_group_to_shopping(group_id).unwrap(), 2);
    assert_eq!(state.shopping_list().len(), 2);

    // Sent lines are fresh identities, not aliases of the templates
    let template_ids: Vec<_> = state
        .pantry_group(group_id)
        .unwrap()
        .items
        .iter()
        .map(|item| item.id)
        .collect();
    assert!(state
        .shopping_list()
        .iter()
        .all(|item| !template_ids.contains(&item.id)));

    // Imported names reached the registry
    assert!(!state.suggest_foods("rice").is_empty());
}

#[test]
fn replanning_a_sent_meal_reopens_the_claim() {
    let mut state = memory_state();
    let pasta = create_test_recipe_with(
        "Pasta al pomodoro",
        RecipeCategory::Main,
        &[("Pasta", 400.0, "g"), ("Tomato sauce", 250.0, "ml")],
    );
    let gratin = create_test_recipe_with(
        "Potato gratin",
        RecipeCategory::Main,
        &[("Potatoes", 800.0, "g"), ("Cream", 200.0, "ml")],
    );
    let pasta_id = state.upsert_recipe(pasta).unwrap();
    let gratin_id = state.upsert_recipe(gratin).unwrap();

    let day = date(2025, 3, 12);
    state.set_meal(day, MealSlot::Dinner, Some(pasta_id)).unwrap();
    state.send_meal_ingredients(day, MealSlot::Dinner).unwrap();
    assert!(state.is_meal_sent(day, MealSlot::Dinner));

    // Swapping the recipe clears the sent marker, and the new meal sends fresh
    state.set_meal(day, MealSlot::Dinner, Some(gratin_id)).unwrap();
    assert!(!state.is_meal_sent(day, MealSlot::Dinner));
    assert_eq!(state.send_meal_ingredients(day, MealSlot::Dinner).unwrap(), 2);

    // Both meals' ingredients are on the list now
    assert_eq!(state.shopping_list().len(), 4);
}
