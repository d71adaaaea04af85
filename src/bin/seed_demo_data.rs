// ABOUTME: Demo data seeder for the Larder meal planning engine
// ABOUTME: Populates a store with sample recipes, a planned week, groups and reserve items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! Demo data seeder for Larder.
//!
//! Populates a data directory with a small, coherent household: a handful of
//! recipes, a partly planned week, two recurring pantry groups, a stocked
//! reserve and a started shopping list.
//!
//! Usage:
//! ```bash
//! # Seed the default data directory
//! cargo run --bin seed-demo-data
//!
//! # Seed somewhere else
//! cargo run --bin seed-demo-data -- --data-dir /tmp/larder-demo
//!
//! # Wipe existing collections before seeding
//! cargo run --bin seed-demo-data -- --reset
//! ```

use chrono::{Duration, Local, NaiveDate};
use clap::Parser;
use tracing::info;
use uuid::Uuid;

use larder::config::{EngineConfig, StoreBackend};
use larder::errors::AppResult;
use larder::interchange::BackupDocument;
use larder::logging::LoggingConfig;
use larder::models::{
    Ingredient, MealPlan, MealSlot, Recipe, RecipeCategory, SentMeals, ShoppingListItem,
};
use larder::state::AppState;
use larder::store::Store;

type Result<T> = AppResult<T>;

#[derive(Parser)]
#[command(
    name = "seed-demo-data",
    about = "Larder demo data seeder",
    long_about = "Populate a Larder data directory with sample recipes, plans, pantry groups and reserve items"
)]
struct SeedArgs {
    /// Data directory override (or "memory" for a dry run)
    #[arg(long)]
    data_dir: Option<String>,

    /// Wipe existing collections before seeding
    #[arg(long)]
    reset: bool,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = SeedArgs::parse();

    let mut logging = LoggingConfig::from_env();
    if args.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = EngineConfig::from_env()?;
    if let Some(dir) = args.data_dir {
        config.store = StoreBackend::parse_backend(&dir);
    }
    let store = Store::open(&config.store)?;
    let mut state = AppState::load(store);

    if args.reset {
        reset(&mut state)?;
    }

    let recipe_ids = seed_recipes(&mut state)?;
    let planned = seed_plan(&mut state, &recipe_ids)?;
    let groups = seed_groups(&mut state)?;
    let reserved = seed_reserve(&mut state)?;
    let listed = seed_shopping(&mut state)?;
    let foods = state.seed_food_registry()?;

    info!(
        recipes = recipe_ids.len(),
        planned, groups, reserved, listed, foods, "Demo data ready"
    );
    println!(
        "Seeded {} recipes, {planned} planned meals, {groups} groups, {reserved} reserve items",
        recipe_ids.len()
    );
    Ok(())
}

/// Replace every collection with an empty one, keeping settings
fn reset(state: &mut AppState) -> Result<()> {
    let wipe = BackupDocument {
        recipes: Some(Vec::new()),
        meal_plan: Some(MealPlan::new()),
        sent_meals: Some(SentMeals::new()),
        settings: None,
        shopping_list: Some(Vec::new()),
        pantry_groups: Some(Vec::new()),
        reserve_items: Some(Vec::new()),
    };
    let payload = serde_json::to_string(&wipe)?;
    state.import_backup(&payload)?;
    info!("Cleared existing collections");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn build_recipe(
    title: &str,
    category: RecipeCategory,
    servings: u8,
    prep_mins: u16,
    cook_mins: u16,
    description: &str,
    ingredients: &[(&str, f64, &str)],
    steps: &[&str],
    tags: &[&str],
) -> Recipe {
    let mut recipe = Recipe::new(title, category);
    recipe.servings = servings;
    recipe.prep_time_mins = prep_mins;
    recipe.cook_time_mins = cook_mins;
    recipe.description = description.to_owned();
    recipe.ingredients = ingredients
        .iter()
        .map(|(name, amount, unit)| Ingredient::new(*name, *amount, *unit))
        .collect();
    recipe.instructions = steps.iter().map(|step| (*step).to_owned()).collect();
    recipe.tags = tags.iter().map(|tag| (*tag).to_owned()).collect();
    recipe
}

fn seed_recipes(state: &mut AppState) -> Result<Vec<Uuid>> {
    let recipes = vec![
        build_recipe(
            "Spaghetti alla carbonara",
            RecipeCategory::Main,
            4,
            10,
            15,
            "Roman classic with guanciale, eggs and pecorino.",
            &[
                ("Spaghetti", 400.0, "g"),
                ("Guanciale", 150.0, "g"),
                ("Eggs", 4.0, "pcs"),
                ("Pecorino romano", 100.0, "g"),
                ("Black pepper", 1.0, "tsp"),
            ],
            &[
                "Boil the spaghetti in well-salted water.",
                "Render the guanciale until crisp.",
                "Whisk eggs with grated pecorino and plenty of pepper.",
                "Toss pasta with guanciale off the heat, then fold in the egg mixture.",
            ],
            &[],
        ),
        build_recipe(
            "Red lentil soup",
            RecipeCategory::Starter,
            4,
            10,
            25,
            "Weeknight soup that freezes well.",
            &[
                ("Red lentils", 300.0, "g"),
                ("Onion", 1.0, "pcs"),
                ("Carrots", 2.0, "pcs"),
                ("Vegetable stock", 1.0, "l"),
                ("Cumin", 1.0, "tsp"),
            ],
            &[
                "Sweat the chopped onion and carrots.",
                "Add lentils, cumin and stock.",
                "Simmer until the lentils fall apart, then blend roughly.",
            ],
            &["vegetarian"],
        ),
        build_recipe(
            "Greek salad",
            RecipeCategory::Side,
            2,
            15,
            0,
            "No-cook side for warm evenings.",
            &[
                ("Tomatoes", 4.0, "pcs"),
                ("Cucumber", 1.0, "pcs"),
                ("Feta", 200.0, "g"),
                ("Kalamata olives", 100.0, "g"),
                ("Olive oil", 3.0, "tbsp"),
            ],
            &[
                "Cut the vegetables into rough chunks.",
                "Top with feta, olives and olive oil.",
            ],
            &["vegetarian"],
        ),
        build_recipe(
            "Buttermilk pancakes",
            RecipeCategory::Breakfast,
            4,
            10,
            20,
            "Weekend stack, holds well in a low oven.",
            &[
                ("Flour", 250.0, "g"),
                ("Buttermilk", 0.5, "l"),
                ("Eggs", 2.0, "pcs"),
                ("Butter", 50.0, "g"),
                ("Sugar", 2.0, "tbsp"),
            ],
            &[
                "Whisk the dry ingredients.",
                "Fold in buttermilk, eggs and melted butter.",
                "Cook ladlefuls on a medium griddle until bubbles set.",
            ],
            &["vegetarian"],
        ),
    ];

    let mut ids = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        ids.push(state.upsert_recipe(recipe)?);
    }
    Ok(ids)
}

fn seed_plan(state: &mut AppState, recipe_ids: &[Uuid]) -> Result<usize> {
    let today: NaiveDate = Local::now().date_naive();
    let slots: &[(i64, MealSlot, usize)] = &[
        (0, MealSlot::Dinner, 0),
        (1, MealSlot::Lunch, 2),
        (1, MealSlot::Dinner, 1),
        (2, MealSlot::Lunch, 3),
    ];

    let mut planned = 0;
    for &(offset, slot, recipe_index) in slots {
        if let Some(&id) = recipe_ids.get(recipe_index) {
            state.set_meal(today + Duration::days(offset), slot, Some(id))?;
            planned += 1;
        }
    }
    Ok(planned)
}

fn seed_groups(state: &mut AppState) -> Result<usize> {
    let weekly = vec![
        ShoppingListItem::new("Rice", 500.0, "g"),
        ShoppingListItem::new("Pasta", 500.0, "g"),
        ShoppingListItem::new("Olive oil", 1.0, "l"),
        ShoppingListItem::new("Eggs", 10.0, "pcs"),
        ShoppingListItem::new("Milk", 2.0, "l"),
    ];
    state.save_group("Weekly staples", weekly)?;

    let breakfast = vec![
        ShoppingListItem::new("Rolled oats", 500.0, "g"),
        ShoppingListItem::new("Honey", 1.0, "pcs"),
        ShoppingListItem::new("Coffee beans", 250.0, "g"),
    ];
    state.save_group("Breakfast corner", breakfast)?;

    Ok(2)
}

fn seed_reserve(state: &mut AppState) -> Result<usize> {
    let items: &[(&str, f64, &str)] = &[
        ("Rice", 1.0, "kg"),
        ("Olive oil", 1.0, "l"),
        ("Canned tomatoes", 3.0, "pcs"),
        ("Onions", 4.0, "pcs"),
    ];
    let mut added = 0;
    for &(name, amount, unit) in items {
        if state.add_reserve_item(name, amount, unit)? {
            added += 1;
        }
    }
    Ok(added)
}

fn seed_shopping(state: &mut AppState) -> Result<usize> {
    state.add_shopping_item("Dish soap", 1.0, "pcs", Some("household".to_owned()))?;
    state.add_shopping_item("Sparkling water", 6.0, "pcs", None)?;
    Ok(2)
}
