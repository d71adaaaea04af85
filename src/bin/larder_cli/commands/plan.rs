// ABOUTME: Meal planner commands for larder-cli
// ABOUTME: Handles set, clear, show, and send operations for planned meals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

use chrono::{Duration, Local};

use larder::errors::AppResult;
use larder::models::MealSlot;
use larder::state::AppState;

use crate::helpers::{display, resolve};

type Result<T> = AppResult<T>;

/// Assign a recipe to a date and slot
pub fn set(state: &mut AppState, date: &str, slot: &str, recipe: &str) -> Result<()> {
    let date = resolve::parse_date(date)?;
    let slot: MealSlot = slot.parse()?;
    let found = resolve::resolve_recipe(state, recipe)?;
    let (id, title) = (found.id, found.title.clone());

    state.set_meal(date, slot, Some(id))?;
    println!("Planned '{title}' for {date} {slot}");
    Ok(())
}

/// Clear a date and slot
pub fn clear(state: &mut AppState, date: &str, slot: &str) -> Result<()> {
    let date = resolve::parse_date(date)?;
    let slot: MealSlot = slot.parse()?;

    state.set_meal(date, slot, None)?;
    println!("Cleared {date} {slot}");
    Ok(())
}

/// Show the plan for a date range, defaulting to the week from today
pub fn show(state: &AppState, from: Option<&str>, to: Option<&str>) -> Result<()> {
    let from = match from {
        Some(raw) => resolve::parse_date(raw)?,
        None => Local::now().date_naive(),
    };
    let to = match to {
        Some(raw) => resolve::parse_date(raw)?,
        None => from + Duration::days(6),
    };

    let days = state.plan_range(from, to);
    display::display_plan(state, &days);
    Ok(())
}

/// Send a planned meal's ingredients to the shopping list
pub fn send(state: &mut AppState, date: &str, slot: &str) -> Result<()> {
    let date = resolve::parse_date(date)?;
    let slot: MealSlot = slot.parse()?;

    if state.is_meal_sent(date, slot) {
        println!("Note: this meal was already sent; amounts will sum again.");
    }
    let sent = state.send_meal_ingredients(date, slot)?;
    println!("Sent {sent} ingredient line(s) to the shopping list");
    Ok(())
}
