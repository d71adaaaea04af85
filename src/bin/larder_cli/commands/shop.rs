// ABOUTME: Shopping list commands for larder-cli
// ABOUTME: Handles add, list, check, uncheck, remove, and clear operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

use larder::errors::AppResult;
use larder::state::AppState;

use crate::helpers::{display, resolve};

type Result<T> = AppResult<T>;

/// Add an item to the shopping list through the merge contract
pub fn add(
    state: &mut AppState,
    name: &str,
    amount: f64,
    unit: &str,
    category: Option<String>,
) -> Result<()> {
    state.add_shopping_item(name, amount, unit, category)?;
    println!(
        "Added {} {unit} {name} ({} line(s) total)",
        display::format_amount(amount),
        state.shopping_list().len()
    );
    Ok(())
}

/// List the shopping list, raw or consolidated
pub fn list(state: &AppState, consolidated: bool) {
    if consolidated {
        display::display_consolidated(&state.consolidated_shopping());
    } else {
        display::display_shopping_list(state.shopping_list());
    }
}

/// Mark a line as purchased or not
pub fn set_checked(state: &mut AppState, needle: &str, checked: bool) -> Result<()> {
    let id = resolve::resolve_shopping_item(state, needle)?;
    state.set_item_checked(id, checked)?;
    println!(
        "Marked {} as {}",
        display::short_id(id),
        if checked { "purchased" } else { "open" }
    );
    Ok(())
}

/// Remove a line from the list
pub fn remove(state: &mut AppState, needle: &str) -> Result<()> {
    let id = resolve::resolve_shopping_item(state, needle)?;
    state.remove_shopping_item(id)?;
    println!("Removed {}", display::short_id(id));
    Ok(())
}

/// Clear the list, or only its purchased lines
pub fn clear(state: &mut AppState, checked_only: bool) -> Result<()> {
    let removed = if checked_only {
        state.clear_checked_items()?
    } else {
        state.clear_shopping_list()?
    };
    println!("Removed {removed} line(s)");
    Ok(())
}
