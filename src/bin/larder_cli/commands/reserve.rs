// ABOUTME: In-stock reserve commands for larder-cli
// ABOUTME: Handles add, list, update, and remove operations for held items
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

use larder::errors::AppResult;
use larder::state::AppState;

use crate::helpers::{display, resolve};

type Result<T> = AppResult<T>;

/// Add an item to the reserve
pub fn add(state: &mut AppState, name: &str, amount: f64, unit: &str) -> Result<()> {
    let added = state.add_reserve_item(name, amount, unit)?;
    if added {
        println!(
            "Added {} {unit} {name} to the reserve",
            display::format_amount(amount)
        );
    } else {
        println!("'{name}' is already in the reserve");
    }
    Ok(())
}

/// List the reserve
pub fn list(state: &AppState) {
    display::display_reserve(state.reserve_items());
}

/// Update a reserve item's quantity
pub fn update(state: &mut AppState, needle: &str, amount: f64) -> Result<()> {
    let id = resolve::resolve_reserve_item(state, needle)?;
    state.update_reserve_amount(id, amount)?;
    println!(
        "Updated {} to {}",
        display::short_id(id),
        display::format_amount(amount)
    );
    Ok(())
}

/// Remove an item from the reserve
pub fn remove(state: &mut AppState, needle: &str) -> Result<()> {
    let id = resolve::resolve_reserve_item(state, needle)?;
    state.remove_reserve_item(id)?;
    println!("Removed {}", display::short_id(id));
    Ok(())
}
