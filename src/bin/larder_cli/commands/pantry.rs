// ABOUTME: Recurring pantry group commands for larder-cli
// ABOUTME: Handles save, list, send, toggle, move, and delete operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

use larder::errors::AppResult;
use larder::models::ShoppingListItem;
use larder::state::AppState;

use crate::helpers::{display, resolve};

type Result<T> = AppResult<T>;

/// Create or replace a group from "name:amount:unit" item arguments
pub fn save(state: &mut AppState, name: &str, items: &[String]) -> Result<()> {
    let mut template = Vec::with_capacity(items.len());
    for raw in items {
        let (item_name, amount, unit) = resolve::parse_triple(raw)?;
        template.push(ShoppingListItem::new(item_name, amount, unit));
    }

    let count = template.len();
    let id = state.save_group(name, template)?;
    println!(
        "Saved group '{name}' with {count} item(s) ({})",
        display::short_id(id)
    );
    Ok(())
}

/// List every group and its items
pub fn list(state: &AppState) {
    display::display_groups(state.pantry_groups());
}

/// Send a group's missing items to the shopping list
pub fn send(state: &mut AppState, group: &str) -> Result<()> {
    let found = resolve::resolve_group(state, group)?;
    let (id, name) = (found.id, found.name.clone());

    let sent = state.send_group_to_shopping(id)?;
    if sent == 0 {
        println!("Everything in '{name}' is already in stock");
    } else {
        println!("Sent {sent} missing item(s) from '{name}' to the shopping list");
    }
    Ok(())
}

/// Toggle an item's in-stock flag
pub fn toggle(state: &mut AppState, group: &str, item: &str) -> Result<()> {
    let found = resolve::resolve_group(state, group)?;
    let group_id = found.id;
    let item_id = resolve::resolve_group_item(found, item)?;

    let in_stock = state.toggle_group_item(group_id, item_id)?;
    println!(
        "Marked {} as {}",
        display::short_id(item_id),
        if in_stock { "in stock" } else { "needed" }
    );
    Ok(())
}

/// Move an item from one group to another
pub fn move_item(state: &mut AppState, item: &str, from: &str, to: &str) -> Result<()> {
    let source = resolve::resolve_group(state, from)?;
    let source_id = source.id;
    let item_id = resolve::resolve_group_item(source, item)?;
    let target = resolve::resolve_group(state, to)?;
    let (target_id, target_name) = (target.id, target.name.clone());

    let moved = state.move_item(item_id, source_id, target_id)?;
    if moved {
        println!("Moved into '{target_name}'");
    } else {
        println!("Nothing to move, the item is already there or gone");
    }
    Ok(())
}

/// Delete a group
pub fn delete(state: &mut AppState, group: &str) -> Result<()> {
    let found = resolve::resolve_group(state, group)?;
    let (id, name) = (found.id, found.name.clone());

    state.delete_group(id)?;
    println!("Deleted group '{name}'");
    Ok(())
}
