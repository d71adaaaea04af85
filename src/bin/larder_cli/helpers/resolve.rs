// ABOUTME: Argument resolution helpers for larder-cli
// ABOUTME: Turns dates, "name:amount:unit" triples and id-or-name needles into engine values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

use chrono::NaiveDate;
use uuid::Uuid;

use larder::constants::defaults;
use larder::errors::{AppError, AppResult};
use larder::models::{normalize_name, PantryGroup, Recipe, ShoppingListItem};
use larder::state::AppState;

/// Parse a `YYYY-MM-DD` date argument
pub fn parse_date(raw: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::invalid_input(format!("Invalid date '{raw}', expected YYYY-MM-DD")))
}

/// Parse a `name:amount:unit` argument
///
/// Amount and unit may be omitted (`Rice`, `Rice:500`); missing parts fall
/// back to the engine defaults.
pub fn parse_triple(raw: &str) -> AppResult<(String, f64, String)> {
    let mut parts = raw.splitn(3, ':');
    let name = parts.next().unwrap_or("").trim();
    if name.is_empty() {
        return Err(AppError::invalid_input(format!(
            "Invalid item '{raw}', expected name:amount:unit"
        )));
    }
    let amount = match parts.next().map(str::trim) {
        None | Some("") => defaults::QUANTITY,
        Some(digits) => digits.parse().map_err(|_| {
            AppError::invalid_input(format!("Invalid amount '{digits}' in '{raw}'"))
        })?,
    };
    let unit = parts
        .next()
        .map(str::trim)
        .filter(|unit| !unit.is_empty())
        .unwrap_or(defaults::UNIT);
    Ok((name.to_string(), amount, unit.to_string()))
}

/// Pick the single candidate a needle designates
///
/// Tries, in order: exact id, unique normalized-name equality, unique id
/// prefix. Several matches at a stage are an error rather than an arbitrary
/// pick.
fn pick_one<'a, T>(
    candidates: &[&'a T],
    needle: &str,
    kind: &str,
    id_of: impl Fn(&T) -> Uuid,
    name_of: impl Fn(&T) -> &str,
) -> AppResult<&'a T> {
    if let Ok(id) = Uuid::parse_str(needle) {
        return candidates
            .iter()
            .copied()
            .find(|candidate| id_of(candidate) == id)
            .ok_or_else(|| AppError::not_found(format!("{kind} {needle}")));
    }

    let wanted = normalize_name(needle);
    let by_name: Vec<&T> = candidates
        .iter()
        .copied()
        .filter(|candidate| normalize_name(name_of(candidate)) == wanted)
        .collect();
    if by_name.len() > 1 {
        return Err(AppError::invalid_input(format!(
            "{kind} '{needle}' matches several entries, use an id"
        )));
    }
    if let Some(&found) = by_name.first() {
        return Ok(found);
    }

    let prefix = needle.to_lowercase();
    let by_prefix: Vec<&T> = candidates
        .iter()
        .copied()
        .filter(|candidate| id_of(candidate).to_string().starts_with(&prefix))
        .collect();
    if by_prefix.len() > 1 {
        return Err(AppError::invalid_input(format!(
            "{kind} id prefix '{needle}' matches several entries"
        )));
    }
    by_prefix
        .first()
        .copied()
        .ok_or_else(|| AppError::not_found(format!("{kind} '{needle}'")))
}

/// Resolve a recipe by id, id prefix, or title
pub fn resolve_recipe<'a>(state: &'a AppState, needle: &str) -> AppResult<&'a Recipe> {
    let candidates: Vec<&Recipe> = state.recipes().iter().collect();
    pick_one(&candidates, needle, "recipe", |r| r.id, |r| r.title.as_str())
}

/// Resolve a pantry group by id, id prefix, or name
pub fn resolve_group<'a>(state: &'a AppState, needle: &str) -> AppResult<&'a PantryGroup> {
    let candidates: Vec<&PantryGroup> = state.pantry_groups().iter().collect();
    pick_one(
        &candidates,
        needle,
        "pantry group",
        |g| g.id,
        |g| g.name.as_str(),
    )
}

/// Resolve an item inside a pantry group, returning its id
pub fn resolve_group_item(group: &PantryGroup, needle: &str) -> AppResult<Uuid> {
    let candidates: Vec<&ShoppingListItem> = group.items.iter().collect();
    pick_one(
        &candidates,
        needle,
        "group item",
        |i| i.id,
        |i| i.name.as_str(),
    )
    .map(|item| item.id)
}

/// Resolve a shopping list line, returning its id
pub fn resolve_shopping_item(state: &AppState, needle: &str) -> AppResult<Uuid> {
    let candidates: Vec<&ShoppingListItem> = state.shopping_list().iter().collect();
    pick_one(
        &candidates,
        needle,
        "shopping item",
        |i| i.id,
        |i| i.name.as_str(),
    )
    .map(|item| item.id)
}

/// Resolve an in-stock reserve item, returning its id
pub fn resolve_reserve_item(state: &AppState, needle: &str) -> AppResult<Uuid> {
    let candidates: Vec<&ShoppingListItem> = state.reserve_items().iter().collect();
    pick_one(
        &candidates,
        needle,
        "reserve item",
        |i| i.id,
        |i| i.name.as_str(),
    )
    .map(|item| item.id)
}
