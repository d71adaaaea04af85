// ABOUTME: Shopping list reconciler merging ingredient demands into the shared list
// ABOUTME: Deduplicates by normalized name and exact unit, with non-destructive consolidation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Shopping List Reconciler
//!
//! New ingredient demands — from planned meals, recurring groups or direct
//! entry — are merged into the shared shopping list here. Two lines are the
//! same when their normalized names and exact units coincide; amounts sum
//! into the first unchecked match, while a checked match stays closed and
//! the demand lands on a new line.
//!
//! [`consolidate`] is the separate, non-destructive display grouping used to
//! review a trip before finalizing; it never mutates the underlying list.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{normalize_name, Ingredient, ShoppingListItem};
use crate::state::AppState;

/// An incoming quantity demand, before it has a shopping-list identity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDemand {
    /// Item name as entered
    pub name: String,
    /// Quantity demanded
    pub amount: f64,
    /// Free-form unit string
    pub unit: String,
    /// Optional category label carried onto a newly created line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ItemDemand {
    /// Create a demand
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
            category: None,
        }
    }
}

impl From<&Ingredient> for ItemDemand {
    fn from(ingredient: &Ingredient) -> Self {
        Self::new(
            ingredient.name.clone(),
            ingredient.amount,
            ingredient.unit.clone(),
        )
    }
}

impl From<&ShoppingListItem> for ItemDemand {
    fn from(item: &ShoppingListItem) -> Self {
        Self {
            name: item.name.clone(),
            amount: item.amount,
            unit: item.unit.clone(),
            category: item.category.clone(),
        }
    }
}

/// One display row produced by consolidation
///
/// Carries a freshly generated display identifier on every call; it is not a
/// handle into the underlying list.
#[derive(Debug, Clone, Serialize)]
pub struct ConsolidatedLine {
    /// Display identifier, fresh per consolidation pass
    pub id: Uuid,
    /// Spelling of the first occurrence in the list
    pub name: String,
    /// Summed amount across all matching lines
    pub amount: f64,
    /// Unit shared by the grouped lines
    pub unit: String,
}

/// Merge incoming demands into a shopping list
///
/// For each demand, the first existing line with equal normalized name and
/// exact unit that is not checked absorbs the amount. When only checked
/// matches exist the demand becomes a new, separate line: a checked line is a
/// closed purchase, and reopening it silently would hide a new need. Demands
/// appended earlier in the same call are merge targets for later ones.
///
/// The merge is commutative and associative in aggregate amount per key, but
/// not idempotent: merging the same demand twice doubles it.
#[must_use]
pub fn merge(current: &[ShoppingListItem], incoming: &[ItemDemand]) -> Vec<ShoppingListItem> {
    let mut list = current.to_vec();
    for demand in incoming {
        match list
            .iter_mut()
            .find(|item| !item.checked && item.is_same_line(&demand.name, &demand.unit))
        {
            Some(open_line) => {
                open_line.amount += demand.amount;
            }
            None => {
                let mut item =
                    ShoppingListItem::new(demand.name.clone(), demand.amount, demand.unit.clone());
                item.category = demand.category.clone();
                list.push(item);
            }
        }
    }
    list
}

/// Group list lines by normalized name and unit for display
///
/// All lines participate regardless of checked state; each group keeps the
/// first occurrence's spelling and sums its amounts. The underlying list is
/// untouched — finalizing a trip is a separate, explicit clear.
#[must_use]
pub fn consolidate(items: &[ShoppingListItem]) -> Vec<ConsolidatedLine> {
    let mut lines: Vec<ConsolidatedLine> = Vec::new();
    for item in items {
        match lines.iter_mut().find(|line| {
            normalize_name(&line.name) == normalize_name(&item.name) && line.unit == item.unit
        }) {
            Some(line) => line.amount += item.amount,
            None => lines.push(ConsolidatedLine {
                id: Uuid::new_v4(),
                name: item.name.clone(),
                amount: item.amount,
                unit: item.unit.clone(),
            }),
        }
    }
    lines
}

impl AppState {
    /// Merge demands into the shopping list and persist it
    ///
    /// New item names feed the food-portion registry.
    ///
    /// # Errors
    ///
    /// Returns a storage error when persistence fails; the in-memory list
    /// keeps the merged result either way
    pub fn merge_into_shopping(&mut self, demands: &[ItemDemand]) -> AppResult<()> {
        if demands.is_empty() {
            return Ok(());
        }
        self.shopping_list = merge(&self.shopping_list, demands);
        debug!(
            incoming = demands.len(),
            total = self.shopping_list.len(),
            "Merged demands into shopping list"
        );
        self.persist_shopping_list()?;

        let entries: Vec<(String, f64, String)> = demands
            .iter()
            .map(|d| (d.name.clone(), d.amount, d.unit.clone()))
            .collect();
        self.register_foods(entries)?;
        Ok(())
    }

    /// Add a single item to the shopping list through the merge contract
    ///
    /// The category label only lands when the demand opens a new line; merging
    /// into an existing line keeps that line's category.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the name is blank, or a storage error when
    /// persistence fails
    pub fn add_shopping_item(
        &mut self,
        name: &str,
        amount: f64,
        unit: &str,
        category: Option<String>,
    ) -> AppResult<()> {
        if name.trim().is_empty() {
            return Err(AppError::invalid_input("Item name cannot be empty"));
        }
        if amount < 0.0 {
            return Err(AppError::out_of_range("Item amount cannot be negative"));
        }
        let mut demand = ItemDemand::new(name, amount, unit);
        demand.category = category;
        self.merge_into_shopping(&[demand])
    }

    /// Set an item's checked flag
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no line has the given id
    pub fn set_item_checked(&mut self, item_id: Uuid, checked: bool) -> AppResult<()> {
        let item = self
            .shopping_list
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or_else(|| AppError::not_found(format!("shopping item {item_id}")))?;
        item.checked = checked;
        self.persist_shopping_list()
    }

    /// Remove a single line from the shopping list
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no line has the given id
    pub fn remove_shopping_item(&mut self, item_id: Uuid) -> AppResult<()> {
        let before = self.shopping_list.len();
        self.shopping_list.retain(|item| item.id != item_id);
        if self.shopping_list.len() == before {
            return Err(AppError::not_found(format!("shopping item {item_id}")));
        }
        self.persist_shopping_list()
    }

    /// Drop every checked line, keeping open ones
    ///
    /// # Errors
    ///
    /// Returns a storage error when persistence fails
    pub fn clear_checked_items(&mut self) -> AppResult<usize> {
        let before = self.shopping_list.len();
        self.shopping_list.retain(|item| !item.checked);
        let removed = before - self.shopping_list.len();
        if removed > 0 {
            self.persist_shopping_list()?;
        }
        debug!(removed, "Cleared checked shopping items");
        Ok(removed)
    }

    /// Finalize a trip by clearing the whole list
    ///
    /// # Errors
    ///
    /// Returns a storage error when persistence fails
    pub fn clear_shopping_list(&mut self) -> AppResult<usize> {
        let removed = self.shopping_list.len();
        self.shopping_list.clear();
        self.persist_shopping_list()?;
        debug!(removed, "Cleared shopping list");
        Ok(removed)
    }

    /// Consolidated display rows for the current list
    #[must_use]
    pub fn consolidated_shopping(&self) -> Vec<ConsolidatedLine> {
        consolidate(&self.shopping_list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, amount: f64, unit: &str, checked: bool) -> ShoppingListItem {
        let mut item = ShoppingListItem::new(name, amount, unit);
        item.checked = checked;
        item
    }

    #[test]
    fn merge_sums_into_unchecked_line_case_insensitively() {
        let current = vec![item("Pâtes", 200.0, "g", false)];
        let merged = merge(&current, &[ItemDemand::new("pâtes", 100.0, "g")]);
        assert_eq!(merged.len(), 1);
        assert!((merged[0].amount - 300.0).abs() < f64::EPSILON);
        assert_eq!(merged[0].name, "Pâtes");
    }

    #[test]
    fn merge_appends_next_to_checked_line() {
        let current = vec![item("Riz", 500.0, "g", true)];
        let merged = merge(&current, &[ItemDemand::new("Riz", 200.0, "g")]);
        assert_eq!(merged.len(), 2);
        assert!((merged[0].amount - 500.0).abs() < f64::EPSILON);
        assert!(merged[0].checked);
        assert!((merged[1].amount - 200.0).abs() < f64::EPSILON);
        assert!(!merged[1].checked);
    }

    #[test]
    fn merge_distinguishes_units_exactly() {
        let current = vec![item("Lait", 1.0, "l", false)];
        let merged = merge(&current, &[ItemDemand::new("Lait", 200.0, "ml")]);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn later_demands_target_lines_appended_earlier_in_same_call() {
        let merged = merge(
            &[],
            &[
                ItemDemand::new("Oignons", 2.0, "pcs"),
                ItemDemand::new("oignons", 3.0, "pcs"),
            ],
        );
        assert_eq!(merged.len(), 1);
        assert!((merged[0].amount - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn merge_is_not_idempotent() {
        let demand = [ItemDemand::new("Beurre", 250.0, "g")];
        let once = merge(&[], &demand);
        let twice = merge(&once, &demand);
        assert_eq!(twice.len(), 1);
        assert!((twice[0].amount - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn consolidate_sums_across_checked_state_and_keeps_first_spelling() {
        let items = vec![
            item("Pâtes", 200.0, "g", false),
            item("pâtes", 300.0, "g", true),
            item("Riz", 100.0, "g", false),
        ];
        let lines = consolidate(&items);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Pâtes");
        assert!((lines[0].amount - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn consolidate_is_idempotent_on_totals_but_not_identity() {
        let items = vec![
            item("Œufs", 6.0, "pcs", false),
            item("œufs", 6.0, "pcs", false),
        ];
        let first = consolidate(&items);
        let second = consolidate(&items);
        assert_eq!(first.len(), second.len());
        assert!((first[0].amount - second[0].amount).abs() < f64::EPSILON);
        assert_ne!(first[0].id, second[0].id);
    }

    #[test]
    fn consolidate_leaves_input_untouched() {
        let items = vec![
            item("Tomates", 4.0, "pcs", false),
            item("tomates", 2.0, "pcs", false),
        ];
        let _ = consolidate(&items);
        assert_eq!(items.len(), 2);
        assert!((items[0].amount - 4.0).abs() < f64::EPSILON);
    }
}
