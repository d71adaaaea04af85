// ABOUTME: Recurring-list manager owning pantry groups and the in-stock tracker
// ABOUTME: Handles group save/move/send-to-shopping plus reserve item bookkeeping
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Recurring-List Manager
//!
//! Pantry groups are named, reusable shopping templates ("weekly staples").
//! Inside a group, an item's `checked` flag means "already in stock", and
//! sending a group to shopping pushes only the unchecked items through the
//! reconciler.
//!
//! The reserve collection tracks items currently held at home, separate from
//! both the templates and the active shopping list.

use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{normalize_name, PantryGroup, ShoppingListItem};
use crate::shopping::ItemDemand;
use crate::state::AppState;

impl AppState {
    /// Look up a group by id
    #[must_use]
    pub fn pantry_group(&self, group_id: Uuid) -> Option<&PantryGroup> {
        self.pantry_groups.iter().find(|g| g.id == group_id)
    }

    /// Look up a group by name, case-insensitively
    #[must_use]
    pub fn pantry_group_by_name(&self, name: &str) -> Option<&PantryGroup> {
        let needle = normalize_name(name);
        self.pantry_groups
            .iter()
            .find(|g| normalize_name(&g.name) == needle)
    }

    /// Create a group, or replace an existing group's items wholesale
    ///
    /// Groups match by case-insensitive name; an existing group keeps its id
    /// and stored spelling. Items are sorted by name before storage and their
    /// names feed the registry.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the name is blank, or a storage error when
    /// persistence fails
    pub fn save_group(
        &mut self,
        name: &str,
        items: Vec<ShoppingListItem>,
    ) -> AppResult<Uuid> {
        if name.trim().is_empty() {
            return Err(AppError::invalid_input("Group name cannot be empty"));
        }

        let entries: Vec<(String, f64, String)> = items
            .iter()
            .map(|i| (i.name.clone(), i.amount, i.unit.clone()))
            .collect();

        let needle = normalize_name(name);
        let group_id = match self
            .pantry_groups
            .iter_mut()
            .find(|g| normalize_name(&g.name) == needle)
        {
            Some(group) => {
                group.items = items;
                group.sort_items();
                group.id
            }
            None => {
                let mut group = PantryGroup::new(name.trim());
                group.items = items;
                group.sort_items();
                let id = group.id;
                self.pantry_groups.push(group);
                id
            }
        };

        self.persist_pantry_groups()?;
        self.register_foods(entries)?;
        debug!(group = %name, "Saved pantry group");
        Ok(group_id)
    }

    /// Move an item from one group to another
    ///
    /// Silent no-op (returns `false`) when source equals target, the source
    /// group is gone, or the item is no longer in the source — a repeated
    /// identical move request lands here harmlessly. The moved item keeps its
    /// identity and the target is re-sorted by name.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the target group does not exist, or a
    /// storage error when persistence fails
    pub fn move_item(
        &mut self,
        item_id: Uuid,
        source_group_id: Uuid,
        target_group_id: Uuid,
    ) -> AppResult<bool> {
        if source_group_id == target_group_id {
            return Ok(false);
        }
        let Some(source_idx) = self
            .pantry_groups
            .iter()
            .position(|g| g.id == source_group_id)
        else {
            return Ok(false);
        };
        let Some(item_idx) = self.pantry_groups[source_idx]
            .items
            .iter()
            .position(|i| i.id == item_id)
        else {
            return Ok(false);
        };
        let target_idx = self
            .pantry_groups
            .iter()
            .position(|g| g.id == target_group_id)
            .ok_or_else(|| AppError::not_found(format!("pantry group {target_group_id}")))?;

        let item = self.pantry_groups[source_idx].items.remove(item_idx);
        debug!(item = %item.name, "Moving item between pantry groups");
        self.pantry_groups[target_idx].items.push(item);
        self.pantry_groups[target_idx].sort_items();

        self.persist_pantry_groups()?;
        Ok(true)
    }

    /// Push a group's not-in-stock items through the shopping reconciler
    ///
    /// Each sent item reaches the list as a fresh line (new identity), never
    /// aliasing the template it came from. Items already in stock stay home.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the group does not exist, or a storage
    /// error when persistence fails
    pub fn send_group_to_shopping(&mut self, group_id: Uuid) -> AppResult<usize> {
        let group = self
            .pantry_groups
            .iter()
            .find(|g| g.id == group_id)
            .ok_or_else(|| AppError::not_found(format!("pantry group {group_id}")))?;

        let demands: Vec<ItemDemand> = group
            .items
            .iter()
            .filter(|item| !item.checked)
            .map(ItemDemand::from)
            .collect();
        let sent = demands.len();

        self.merge_into_shopping(&demands)?;
        debug!(group = %group_id, sent, "Sent pantry group to shopping");
        Ok(sent)
    }

    /// Flip a template item's in-stock flag, returning the new state
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the group or item does not exist
    pub fn toggle_group_item(&mut self, group_id: Uuid, item_id: Uuid) -> AppResult<bool> {
        let group = self
            .pantry_groups
            .iter_mut()
            .find(|g| g.id == group_id)
            .ok_or_else(|| AppError::not_found(format!("pantry group {group_id}")))?;
        let item = group
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found(format!("pantry item {item_id}")))?;

        item.checked = !item.checked;
        let now_in_stock = item.checked;
        self.persist_pantry_groups()?;
        Ok(now_in_stock)
    }

    /// Delete a group outright
    ///
    /// Unrecoverable at this level; any confirmation step belongs to the
    /// calling layer.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the group does not exist
    pub fn delete_group(&mut self, group_id: Uuid) -> AppResult<()> {
        let before = self.pantry_groups.len();
        self.pantry_groups.retain(|g| g.id != group_id);
        if self.pantry_groups.len() == before {
            return Err(AppError::not_found(format!("pantry group {group_id}")));
        }
        self.persist_pantry_groups()
    }

    // ================================
    // In-stock (reserve) tracking
    // ================================

    /// Add an item to the home inventory
    ///
    /// Returns `false` without changes when an item of the same name
    /// (case-insensitive) is already tracked, matching the sheet-import
    /// contract.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the name is blank, `ValueOutOfRange` for a
    /// negative amount, or a storage error when persistence fails
    pub fn add_reserve_item(
        &mut self,
        name: &str,
        amount: f64,
        unit: &str,
    ) -> AppResult<bool> {
        if name.trim().is_empty() {
            return Err(AppError::invalid_input("Item name cannot be empty"));
        }
        if amount < 0.0 {
            return Err(AppError::out_of_range("Item amount cannot be negative"));
        }
        let needle = normalize_name(name);
        if self
            .reserve_items
            .iter()
            .any(|i| normalize_name(&i.name) == needle)
        {
            return Ok(false);
        }

        self.reserve_items
            .push(ShoppingListItem::new(name.trim(), amount, unit));
        self.persist_reserve_items()?;
        self.register_foods(vec![(name.to_owned(), amount, unit.to_owned())])?;
        Ok(true)
    }

    /// Update a tracked item's quantity
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a negative amount and `ResourceNotFound`
    /// when no tracked item has the given id
    pub fn update_reserve_amount(&mut self, item_id: Uuid, amount: f64) -> AppResult<()> {
        if amount < 0.0 {
            return Err(AppError::out_of_range("Amount must not be negative"));
        }
        let item = self
            .reserve_items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found(format!("reserve item {item_id}")))?;
        item.amount = amount;
        self.persist_reserve_items()
    }

    /// Remove an item from the home inventory
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when no tracked item has the given id
    pub fn remove_reserve_item(&mut self, item_id: Uuid) -> AppResult<()> {
        let before = self.reserve_items.len();
        self.reserve_items.retain(|i| i.id != item_id);
        if self.reserve_items.len() == before {
            return Err(AppError::not_found(format!("reserve item {item_id}")));
        }
        self.persist_reserve_items()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, Store};

    fn memory_state() -> AppState {
        AppState::load(Store::Memory(MemoryStore::new()))
    }

    fn template_item(name: &str, in_stock: bool) -> ShoppingListItem {
        let mut item = ShoppingListItem::new(name, 1.0, "pcs");
        item.checked = in_stock;
        item
    }

    #[test]
    fn save_group_sorts_and_replaces_wholesale() {
        let mut state = memory_state();
        state
            .save_group(
                "Weekly",
                vec![template_item("Riz", false), template_item("Beurre", false)],
            )
            .unwrap();
        let group = state.pantry_group_by_name("weekly").unwrap();
        assert_eq!(group.items[0].name, "Beurre");
        let first_id = group.id;

        state
            .save_group("WEEKLY", vec![template_item("Lait", false)])
            .unwrap();
        assert_eq!(state.pantry_groups().len(), 1);
        let group = state.pantry_group_by_name("Weekly").unwrap();
        assert_eq!(group.id, first_id);
        assert_eq!(group.name, "Weekly");
        assert_eq!(group.items.len(), 1);
        assert_eq!(group.items[0].name, "Lait");
    }

    #[test]
    fn move_is_a_partition_and_replay_is_silent() {
        let mut state = memory_state();
        let item = template_item("Farine", false);
        let item_id = item.id;
        let source = state.save_group("A", vec![item]).unwrap();
        let target = state.save_group("B", vec![]).unwrap();

        assert!(state.move_item(item_id, source, target).unwrap());
        assert!(state.pantry_group(source).unwrap().items.is_empty());
        assert_eq!(state.pantry_group(target).unwrap().items.len(), 1);

        // replaying the identical request finds nothing in the source
        assert!(!state.move_item(item_id, source, target).unwrap());
        assert_eq!(state.pantry_group(target).unwrap().items.len(), 1);

        // same source and target is a no-op
        assert!(!state.move_item(item_id, target, target).unwrap());
    }

    #[test]
    fn move_to_missing_target_fails_without_losing_the_item() {
        let mut state = memory_state();
        let item = template_item("Sucre", false);
        let item_id = item.id;
        let source = state.save_group("A", vec![item]).unwrap();

        let err = state.move_item(item_id, source, Uuid::new_v4());
        assert!(err.is_err());
        assert_eq!(state.pantry_group(source).unwrap().items.len(), 1);
    }

    #[test]
    fn send_group_skips_items_in_stock() {
        let mut state = memory_state();
        let group_id = state
            .save_group(
                "Staples",
                vec![template_item("Riz", true), template_item("Pâtes", false)],
            )
            .unwrap();

        let sent = state.send_group_to_shopping(group_id).unwrap();
        assert_eq!(sent, 1);
        assert_eq!(state.shopping_list().len(), 1);
        assert_eq!(state.shopping_list()[0].name, "Pâtes");
        // a fresh identity, not the template item's
        let template = &state.pantry_group(group_id).unwrap().items;
        assert!(template.iter().all(|t| t.id != state.shopping_list()[0].id));
    }

    #[test]
    fn toggle_flips_in_stock_flag() {
        let mut state = memory_state();
        let item = template_item("Sel", false);
        let item_id = item.id;
        let group_id = state.save_group("Base", vec![item]).unwrap();

        assert!(state.toggle_group_item(group_id, item_id).unwrap());
        assert!(!state.toggle_group_item(group_id, item_id).unwrap());
        assert!(state.toggle_group_item(group_id, Uuid::new_v4()).is_err());
    }

    #[test]
    fn reserve_add_skips_known_names() {
        let mut state = memory_state();
        assert!(state.add_reserve_item("Huile", 1.0, "l").unwrap());
        assert!(!state.add_reserve_item("huile", 2.0, "l").unwrap());
        assert_eq!(state.reserve_items().len(), 1);
        assert!((state.reserve_items()[0].amount - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn reserve_amounts_must_not_be_negative() {
        let mut state = memory_state();
        assert!(state.add_reserve_item("Eggs", -1.0, "pcs").is_err());
        assert!(state.reserve_items().is_empty());

        state.add_reserve_item("Eggs", 6.0, "pcs").unwrap();
        let id = state.reserve_items()[0].id;
        assert!(state.update_reserve_amount(id, -2.0).is_err());
        assert!((state.reserve_items()[0].amount - 6.0).abs() < f64::EPSILON);
    }
}
