// ABOUTME: Meal plan tracker mapping calendar dates to recipes for lunch and dinner slots
// ABOUTME: Tracks sent markers recording which planned meals already reached the shopping list
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Meal Plan Tracker
//!
//! Each calendar date carries at most one recipe per slot (`lunch`,
//! `dinner`). A parallel set of sent markers records which `date-slot` pairs
//! already had their ingredients transferred to the shopping list; changing a
//! slot's assignment clears its marker, because the old claim no longer
//! holds for the new recipe.

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::{DayPlan, MealMarker, MealSlot, Recipe};
use crate::shopping::ItemDemand;
use crate::state::AppState;

impl AppState {
    /// Assign a recipe to a slot, or clear the slot with `None`
    ///
    /// Only the targeted slot changes; the other slot of the same day is
    /// untouched. A day whose slots are both empty afterwards is dropped from
    /// the plan. Any sent marker for the slot is cleared.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when assigning a recipe id that is not in
    /// the library, or a storage error when persistence fails
    pub fn set_meal(
        &mut self,
        date: NaiveDate,
        slot: MealSlot,
        recipe_id: Option<Uuid>,
    ) -> AppResult<()> {
        if let Some(id) = recipe_id {
            if self.recipe(id).is_none() {
                return Err(AppError::not_found(format!("recipe {id}")));
            }
        }

        let day = self.meal_plan.entry(date).or_default();
        *day.slot_mut(slot) = recipe_id;
        if day.is_empty() {
            self.meal_plan.remove(&date);
        }

        let marker_cleared = self.sent_meals.remove(&MealMarker::new(date, slot));
        debug!(%date, %slot, assigned = recipe_id.is_some(), marker_cleared, "Updated meal plan");

        self.persist_meal_plan()?;
        if marker_cleared {
            self.persist_sent_meals()?;
        }
        Ok(())
    }

    /// The recipe planned for a slot, if assigned and still in the library
    #[must_use]
    pub fn planned_recipe(&self, date: NaiveDate, slot: MealSlot) -> Option<&Recipe> {
        self.meal_plan
            .get(&date)
            .and_then(|day| day.slot(slot))
            .and_then(|id| self.recipe(id))
    }

    /// Whether a slot's ingredients were already sent to shopping
    #[must_use]
    pub fn is_meal_sent(&self, date: NaiveDate, slot: MealSlot) -> bool {
        self.sent_meals.contains(&MealMarker::new(date, slot))
    }

    /// Send a planned slot's ingredients through the shopping reconciler
    ///
    /// Ingredients go in unscaled, at the recipe's base servings, and the
    /// slot's sent marker is set afterwards. Re-sending an already-sent slot
    /// is permitted and double-submits the ingredients; the shell is expected
    /// to suppress the action once [`Self::is_meal_sent`] reports `true`.
    ///
    /// Returns the number of ingredient demands submitted.
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` when the slot has no assignment or the
    /// assigned recipe has left the library, or a storage error when
    /// persistence fails
    pub fn send_meal_ingredients(&mut self, date: NaiveDate, slot: MealSlot) -> AppResult<usize> {
        let recipe_id = self
            .meal_plan
            .get(&date)
            .and_then(|day| day.slot(slot))
            .ok_or_else(|| {
                AppError::not_found(format!("planned meal for {date} {slot}"))
            })?;
        let recipe = self
            .recipe(recipe_id)
            .ok_or_else(|| AppError::not_found(format!("recipe {recipe_id}")))?;

        let demands: Vec<ItemDemand> = recipe.ingredients.iter().map(ItemDemand::from).collect();
        let sent = demands.len();

        self.merge_into_shopping(&demands)?;
        self.sent_meals.insert(MealMarker::new(date, slot));
        self.persist_sent_meals()?;
        debug!(%date, %slot, ingredients = sent, "Sent meal ingredients to shopping");
        Ok(sent)
    }

    /// Planned days within an inclusive date range, in calendar order
    #[must_use]
    pub fn plan_range(&self, from: NaiveDate, to: NaiveDate) -> Vec<(NaiveDate, DayPlan)> {
        self.meal_plan
            .range(from..=to)
            .map(|(date, day)| (*date, *day))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ingredient, RecipeCategory};
    use crate::store::{MemoryStore, Store};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn state_with_recipe(title: &str) -> (AppState, Uuid) {
        let mut state = AppState::load(Store::Memory(MemoryStore::new()));
        let mut recipe = Recipe::new(title, RecipeCategory::Main);
        recipe.ingredients.push(Ingredient::new("Riz", 250.0, "g"));
        recipe
            .ingredients
            .push(Ingredient::new("Poulet", 400.0, "g"));
        let id = state.upsert_recipe(recipe).unwrap();
        (state, id)
    }

    #[test]
    fn set_meal_touches_only_the_target_slot() {
        let (mut state, id) = state_with_recipe("Curry");
        let day = date(2024, 6, 10);
        state.set_meal(day, MealSlot::Lunch, Some(id)).unwrap();
        state.set_meal(day, MealSlot::Dinner, Some(id)).unwrap();

        state.set_meal(day, MealSlot::Lunch, None).unwrap();
        assert!(state.planned_recipe(day, MealSlot::Lunch).is_none());
        assert!(state.planned_recipe(day, MealSlot::Dinner).is_some());
    }

    #[test]
    fn clearing_both_slots_drops_the_day() {
        let (mut state, id) = state_with_recipe("Curry");
        let day = date(2024, 6, 10);
        state.set_meal(day, MealSlot::Lunch, Some(id)).unwrap();
        state.set_meal(day, MealSlot::Lunch, None).unwrap();
        assert!(state.meal_plan().is_empty());
    }

    #[test]
    fn reassigning_a_sent_slot_clears_its_marker() {
        let (mut state, recipe_a) = state_with_recipe("Curry A");
        let mut other = Recipe::new("Curry B", RecipeCategory::Main);
        other.ingredients.push(Ingredient::new("Tofu", 200.0, "g"));
        let recipe_b = state.upsert_recipe(other).unwrap();

        let day = date(2024, 6, 10);
        state.set_meal(day, MealSlot::Lunch, Some(recipe_a)).unwrap();
        state.send_meal_ingredients(day, MealSlot::Lunch).unwrap();
        assert!(state.is_meal_sent(day, MealSlot::Lunch));

        state.set_meal(day, MealSlot::Lunch, Some(recipe_b)).unwrap();
        assert!(!state.is_meal_sent(day, MealSlot::Lunch));
    }

    #[test]
    fn sending_merges_ingredients_and_sets_marker() {
        let (mut state, id) = state_with_recipe("Curry");
        let day = date(2024, 6, 11);
        state.set_meal(day, MealSlot::Dinner, Some(id)).unwrap();

        let sent = state.send_meal_ingredients(day, MealSlot::Dinner).unwrap();
        assert_eq!(sent, 2);
        assert_eq!(state.shopping_list().len(), 2);
        assert!(state.is_meal_sent(day, MealSlot::Dinner));
    }

    #[test]
    fn resending_is_permitted_and_doubles_demands() {
        let (mut state, id) = state_with_recipe("Curry");
        let day = date(2024, 6, 12);
        state.set_meal(day, MealSlot::Lunch, Some(id)).unwrap();

        state.send_meal_ingredients(day, MealSlot::Lunch).unwrap();
        state.send_meal_ingredients(day, MealSlot::Lunch).unwrap();
        assert_eq!(state.shopping_list().len(), 2);
        assert!((state.shopping_list()[0].amount - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sending_an_unplanned_slot_fails() {
        let (mut state, _) = state_with_recipe("Curry");
        assert!(state
            .send_meal_ingredients(date(2024, 6, 13), MealSlot::Lunch)
            .is_err());
    }

    #[test]
    fn assigning_an_unknown_recipe_fails() {
        let (mut state, _) = state_with_recipe("Curry");
        let err = state.set_meal(date(2024, 6, 14), MealSlot::Lunch, Some(Uuid::new_v4()));
        assert!(err.is_err());
        assert!(state.meal_plan().is_empty());
    }

    #[test]
    fn plan_range_is_inclusive_and_ordered() {
        let (mut state, id) = state_with_recipe("Curry");
        state
            .set_meal(date(2024, 6, 10), MealSlot::Lunch, Some(id))
            .unwrap();
        state
            .set_meal(date(2024, 6, 12), MealSlot::Dinner, Some(id))
            .unwrap();
        state
            .set_meal(date(2024, 6, 20), MealSlot::Lunch, Some(id))
            .unwrap();

        let week = state.plan_range(date(2024, 6, 10), date(2024, 6, 16));
        assert_eq!(week.len(), 2);
        assert_eq!(week[0].0, date(2024, 6, 10));
        assert_eq!(week[1].0, date(2024, 6, 12));
    }
}
