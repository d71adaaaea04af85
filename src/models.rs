// ABOUTME: Core domain data models for the Larder engine
// ABOUTME: Defines Recipe, Ingredient, ShoppingListItem, PantryGroup, meal plan and settings types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Data Models
//!
//! Core data structures shared across the engine. These are plain serde
//! records; all storage behavior lives in the managers that own each
//! collection.
//!
//! ## Core Models
//!
//! - `Recipe`: a library entry with ingredients scaled against a servings basis
//! - `Ingredient`: a positional line inside a recipe (no identity of its own)
//! - `ShoppingListItem`: one line of the active shopping list or a pantry template
//! - `PantryGroup`: a named recurring-purchase template
//! - `DayPlan` / `MealMarker`: per-date slot assignments and sent-tracking
//! - `UserSettings`: profile, dietary tags and the food-portion registry

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};

/// Normalize an item or ingredient name for identity comparison
///
/// Two lines are "the same" when their normalized names and exact units
/// coincide. Normalization trims surrounding whitespace and lowercases;
/// it never touches the stored spelling.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Category of a recipe within the library
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecipeCategory {
    /// Morning meals
    Breakfast,
    /// First course
    Starter,
    /// Main course
    #[default]
    Main,
    /// Accompaniment to a main course
    Side,
    /// Sweet course
    Dessert,
    /// Between-meal food
    Snack,
    /// Beverages
    Drink,
}

impl RecipeCategory {
    /// All categories in display order
    pub const ALL: &'static [Self] = &[
        Self::Breakfast,
        Self::Starter,
        Self::Main,
        Self::Side,
        Self::Dessert,
        Self::Snack,
        Self::Drink,
    ];

    /// Convert to string for storage
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Starter => "starter",
            Self::Main => "main",
            Self::Side => "side",
            Self::Dessert => "dessert",
            Self::Snack => "snack",
            Self::Drink => "drink",
        }
    }
}

impl Display for RecipeCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecipeCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "breakfast" => Ok(Self::Breakfast),
            "starter" => Ok(Self::Starter),
            "main" => Ok(Self::Main),
            "side" => Ok(Self::Side),
            "dessert" => Ok(Self::Dessert),
            "snack" => Ok(Self::Snack),
            "drink" => Ok(Self::Drink),
            _ => Err(AppError::invalid_input(format!(
                "Unknown recipe category: {s}"
            ))),
        }
    }
}

/// One ingredient line inside a recipe
///
/// Ingredients have no identity of their own; identity is positional within
/// the owning recipe. Amounts are defined relative to the recipe's `servings`
/// basis and units are free-form strings, never converted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    /// Ingredient name as entered
    pub name: String,
    /// Quantity relative to the recipe's servings basis (non-negative)
    pub amount: f64,
    /// Free-form unit string ("g", "ml", "pcs", ...)
    pub unit: String,
}

impl Ingredient {
    /// Create an ingredient line
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

/// A recipe in the personal library
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique identifier, generated at creation
    pub id: Uuid,
    /// Recipe title
    pub title: String,
    /// Free-text description
    pub description: String,
    /// Ordered ingredient lines, amounts relative to `servings`
    pub ingredients: Vec<Ingredient>,
    /// Ordered preparation steps
    pub instructions: Vec<String>,
    /// Preparation time in minutes
    pub prep_time_mins: u16,
    /// Cooking time in minutes
    pub cook_time_mins: u16,
    /// Baseline quantity basis for ingredient amounts (>= 1)
    pub servings: u8,
    /// Category within the library
    pub category: RecipeCategory,
    /// Optional image reference (URL or data URI)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Free-form tags, e.g. an appliance marker
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Recipe {
    /// Create a recipe with a fresh identifier and default servings basis
    pub fn new(title: impl Into<String>, category: RecipeCategory) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            description: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            prep_time_mins: 0,
            cook_time_mins: 0,
            servings: defaults::SERVINGS,
            category,
            image: None,
            tags: BTreeSet::new(),
        }
    }

    /// Total preparation plus cooking time in minutes
    #[must_use]
    pub const fn total_time_mins(&self) -> u16 {
        self.prep_time_mins + self.cook_time_mins
    }

    /// Validate the recipe before it enters the library
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the title is blank or the ingredient list
    /// is empty, and `ValueOutOfRange` for a zero servings basis or a
    /// negative ingredient amount
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::invalid_input("Recipe title cannot be empty"));
        }
        if self.ingredients.is_empty() {
            return Err(AppError::invalid_input(
                "Recipe must have at least one ingredient",
            ));
        }
        if self.servings == 0 {
            return Err(AppError::out_of_range(
                "Recipe servings basis must be at least 1",
            ));
        }
        for ingredient in &self.ingredients {
            if ingredient.amount < 0.0 {
                return Err(AppError::out_of_range(format!(
                    "Ingredient '{}' has a negative amount",
                    ingredient.name
                )));
            }
        }
        Ok(())
    }
}

/// A known-food registry entry used for autocomplete suggestions
///
/// The registry grows automatically whenever a new food name is entered
/// anywhere in the application and is otherwise append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPortion {
    /// Unique identifier
    pub id: Uuid,
    /// Food name as first entered
    pub name: String,
    /// Default amount suggested for this food
    pub amount: f64,
    /// Default unit suggested for this food
    pub unit: String,
}

impl FoodPortion {
    /// Create a registry entry with a fresh identifier
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }
}

/// One line of the shopping list, or one template item inside a pantry group
///
/// On the shopping list `checked` means "purchased"; inside a pantry group it
/// means "already in stock".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShoppingListItem {
    /// Unique identifier, generated at creation
    pub id: Uuid,
    /// Item name as entered
    pub name: String,
    /// Quantity
    pub amount: f64,
    /// Free-form unit string
    pub unit: String,
    /// Fulfilled flag (purchased, or in stock for pantry templates)
    pub checked: bool,
    /// Optional category label for display grouping
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ShoppingListItem {
    /// Create an unchecked item with a fresh identifier
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            amount,
            unit: unit.into(),
            checked: false,
            category: None,
        }
    }

    /// Attach a category label
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Whether another name+unit pair identifies the same line
    ///
    /// Names compare case-insensitively after trimming; units compare exactly.
    #[must_use]
    pub fn is_same_line(&self, name: &str, unit: &str) -> bool {
        normalize_name(&self.name) == normalize_name(name) && self.unit == unit
    }
}

/// A named recurring-purchase template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PantryGroup {
    /// Unique identifier, generated at creation
    pub id: Uuid,
    /// Group name ("Weekly staples", ...)
    pub name: String,
    /// Template items, kept sorted by name
    pub items: Vec<ShoppingListItem>,
}

impl PantryGroup {
    /// Create an empty group with a fresh identifier
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Sort items by name, case-insensitively
    pub fn sort_items(&mut self) {
        self.items
            .sort_by(|a, b| normalize_name(&a.name).cmp(&normalize_name(&b.name)));
    }
}

/// The two meal slots of a planned day
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MealSlot {
    /// Midday meal
    Lunch,
    /// Evening meal
    Dinner,
}

impl MealSlot {
    /// Convert to string for storage and marker keys
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
        }
    }
}

impl Display for MealSlot {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MealSlot {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            _ => Err(AppError::invalid_input(format!("Unknown meal slot: {s}"))),
        }
    }
}

/// Recipe assignments for one calendar date
///
/// At most one recipe per slot; a day whose slots are both empty is removed
/// from the plan entirely.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayPlan {
    /// Recipe planned for lunch, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch: Option<Uuid>,
    /// Recipe planned for dinner, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dinner: Option<Uuid>,
}

impl DayPlan {
    /// Recipe assigned to a slot, if any
    #[must_use]
    pub const fn slot(&self, slot: MealSlot) -> Option<Uuid> {
        match slot {
            MealSlot::Lunch => self.lunch,
            MealSlot::Dinner => self.dinner,
        }
    }

    /// Mutable access to a slot's assignment
    pub fn slot_mut(&mut self, slot: MealSlot) -> &mut Option<Uuid> {
        match slot {
            MealSlot::Lunch => &mut self.lunch,
            MealSlot::Dinner => &mut self.dinner,
        }
    }

    /// Whether both slots are unassigned
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lunch.is_none() && self.dinner.is_none()
    }
}

/// Calendar mapping from date to planned meals
pub type MealPlan = BTreeMap<NaiveDate, DayPlan>;

/// Marker recording that a planned slot's ingredients were sent to shopping
///
/// Serializes as a `date-slot` string (`2024-06-10-lunch`) so the persisted
/// set stays a plain array of strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct MealMarker {
    /// Planned date
    pub date: NaiveDate,
    /// Planned slot
    pub slot: MealSlot,
}

impl MealMarker {
    /// Create a marker for a date and slot
    #[must_use]
    pub const fn new(date: NaiveDate, slot: MealSlot) -> Self {
        Self { date, slot }
    }
}

impl Display for MealMarker {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-{}", self.date.format("%Y-%m-%d"), self.slot)
    }
}

impl FromStr for MealMarker {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (date_part, slot_part) = s.rsplit_once('-').ok_or_else(|| {
            AppError::invalid_format(format!("Meal marker missing slot suffix: {s}"))
        })?;
        let date = NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
            .map_err(|e| AppError::invalid_format(format!("Invalid meal marker date: {e}")))?;
        let slot = slot_part.parse()?;
        Ok(Self { date, slot })
    }
}

impl From<MealMarker> for String {
    fn from(marker: MealMarker) -> Self {
        marker.to_string()
    }
}

impl TryFrom<String> for MealMarker {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Set of slots whose ingredients were already transferred to shopping
pub type SentMeals = BTreeSet<MealMarker>;

/// User profile, preferences and the food-portion registry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Display name shown by the shell
    pub display_name: String,
    /// Dietary restriction tags ("vegetarian", "gluten-free", ...)
    pub dietary_restrictions: Vec<String>,
    /// Known-food registry powering autocomplete
    pub food_portions: Vec<FoodPortion>,
    /// Servings basis preselected for new recipes
    pub default_servings: u8,
    /// Interface language code
    pub language: String,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            display_name: String::new(),
            dietary_restrictions: Vec::new(),
            food_portions: Vec::new(),
            default_servings: defaults::SERVINGS,
            language: defaults::LANGUAGE.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalize_name_trims_and_lowercases() {
        assert_eq!(normalize_name("  Pâtes "), "pâtes");
        assert_eq!(normalize_name("RIZ"), "riz");
    }

    #[test]
    fn same_line_requires_exact_unit() {
        let item = ShoppingListItem::new("Pâtes", 200.0, "g");
        assert!(item.is_same_line("pâtes", "g"));
        assert!(!item.is_same_line("pâtes", "kg"));
    }

    #[test]
    fn meal_marker_round_trips_through_string_form() {
        let marker = MealMarker::new(date(2024, 6, 10), MealSlot::Lunch);
        assert_eq!(marker.to_string(), "2024-06-10-lunch");
        let parsed: MealMarker = "2024-06-10-lunch".parse().unwrap();
        assert_eq!(parsed, marker);
    }

    #[test]
    fn meal_marker_rejects_garbage() {
        assert!("2024-06-10".parse::<MealMarker>().is_err());
        assert!("not-a-date-lunch".parse::<MealMarker>().is_err());
        assert!("".parse::<MealMarker>().is_err());
    }

    #[test]
    fn recipe_category_parses_case_insensitively() {
        assert_eq!(
            "Dessert".parse::<RecipeCategory>().unwrap(),
            RecipeCategory::Dessert
        );
        assert!("brunch".parse::<RecipeCategory>().is_err());
    }

    #[test]
    fn recipe_validation_rejects_bad_input() {
        let mut recipe = Recipe::new("Soup", RecipeCategory::Starter);
        assert!(recipe.validate().is_err()); // no ingredients

        recipe.ingredients.push(Ingredient::new("Leek", 2.0, "pcs"));
        assert!(recipe.validate().is_ok());

        recipe.servings = 0;
        assert!(recipe.validate().is_err());
        recipe.servings = 4;

        recipe.ingredients[0].amount = -1.0;
        assert!(recipe.validate().is_err());

        recipe.ingredients[0].amount = 2.0;
        recipe.title = "   ".into();
        assert!(recipe.validate().is_err());
    }

    #[test]
    fn day_plan_slot_access_is_independent() {
        let mut plan = DayPlan::default();
        let id = Uuid::new_v4();
        *plan.slot_mut(MealSlot::Dinner) = Some(id);
        assert_eq!(plan.slot(MealSlot::Dinner), Some(id));
        assert_eq!(plan.slot(MealSlot::Lunch), None);
        assert!(!plan.is_empty());
    }
}
