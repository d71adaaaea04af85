// ABOUTME: CSV sheet import/export for pantry groups and the in-stock reserve
// ABOUTME: Matches headers case-insensitively across English and French spellings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! Spreadsheet interchange for recurring lists and stock
//!
//! Households keep their recurring lists in spreadsheets long before they
//! adopt an app. The importer meets those sheets where they are: headers
//! match case-insensitively across the known English and French spellings,
//! a missing quantity defaults to one, a missing unit defaults to pieces,
//! and comma decimals parse the way French locales write them.

use csv::{ReaderBuilder, StringRecord, Trim, Writer};
use serde::Serialize;

use crate::constants::{defaults, sheets};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{normalize_name, PantryGroup, ShoppingListItem};
use crate::state::AppState;

/// Outcome of one sheet import
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SheetImportSummary {
    /// Rows turned into items
    pub imported: usize,
    /// Rows skipped (blank article, duplicate line, unusable row)
    pub skipped: usize,
}

/// Locate a column whose header matches one of the accepted spellings
fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|header| names.contains(&header.trim().to_lowercase().as_str()))
}

/// Read a cell by optional column index, empty when absent
fn cell<'r>(record: &'r StringRecord, column: Option<usize>) -> &'r str {
    column
        .and_then(|index| record.get(index))
        .unwrap_or("")
        .trim()
}

/// Parse a quantity cell, accepting comma decimals, defaulting when unusable
fn parse_quantity(raw: &str) -> f64 {
    if raw.is_empty() {
        return defaults::QUANTITY;
    }
    raw.parse()
        .or_else(|_| raw.replace(',', ".").parse())
        .unwrap_or(defaults::QUANTITY)
}

fn reader_for(data: &str) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data.as_bytes())
}

fn finish_writer(writer: Writer<Vec<u8>>) -> AppResult<String> {
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::internal(format!("CSV buffer: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::internal(format!("CSV encoding: {e}")))
}

impl AppState {
    // ================================
    // Export
    // ================================

    /// Export every pantry group as the recurring-lists sheet
    ///
    /// Columns: group, article, quantity, unit. One row per template item.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the CSV buffer cannot be finalized
    pub fn export_groups_sheet(&self) -> AppResult<String> {
        let mut writer = Writer::from_writer(Vec::new());
        writer
            .write_record(["group", "article", "quantity", "unit"])
            .map_err(|e| AppError::internal(format!("CSV write: {e}")))?;
        for group in &self.pantry_groups {
            for item in &group.items {
                writer
                    .write_record([
                        group.name.as_str(),
                        item.name.as_str(),
                        &item.amount.to_string(),
                        item.unit.as_str(),
                    ])
                    .map_err(|e| AppError::internal(format!("CSV write: {e}")))?;
            }
        }
        finish_writer(writer)
    }

    /// Export the in-stock reserve as the stock sheet
    ///
    /// Columns: article, quantity, unit.
    ///
    /// # Errors
    ///
    /// Returns an internal error when the CSV buffer cannot be finalized
    pub fn export_stock_sheet(&self) -> AppResult<String> {
        let mut writer = Writer::from_writer(Vec::new());
        writer
            .write_record(["article", "quantity", "unit"])
            .map_err(|e| AppError::internal(format!("CSV write: {e}")))?;
        for item in &self.reserve_items {
            writer
                .write_record([
                    item.name.as_str(),
                    &item.amount.to_string(),
                    item.unit.as_str(),
                ])
                .map_err(|e| AppError::internal(format!("CSV write: {e}")))?;
        }
        finish_writer(writer)
    }

    // ================================
    // Import
    // ================================

    /// Import the recurring-lists sheet, merging into existing groups
    ///
    /// Groups match by case-insensitive name; rows whose article already
    /// exists in the target group (same normalized name and unit) are
    /// skipped, as are rows with a blank group or article.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when the group or article column is
    /// absent and `InvalidFormat` when a record cannot be read
    pub fn import_groups_sheet(&mut self, data: &str) -> AppResult<SheetImportSummary> {
        let mut reader = reader_for(data);
        let headers = reader
            .headers()
            .map_err(|e| AppError::invalid_format(format!("Sheet headers: {e}")))?
            .clone();
        let group_column = find_column(&headers, sheets::GROUP_HEADERS)
            .ok_or_else(|| AppError::missing_field("group column"))?;
        let article_column = find_column(&headers, sheets::ARTICLE_HEADERS)
            .ok_or_else(|| AppError::missing_field("article column"))?;
        let quantity_column = find_column(&headers, sheets::QUANTITY_HEADERS);
        let unit_column = find_column(&headers, sheets::UNIT_HEADERS);

        let mut summary = SheetImportSummary::default();
        let mut registry_entries = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| AppError::invalid_format(format!("Sheet record: {e}")))?;
            let group_name = cell(&record, Some(group_column));
            let article = cell(&record, Some(article_column));
            if group_name.is_empty() || article.is_empty() {
                summary.skipped += 1;
                continue;
            }
            let amount = parse_quantity(cell(&record, quantity_column));
            let unit = match cell(&record, unit_column) {
                "" => defaults::UNIT,
                unit => unit,
            };

            let normalized_group = normalize_name(group_name);
            let index = self
                .pantry_groups
                .iter()
                .position(|g| normalize_name(&g.name) == normalized_group)
                .unwrap_or_else(|| {
                    self.pantry_groups.push(PantryGroup::new(group_name));
                    self.pantry_groups.len() - 1
                });
            let group = &mut self.pantry_groups[index];
            if group.items.iter().any(|i| i.is_same_line(article, unit)) {
                summary.skipped += 1;
                continue;
            }
            group.items.push(ShoppingListItem::new(article, amount, unit));
            registry_entries.push((article.to_string(), amount, unit.to_string()));
            summary.imported += 1;
        }

        for group in &mut self.pantry_groups {
            group.sort_items();
        }
        if summary.imported > 0 {
            self.persist_pantry_groups()?;
            self.register_foods(registry_entries)?;
        }
        AppLogger::log_import_summary(sheets::GROUPS_SHEET, summary.imported, summary.skipped);
        Ok(summary)
    }

    /// Import the stock sheet into the in-stock reserve
    ///
    /// Rows whose article name already exists in the reserve (compared
    /// case-insensitively) are skipped, as are rows with a blank article.
    ///
    /// # Errors
    ///
    /// Returns `MissingRequiredField` when the article column is absent and
    /// `InvalidFormat` when a record cannot be read
    pub fn import_stock_sheet(&mut self, data: &str) -> AppResult<SheetImportSummary> {
        let mut reader = reader_for(data);
        let headers = reader
            .headers()
            .map_err(|e| AppError::invalid_format(format!("Sheet headers: {e}")))?
            .clone();
        let article_column = find_column(&headers, sheets::ARTICLE_HEADERS)
            .ok_or_else(|| AppError::missing_field("article column"))?;
        let quantity_column = find_column(&headers, sheets::QUANTITY_HEADERS);
        let unit_column = find_column(&headers, sheets::UNIT_HEADERS);

        let mut summary = SheetImportSummary::default();
        let mut registry_entries = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| AppError::invalid_format(format!("Sheet record: {e}")))?;
            let article = cell(&record, Some(article_column));
            if article.is_empty() {
                summary.skipped += 1;
                continue;
            }
            let normalized = normalize_name(article);
            if self
                .reserve_items
                .iter()
                .any(|i| normalize_name(&i.name) == normalized)
            {
                summary.skipped += 1;
                continue;
            }
            let amount = parse_quantity(cell(&record, quantity_column));
            let unit = match cell(&record, unit_column) {
                "" => defaults::UNIT,
                unit => unit,
            };
            self.reserve_items
                .push(ShoppingListItem::new(article, amount, unit));
            registry_entries.push((article.to_string(), amount, unit.to_string()));
            summary.imported += 1;
        }

        if summary.imported > 0 {
            self.persist_reserve_items()?;
            self.register_foods(registry_entries)?;
        }
        AppLogger::log_import_summary(sheets::STOCK_SHEET, summary.imported, summary.skipped);
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use crate::store::{MemoryStore, Store};

    fn memory_state() -> AppState {
        AppState::load(Store::Memory(MemoryStore::new()))
    }

    #[test]
    fn groups_sheet_round_trips() {
        let mut source = memory_state();
        source
            .save_group(
                "Weekly",
                vec![
                    ShoppingListItem::new("Rice", 500.0, "g"),
                    ShoppingListItem::new("Olive oil", 1.0, "l"),
                ],
            )
            .unwrap();
        let sheet = source.export_groups_sheet().unwrap();
        assert!(sheet.starts_with("group,article,quantity,unit"));

        let mut target = memory_state();
        let summary = target.import_groups_sheet(&sheet).unwrap();
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 0);
        let group = target.pantry_group_by_name("weekly").unwrap();
        assert_eq!(group.items.len(), 2);
        assert_eq!(group.items[0].name, "Olive oil");
    }

    #[test]
    fn french_headers_and_comma_decimals_parse() {
        let sheet = "Groupe,Produit,Quantité,Unité\nHebdo,Pâtes,\"1,5\",kg\n";
        let mut state = memory_state();
        let summary = state.import_groups_sheet(sheet).unwrap();

        assert_eq!(summary.imported, 1);
        let group = state.pantry_group_by_name("Hebdo").unwrap();
        assert_eq!(group.items[0].name, "Pâtes");
        assert!((group.items[0].amount - 1.5).abs() < f64::EPSILON);
        assert_eq!(group.items[0].unit, "kg");
    }

    #[test]
    fn blank_article_rows_are_skipped() {
        let sheet = "group,article,quantity,unit\nWeekly,,2,pcs\nWeekly,Rice,500,g\n";
        let mut state = memory_state();
        let summary = state.import_groups_sheet(sheet).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn missing_quantity_and_unit_fall_back_to_defaults() {
        let sheet = "group,article\nWeekly,Sponges\n";
        let mut state = memory_state();
        state.import_groups_sheet(sheet).unwrap();

        let group = state.pantry_group_by_name("Weekly").unwrap();
        assert!((group.items[0].amount - 1.0).abs() < f64::EPSILON);
        assert_eq!(group.items[0].unit, "pcs");
    }

    #[test]
    fn import_merges_into_existing_group_and_skips_duplicates() {
        let mut state = memory_state();
        state
            .save_group("Weekly", vec![ShoppingListItem::new("Rice", 500.0, "g")])
            .unwrap();

        let sheet = "group,article,quantity,unit\nWEEKLY,rice,200,g\nweekly,Beans,400,g\n";
        let summary = state.import_groups_sheet(sheet).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(state.pantry_groups().len(), 1);
        let group = &state.pantry_groups()[0];
        assert_eq!(group.name, "Weekly");
        assert_eq!(group.items.len(), 2);
        // The stored amount for the duplicate line is untouched.
        let rice = group.items.iter().find(|i| i.name == "Rice").unwrap();
        assert!((rice.amount - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn stock_import_skips_existing_reserve_names() {
        let mut state = memory_state();
        state.add_reserve_item("Milk", 1.0, "l").unwrap();

        let sheet = "article,quantity,unit\nMILK,2,l\nEggs,6,pcs\n";
        let summary = state.import_stock_sheet(sheet).unwrap();

        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(state.reserve_items().len(), 2);
    }

    #[test]
    fn missing_article_column_is_rejected() {
        let mut state = memory_state();
        let err = state
            .import_stock_sheet("foo,bar\n1,2\n")
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn stock_sheet_exports_reserve_rows() {
        let mut state = memory_state();
        state.add_reserve_item("Milk", 1.5, "l").unwrap();
        let sheet = state.export_stock_sheet().unwrap();

        assert!(sheet.starts_with("article,quantity,unit"));
        assert!(sheet.contains("Milk,1.5,l"));
    }
}
