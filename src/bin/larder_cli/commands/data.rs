// ABOUTME: Backup and sheet interchange commands for larder-cli
// ABOUTME: Handles JSON backup export/import and the two CSV sheet files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

use std::fs;
use std::path::Path;

use larder::errors::{AppError, AppResult};
use larder::state::AppState;

type Result<T> = AppResult<T>;

/// File name for the recurring-lists sheet
const GROUPS_FILE: &str = "recurring_lists.csv";
/// File name for the in-stock sheet
const STOCK_FILE: &str = "in_stock.csv";

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| AppError::storage(format!("Failed to read {}: {e}", path.display())))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents)
        .map_err(|e| AppError::storage(format!("Failed to write {}: {e}", path.display())))
}

/// Export a whole-state JSON backup to a file or stdout
pub fn export_backup(state: &AppState, out: Option<&Path>) -> Result<()> {
    let payload = state.export_backup()?;
    match out {
        Some(path) => {
            write_file(path, &payload)?;
            println!("Wrote backup to {}", path.display());
        }
        None => println!("{payload}"),
    }
    Ok(())
}

/// Import a JSON backup, replacing the sections it carries
pub fn import_backup(state: &mut AppState, file: &Path) -> Result<()> {
    let payload = read_file(file)?;
    let sections = state.import_backup(&payload)?;
    if sections.is_empty() {
        println!("Backup carried no sections, nothing changed");
    } else {
        println!("Imported sections: {}", sections.join(", "));
    }
    Ok(())
}

/// Export both CSV sheets into a directory
pub fn export_sheets(state: &AppState, dir: &Path) -> Result<()> {
    let groups_path = dir.join(GROUPS_FILE);
    write_file(&groups_path, &state.export_groups_sheet()?)?;
    println!("Wrote {}", groups_path.display());

    let stock_path = dir.join(STOCK_FILE);
    write_file(&stock_path, &state.export_stock_sheet()?)?;
    println!("Wrote {}", stock_path.display());
    Ok(())
}

/// Import one or both CSV sheets
pub fn import_sheets(
    state: &mut AppState,
    groups: Option<&Path>,
    stock: Option<&Path>,
) -> Result<()> {
    if groups.is_none() && stock.is_none() {
        return Err(AppError::invalid_input(
            "Provide --groups and/or --stock to import",
        ));
    }

    if let Some(path) = groups {
        let summary = state.import_groups_sheet(&read_file(path)?)?;
        println!(
            "Recurring lists: imported {} row(s), skipped {}",
            summary.imported, summary.skipped
        );
    }
    if let Some(path) = stock {
        let summary = state.import_stock_sheet(&read_file(path)?)?;
        println!(
            "In stock: imported {} row(s), skipped {}",
            summary.imported, summary.skipped
        );
    }
    Ok(())
}
