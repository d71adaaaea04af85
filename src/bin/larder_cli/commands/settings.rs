// ABOUTME: Profile settings commands for larder-cli
// ABOUTME: Handles show, set and dietary restriction edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

use larder::errors::{AppError, AppResult};
use larder::state::AppState;

use crate::helpers::display;

type Result<T> = AppResult<T>;

/// Show the profile and preferences
pub fn show(state: &AppState) {
    display::display_settings(state.settings());
}

/// Update profile fields from the provided flags
pub fn set(
    state: &mut AppState,
    display_name: Option<String>,
    default_servings: Option<u8>,
    language: Option<String>,
) -> Result<()> {
    if display_name.is_none() && default_servings.is_none() && language.is_none() {
        return Err(AppError::invalid_input(
            "Provide at least one of --display-name, --default-servings or --language",
        ));
    }
    if state.update_profile(display_name, default_servings, language)? {
        println!("Profile updated");
    } else {
        println!("Profile already up to date");
    }
    Ok(())
}

/// Add a dietary restriction honored by AI suggestions
pub fn diet_add(state: &mut AppState, tag: &str) -> Result<()> {
    if state.add_dietary_restriction(tag)? {
        println!("Added dietary restriction '{}'", tag.trim());
    } else {
        println!("'{}' is already listed", tag.trim());
    }
    Ok(())
}

/// Remove a dietary restriction
pub fn diet_remove(state: &mut AppState, tag: &str) -> Result<()> {
    if state.remove_dietary_restriction(tag)? {
        println!("Removed dietary restriction '{}'", tag.trim());
    } else {
        println!("'{}' was not listed", tag.trim());
    }
    Ok(())
}
