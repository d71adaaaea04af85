// ABOUTME: Main library entry point for the Larder meal planning engine
// ABOUTME: Provides recipe, planner, pantry, shopping and AI discovery services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

// Crate-level attributes:
// - deny(unsafe_code): Zero-tolerance unsafe policy; nothing in this crate
//   needs raw pointers or FFI.
#![deny(unsafe_code)]

//! # Larder
//!
//! A local-first meal planning and grocery management engine. Larder keeps a
//! household's recipe library, weekly meal plan, recurring pantry lists and
//! shopping list in one place, persisted as JSON snapshots in a small
//! key-value store.
//!
//! ## Features
//!
//! - **Recipe library**: categorized recipes with servings-aware scaling
//! - **Meal planner**: lunch and dinner slots per day, ingredients sent to shopping on demand
//! - **Pantry groups**: recurring-purchase templates with in-stock tracking
//! - **Shopping list**: quantity-merging reconciler and store-ready consolidation
//! - **AI discovery**: Gemini-backed recipe suggestion, web search, images, price lookups
//! - **Interchange**: whole-state JSON backups and spreadsheet-compatible CSV sheets
//!
//! ## Quick Start
//!
//! 1. Load configuration with [`config::EngineConfig::from_env`]
//! 2. Open a [`store::Store`] and rehydrate [`state::AppState`]
//! 3. Drive the engine through the manager commands on `AppState`
//!
//! ## Architecture
//!
//! The engine follows a modular architecture:
//! - **Models**: Domain types shared by every manager
//! - **State**: The ownership root; every mutation persists before returning
//! - **Managers**: Per-domain command surfaces (`library`, `planner`, `pantry`, `shopping`, `registry`)
//! - **AI**: Provider abstraction and the five fixed discovery operations
//! - **Interchange**: Backup and sheet import/export
//! - **Config**: Environment-driven configuration management
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use larder::config::EngineConfig;
//! use larder::errors::AppResult;
//! use larder::state::AppState;
//! use larder::store::Store;
//!
//! fn main() -> AppResult<()> {
//!     let config = EngineConfig::from_env()?;
//!     let store = Store::open(&config.store)?;
//!     let state = AppState::load(store);
//!
//!     println!("{} recipes in the library", state.recipes().len());
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by binary crates (src/bin/) and integration tests
// (tests/). They must remain `pub` so external consumers can access them.

/// Generative AI provider abstraction and the five discovery operations
pub mod ai;

/// Configuration management and environment parsing
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes
pub mod errors;

/// Backup and spreadsheet import/export
pub mod interchange;

/// Recipe library commands and servings-aware scaling
pub mod library;

/// Structured logging configuration built on tracing
pub mod logging;

/// Core domain models shared by every manager
pub mod models;

/// Pantry group and in-stock reserve commands
pub mod pantry;

/// Weekly meal planner commands and sent-meal tracking
pub mod planner;

/// Food-portion registry feeding autocomplete suggestions
pub mod registry;

/// Shopping list reconciler and consolidation
pub mod shopping;

/// Application state aggregate and persistence mirroring
pub mod state;

/// Key-value persistence adapters
pub mod store;

/// Test utilities for creating domain structs in a consistent way
pub mod test_utils;
