// ABOUTME: Import/export surface for backups and spreadsheet interchange
// ABOUTME: Covers whole-state JSON backups and the two recurring-list CSV sheets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Data Interchange
//!
//! Two interchange formats move data in and out of the engine:
//!
//! - **JSON backup**: a single document holding every persisted section.
//!   Import replaces exactly the sections present in the document and
//!   leaves absent sections untouched.
//! - **CSV sheets**: the spreadsheet format households already keep their
//!   recurring lists in. One sheet carries pantry groups, one carries the
//!   in-stock reserve. Headers are matched case-insensitively across the
//!   known English and French spellings.

mod backup;
mod sheet;

pub use backup::BackupDocument;
pub use sheet::SheetImportSummary;
