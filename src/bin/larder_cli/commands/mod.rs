// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors
// ABOUTME: Re-exports command modules for larder-cli
// ABOUTME: Provides recipe, plan, shop, pantry, reserve, data, settings and AI commands

pub mod ai;
pub mod data;
pub mod pantry;
pub mod plan;
pub mod recipe;
pub mod reserve;
pub mod settings;
pub mod shop;
