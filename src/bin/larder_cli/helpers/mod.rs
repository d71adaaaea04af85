// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors
// ABOUTME: Re-exports helper modules for larder-cli
// ABOUTME: Provides argument resolution and output formatting

pub mod display;
pub mod resolve;
