// ABOUTME: Configuration module aggregating environment-driven settings
// ABOUTME: Exposes typed configuration structures for the engine and its AI boundary

//! Configuration management for the Larder engine

/// Environment-based runtime configuration
pub mod environment;

pub use environment::{AiConfig, EngineConfig, LogLevel, StoreBackend};
