// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, storage backends, and runtime configuration parsing
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based configuration management

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error-level logging only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard informational logging
    #[default]
    Info,
    /// Verbose debugging output
    Debug,
    /// Full tracing output
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Type-safe storage backend selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StoreBackend {
    /// File-backed store rooted at a directory
    File {
        /// Directory holding one JSON file per collection key
        path: PathBuf,
    },
    /// In-memory store (for testing and ephemeral sessions)
    Memory,
}

impl StoreBackend {
    /// Parse from a backend string
    ///
    /// `"memory"` selects the in-memory store; anything else is treated as
    /// a directory path for the file-backed store.
    #[must_use]
    pub fn parse_backend(s: &str) -> Self {
        if s == "memory" || s == ":memory:" {
            Self::Memory
        } else {
            Self::File {
                path: PathBuf::from(s),
            }
        }
    }

    /// Check if this is the in-memory backend
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::File {
            path: default_data_dir(),
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File { path } => write!(f, "{}", path.display()),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// AI provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Gemini API key, if configured
    pub api_key: Option<String>,
    /// Model identifier to request
    pub model: String,
    /// Generative API base URL
    pub base_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.5-flash".into(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".into(),
        }
    }
}

impl AiConfig {
    /// Whether AI-backed operations can be attempted at all
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Log level
    pub log_level: LogLevel,
    /// Storage backend
    pub store: StoreBackend,
    /// AI provider settings
    pub ai: AiConfig,
    /// Interface language code (`en`, `fr`)
    pub language: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            log_level: LogLevel::default(),
            store: StoreBackend::default(),
            ai: AiConfig::default(),
            language: crate::constants::defaults::LANGUAGE.into(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a configured value fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            log_level: LogLevel::from_str_or_default(&env_var_or("RUST_LOG", "info")),
            store: env::var("LARDER_DATA_DIR").map_or_else(
                |_| StoreBackend::default(),
                |dir| StoreBackend::parse_backend(&dir),
            ),
            ai: AiConfig {
                api_key: env::var("GEMINI_API_KEY").ok(),
                model: env_var_or("LARDER_AI_MODEL", "gemini-2.5-flash"),
                base_url: env_var_or(
                    "LARDER_AI_BASE_URL",
                    "https://generativelanguage.googleapis.com/v1beta",
                ),
            },
            language: env_var_or("LARDER_LANGUAGE", crate::constants::defaults::LANGUAGE),
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error when the configuration is internally inconsistent
    pub fn validate(&self) -> Result<()> {
        if self.ai.model.is_empty() {
            return Err(anyhow::anyhow!("AI model identifier cannot be empty"));
        }

        if self.ai.api_key.is_none() {
            warn!("GEMINI_API_KEY not set; AI-backed operations will be unavailable");
        }

        if let StoreBackend::File { path } = &self.store {
            if path.as_os_str().is_empty() {
                return Err(anyhow::anyhow!("Data directory path cannot be empty"));
            }
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Larder Configuration:\n\
             - Log Level: {}\n\
             - Store: {}\n\
             - AI: {}\n\
             - AI Model: {}\n\
             - Language: {}",
            self.log_level,
            self.store,
            if self.ai.is_configured() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.ai.model,
            self.language,
        )
    }
}

/// Resolve the platform data directory for persistent storage
#[must_use]
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("larder")
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
