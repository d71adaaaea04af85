// ABOUTME: Generative AI provider abstraction for recipe discovery features
// ABOUTME: Defines the provider contract plus shared request and image types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # Generative AI Service Provider Interface
//!
//! This module defines the contract a generative text/image provider must
//! implement to back the recipe-discovery features. The engine only ever
//! talks to the [`AiService`] operations; provider failures never cross that
//! boundary as errors, they collapse to absent results.
//!
//! ## Key Concepts
//!
//! - **`GenerativeProvider`**: async trait for one-shot text and image generation
//! - **`GenerationRequest`**: prompt configuration including grounding and JSON mode
//! - **`AiService`**: the five fixed-prompt operations with an explicit request lifecycle

mod gemini;
pub mod prompts;
pub mod responses;
mod service;

pub use gemini::GeminiClient;
pub use responses::{
    GeneratedIngredient, GeneratedRecipe, PriceComparison, RecipeSearchResult, SearchSource,
    StorePrice, StoreSuggestion,
};
pub use service::{AiOperation, AiService, RequestPhase, SuggestionRequest};

use async_trait::async_trait;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Configuration for a one-shot text generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// User prompt
    pub prompt: String,
    /// Optional system instruction framing the task
    pub system_instruction: Option<String>,
    /// Model identifier override (provider default when `None`)
    pub model: Option<String>,
    /// Temperature for response randomness
    pub temperature: Option<f32>,
    /// Ask the provider for a JSON response body
    pub json_response: bool,
    /// Enable web-search grounding for the request
    pub grounded: bool,
}

impl GenerationRequest {
    /// Create a request with a user prompt
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            model: None,
            temperature: None,
            json_response: false,
            grounded: false,
        }
    }

    /// Set the system instruction
    #[must_use]
    pub fn with_system(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Override the model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the temperature
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Request a JSON response body
    ///
    /// Mutually exclusive with grounding upstream; grounded calls return
    /// fenced text that the response layer strips and parses instead.
    #[must_use]
    pub const fn expecting_json(mut self) -> Self {
        self.json_response = true;
        self
    }

    /// Enable web-search grounding
    #[must_use]
    pub const fn with_grounding(mut self) -> Self {
        self.grounded = true;
        self
    }
}

/// A generated image payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedImage {
    /// Base64-encoded image bytes as delivered by the provider
    pub data: String,
    /// Image MIME type ("image/png", ...)
    pub mime_type: String,
}

impl GeneratedImage {
    /// Render as a `data:` URI for embedding
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the raw image bytes
    ///
    /// # Errors
    ///
    /// Returns `InvalidFormat` when the payload is not valid base64
    pub fn decode_bytes(&self) -> Result<Vec<u8>, AppError> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| AppError::invalid_format(format!("Image payload is not base64: {e}")))
    }
}

/// Generative provider trait for one-shot text and image generation
///
/// Implement this trait to back the AI operations with a different vendor.
/// The design follows the async trait pattern for compatibility with the
/// tokio runtime.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Unique provider identifier (e.g. "gemini")
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default model used when a request does not override it
    fn default_model(&self) -> &str;

    /// Generate a text response for a request
    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError>;

    /// Generate an image for a prompt
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_request_builder_accumulates() {
        let request = GenerationRequest::new("prompt")
            .with_system("system")
            .with_model("gemini-2.5-flash")
            .with_temperature(0.7)
            .expecting_json();
        assert_eq!(request.system_instruction.as_deref(), Some("system"));
        assert!(request.json_response);
        assert!(!request.grounded);
    }

    #[test]
    fn image_decodes_base64_payload() {
        let image = GeneratedImage {
            data: base64::engine::general_purpose::STANDARD.encode([137u8, 80, 78, 71]),
            mime_type: "image/png".into(),
        };
        assert_eq!(image.decode_bytes().unwrap(), vec![137u8, 80, 78, 71]);
        assert!(image.data_uri().starts_with("data:image/png;base64,"));

        let bad = GeneratedImage {
            data: "not base64!!".into(),
            mime_type: "image/png".into(),
        };
        assert!(bad.decode_bytes().is_err());
    }
}
