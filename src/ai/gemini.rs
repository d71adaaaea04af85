// ABOUTME: Google Gemini provider implementation over the v1beta REST API
// ABOUTME: Handles request assembly, search grounding, and image generation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! Google Gemini API provider implementation

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{GeneratedImage, GenerationRequest, GenerativeProvider};
use crate::config::AiConfig;
use crate::errors::AppError;

/// Gemini API base URL
const API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model when none is configured
const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Model used for image generation requests
const IMAGE_MODEL: &str = "gemini-2.0-flash-preview-image-generation";

/// Google Gemini provider
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    default_model: String,
    base_url: String,
    client: reqwest::Client,
}

// ================================================================================
// Wire Types
// ================================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<GeminiTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum ContentPart {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(rename = "responseModalities", skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
    #[serde(rename = "candidateCount", skip_serializing_if = "Option::is_none")]
    candidate_count: Option<u32>,
}

#[derive(Debug, Serialize)]
struct GeminiTool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ================================================================================
// Client
// ================================================================================

impl GeminiClient {
    /// Create a client with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            default_model: DEFAULT_MODEL.to_string(),
            base_url: API_BASE_URL.to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from resolved AI configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error when no API key is present
    pub fn from_config(config: &AiConfig) -> Result<Self, AppError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| AppError::config_missing("GEMINI_API_KEY"))?;
        Ok(Self::new(api_key)
            .with_default_model(config.model.clone())
            .with_base_url(config.base_url.clone()))
    }

    /// Override the default model
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    /// Override the API base URL (used for test doubles)
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn build_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}?key={}",
            self.base_url, model, method, self.api_key
        )
    }

    fn build_request(&self, request: &GenerationRequest) -> GeminiRequest {
        let system_instruction = request.system_instruction.as_ref().map(|text| GeminiContent {
            role: None,
            parts: vec![ContentPart::Text { text: text.clone() }],
        });

        // The API rejects a JSON response mime type on grounded requests, so
        // grounding wins and the caller parses fenced text instead.
        let response_mime_type = if request.json_response && !request.grounded {
            Some("application/json".to_string())
        } else {
            None
        };

        let tools = request.grounded.then(|| {
            vec![GeminiTool {
                google_search: GoogleSearch {},
            }]
        });

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![ContentPart::Text {
                    text: request.prompt.clone(),
                }],
            }],
            system_instruction,
            generation_config: Some(GenerationConfig {
                temperature: request.temperature,
                response_mime_type,
                response_modalities: None,
                candidate_count: Some(1),
            }),
            tools,
        }
    }

    async fn post(&self, model: &str, body: &GeminiRequest) -> Result<GeminiResponse, AppError> {
        let url = self.build_url(model, "generateContent");
        debug!(model = %model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::external_service("gemini", format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(status = %status, "Gemini API returned an error status");
            return Err(AppError::external_service(
                "gemini",
                format!("API error {status}: {detail}"),
            ));
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            AppError::external_service("gemini", format!("Invalid response body: {e}"))
        })?;

        if let Some(error) = parsed.error {
            return Err(AppError::external_service("gemini", error.message));
        }
        Ok(parsed)
    }

    fn first_candidate(response: GeminiResponse) -> Result<GeminiContent, AppError> {
        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| AppError::external_service("gemini", "Response had no candidates"))?;
        if let Some(reason) = candidate
            .finish_reason
            .as_deref()
            .filter(|r| *r != "STOP" && *r != "MAX_TOKENS")
        {
            return Err(AppError::external_service(
                "gemini",
                format!("Generation stopped: {reason}"),
            ));
        }
        candidate
            .content
            .ok_or_else(|| AppError::external_service("gemini", "Candidate had no content"))
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn display_name(&self) -> &'static str {
        "Google Gemini"
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, AppError> {
        let model = request.model.as_deref().unwrap_or(&self.default_model);
        let body = self.build_request(request);
        let response = self.post(model, &body).await?;
        let content = Self::first_candidate(response)?;

        let text = content
            .parts
            .into_iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text),
                ContentPart::InlineData { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("");
        if text.is_empty() {
            return Err(AppError::external_service(
                "gemini",
                "Response contained no text",
            ));
        }
        Ok(text)
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, AppError> {
        let body = GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_string()),
                parts: vec![ContentPart::Text {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                temperature: None,
                response_mime_type: None,
                response_modalities: Some(vec!["IMAGE".to_string(), "TEXT".to_string()]),
                candidate_count: Some(1),
            }),
            tools: None,
        };
        let response = self.post(IMAGE_MODEL, &body).await?;
        let content = Self::first_candidate(response)?;

        content
            .parts
            .into_iter()
            .find_map(|part| match part {
                ContentPart::InlineData { inline_data } => Some(GeneratedImage {
                    data: inline_data.data,
                    mime_type: inline_data.mime_type,
                }),
                ContentPart::Text { .. } => None,
            })
            .ok_or_else(|| AppError::external_service("gemini", "Response contained no image"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new("test-key")
    }

    #[test]
    fn builds_url_with_model_and_key() {
        let url = client().build_url("gemini-2.5-flash", "generateContent");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=test-key"
        );
    }

    #[test]
    fn json_mode_sets_response_mime_type() {
        let body = client().build_request(&GenerationRequest::new("hi").expecting_json());
        let config = body.generation_config.unwrap();
        assert_eq!(config.response_mime_type.as_deref(), Some("application/json"));
        assert!(body.tools.is_none());
    }

    #[test]
    fn grounding_enables_search_and_suppresses_json_mime() {
        let body = client()
            .build_request(&GenerationRequest::new("hi").expecting_json().with_grounding());
        let config = body.generation_config.unwrap();
        assert!(config.response_mime_type.is_none());
        assert_eq!(body.tools.map(|t| t.len()), Some(1));
    }

    #[test]
    fn system_instruction_travels_separately() {
        let body =
            client().build_request(&GenerationRequest::new("hi").with_system("be helpful"));
        let system = body.system_instruction.unwrap();
        assert!(system.role.is_none());
        assert_eq!(body.contents.len(), 1);
        assert_eq!(body.contents[0].role.as_deref(), Some("user"));
    }

    #[test]
    fn first_candidate_rejects_empty_and_blocked_responses() {
        let empty = GeminiResponse {
            candidates: vec![],
            error: None,
        };
        assert!(GeminiClient::first_candidate(empty).is_err());

        let blocked = GeminiResponse {
            candidates: vec![Candidate {
                content: Some(GeminiContent {
                    role: None,
                    parts: vec![],
                }),
                finish_reason: Some("SAFETY".to_string()),
            }],
            error: None,
        };
        assert!(GeminiClient::first_candidate(blocked).is_err());
    }

    #[test]
    fn response_parses_inline_image_part() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}}]
                },
                "finishReason": "STOP"
            }]
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let content = GeminiClient::first_candidate(parsed).unwrap();
        assert!(matches!(
            content.parts.first(),
            Some(ContentPart::InlineData { .. })
        ));
    }
}
