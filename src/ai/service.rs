// ABOUTME: The five fixed AI operations with per-operation request lifecycle
// ABOUTME: Provider and parse failures collapse to absent results at this boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Larder Contributors

//! # AI Service Operations
//!
//! [`AiService`] wraps a [`GenerativeProvider`] with the five operations the
//! application exposes. Each operation tracks its own lifecycle: it starts
//! idle, a call moves it to pending, and completion lands on resolved or
//! failed. A second call while one is pending is rejected with a
//! `RequestPending` error; that rejection is the only error these operations
//! surface. Everything that goes wrong downstream of it (transport, API,
//! unparseable payload) yields `None`.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use tracing::warn;

use super::prompts;
use super::responses::{
    parse_payload, GeneratedRecipe, PriceComparison, RecipeSearchResult, StoreSuggestion,
};
use super::{GeneratedImage, GenerationRequest, GenerativeProvider};
use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::ShoppingListItem;

/// The five AI-backed operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiOperation {
    /// Suggest one recipe from available ingredients and criteria
    SuggestRecipe,
    /// Search the web for recipes
    SearchRecipes,
    /// Generate a cover image for a recipe
    GenerateImage,
    /// Compare shopping list prices across stores
    ComparePrices,
    /// Locate stores stocking the shopping list
    LocateStores,
}

impl AiOperation {
    /// String identifier used in logs and error messages
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SuggestRecipe => "suggest_recipe",
            Self::SearchRecipes => "search_recipes",
            Self::GenerateImage => "generate_image",
            Self::ComparePrices => "compare_prices",
            Self::LocateStores => "locate_stores",
        }
    }
}

impl std::fmt::Display for AiOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle phase of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestPhase {
    /// No request has run yet
    #[default]
    Idle,
    /// A request is in flight
    Pending,
    /// The last request produced a result
    Resolved,
    /// The last request produced nothing
    Failed,
}

/// Parameters for a recipe suggestion
#[derive(Debug, Clone, Default)]
pub struct SuggestionRequest {
    /// Ingredients the cook has on hand
    pub ingredients: Vec<String>,
    /// Free-form wishes ("quick", "one pot", ...)
    pub criteria: Option<String>,
    /// Dietary restrictions the recipe must honor
    pub dietary: Vec<String>,
    /// Reply language code
    pub language: String,
}

impl SuggestionRequest {
    /// Create an empty suggestion request in the default language
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: defaults::LANGUAGE.to_string(),
            ..Self::default()
        }
    }

    /// Set the available ingredients
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = ingredients;
        self
    }

    /// Set the free-form criteria
    #[must_use]
    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.criteria = Some(criteria.into());
        self
    }

    /// Set the dietary restrictions
    #[must_use]
    pub fn with_dietary(mut self, dietary: Vec<String>) -> Self {
        self.dietary = dietary;
        self
    }

    /// Set the reply language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// AI operations service over a generative provider
pub struct AiService<P> {
    provider: P,
    phases: Mutex<HashMap<AiOperation, RequestPhase>>,
}

impl<P: GenerativeProvider> AiService<P> {
    /// Create a service over a provider
    #[must_use]
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            phases: Mutex::new(HashMap::new()),
        }
    }

    /// Access the underlying provider
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Current lifecycle phase of an operation
    #[must_use]
    pub fn phase(&self, operation: AiOperation) -> RequestPhase {
        self.phases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&operation)
            .copied()
            .unwrap_or_default()
    }

    fn begin(&self, operation: AiOperation) -> AppResult<()> {
        let mut phases = self.phases.lock().unwrap_or_else(PoisonError::into_inner);
        if phases.get(&operation) == Some(&RequestPhase::Pending) {
            return Err(AppError::request_pending(operation.as_str()));
        }
        phases.insert(operation, RequestPhase::Pending);
        Ok(())
    }

    fn finish(&self, operation: AiOperation, resolved: bool) {
        let phase = if resolved {
            RequestPhase::Resolved
        } else {
            RequestPhase::Failed
        };
        self.phases
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(operation, phase);
    }

    async fn generate_text(&self, request: &GenerationRequest) -> Option<String> {
        match self.provider.generate(request).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(provider = %self.provider.name(), error = %e, "Text generation failed");
                None
            }
        }
    }

    fn log_outcome(&self, operation: AiOperation, started: Instant, success: bool) {
        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_ai_request(
            operation.as_str(),
            self.provider.default_model(),
            success,
            elapsed,
        );
    }

    // ================================================================================
    // Operations
    // ================================================================================

    /// Suggest one recipe for the given ingredients and criteria
    ///
    /// # Errors
    ///
    /// Returns `RequestPending` when a suggestion is already in flight.
    /// Provider or parse failures yield `Ok(None)`.
    pub async fn suggest_recipe(
        &self,
        request: &SuggestionRequest,
    ) -> AppResult<Option<GeneratedRecipe>> {
        let operation = AiOperation::SuggestRecipe;
        self.begin(operation)?;
        let started = Instant::now();

        let prompt = prompts::suggest_recipe(
            &request.ingredients,
            request.criteria.as_deref(),
            &request.dietary,
            &request.language,
        );
        let generation = GenerationRequest::new(prompt)
            .with_system(prompts::culinary_system_prompt())
            .expecting_json();
        let result = self
            .generate_text(&generation)
            .await
            .and_then(|text| parse_payload(&text));

        self.log_outcome(operation, started, result.is_some());
        self.finish(operation, result.is_some());
        Ok(result)
    }

    /// Search the web for recipes matching a query
    ///
    /// # Errors
    ///
    /// Returns `RequestPending` when a search is already in flight.
    pub async fn search_recipes(
        &self,
        query: &str,
        language: &str,
    ) -> AppResult<Option<RecipeSearchResult>> {
        let operation = AiOperation::SearchRecipes;
        self.begin(operation)?;
        let started = Instant::now();

        let generation = GenerationRequest::new(prompts::search_recipes(query, language))
            .with_system(prompts::culinary_system_prompt())
            .with_grounding();
        let result = self
            .generate_text(&generation)
            .await
            .and_then(|text| parse_payload(&text));

        self.log_outcome(operation, started, result.is_some());
        self.finish(operation, result.is_some());
        Ok(result)
    }

    /// Generate a cover image for a recipe
    ///
    /// # Errors
    ///
    /// Returns `RequestPending` when an image generation is already in flight.
    pub async fn generate_recipe_image(
        &self,
        title: &str,
        description: &str,
    ) -> AppResult<Option<GeneratedImage>> {
        let operation = AiOperation::GenerateImage;
        self.begin(operation)?;
        let started = Instant::now();

        let prompt = prompts::recipe_image(title, description);
        let result = match self.provider.generate_image(&prompt).await {
            Ok(image) => Some(image),
            Err(e) => {
                warn!(provider = %self.provider.name(), error = %e, "Image generation failed");
                None
            }
        };

        self.log_outcome(operation, started, result.is_some());
        self.finish(operation, result.is_some());
        Ok(result)
    }

    /// Compare basket prices for the shopping list across nearby stores
    ///
    /// # Errors
    ///
    /// Returns `RequestPending` when a comparison is already in flight.
    pub async fn compare_prices(
        &self,
        items: &[ShoppingListItem],
        location: &str,
        language: &str,
    ) -> AppResult<Option<PriceComparison>> {
        let operation = AiOperation::ComparePrices;
        self.begin(operation)?;
        let started = Instant::now();

        let generation = GenerationRequest::new(prompts::compare_prices(items, location, language))
            .with_grounding();
        let result = self
            .generate_text(&generation)
            .await
            .and_then(|text| parse_payload(&text));

        self.log_outcome(operation, started, result.is_some());
        self.finish(operation, result.is_some());
        Ok(result)
    }

    /// Locate stores near a location that stock the shopping list
    ///
    /// # Errors
    ///
    /// Returns `RequestPending` when a lookup is already in flight.
    pub async fn locate_stores(
        &self,
        items: &[ShoppingListItem],
        location: &str,
        language: &str,
    ) -> AppResult<Option<Vec<StoreSuggestion>>> {
        let operation = AiOperation::LocateStores;
        self.begin(operation)?;
        let started = Instant::now();

        let generation = GenerationRequest::new(prompts::locate_stores(items, location, language))
            .with_grounding();
        let result = self
            .generate_text(&generation)
            .await
            .and_then(|text| parse_payload(&text));

        self.log_outcome(operation, started, result.is_some());
        self.finish(operation, result.is_some());
        Ok(result)
    }
}
