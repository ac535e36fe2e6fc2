//! Gemini API client utilities
//!
//! Typed request/response structs for the Generative Language
//! `generateContent` endpoint, plus the [`TextGenerator`] seam both front
//! ends call through.

use crate::http::get_client;
use anyhow::{Context as _, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Request payload for the generateContent API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Create a single-turn request: one system instruction, one user message
    pub fn new(system_instruction: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            system_instruction: Content::from_text(system_instruction),
            contents: vec![Content::from_text(prompt)],
        }
    }
}

/// A content block of one or more text parts
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Content {
    pub parts: Vec<Part>,
}

impl Content {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// A single text part within a content block
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Part {
    pub text: String,
}

/// Response from the generateContent API
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Get the text of the first candidate, if available
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text: String = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect();
        (!text.is_empty()).then_some(text)
    }

    /// Get the text of the first candidate, or an error if not available
    pub fn text_or_err(&self) -> Result<String> {
        self.text()
            .context("No response content from API (empty candidates)")
    }
}

/// A single response candidate
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Content,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// The upstream generation seam. Front ends depend on this trait so tests can
/// substitute a deterministic stub for the real API.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// One complete (non-streamed) generation call
    async fn generate(&self, system_instruction: &str, prompt: &str) -> Result<String>;
}

/// Client handle for the Gemini generateContent API
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, system_instruction: &str, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest::new(system_instruction, prompt);
        let url = format!("{}/{}:generateContent", API_BASE, self.model);

        let response = get_client()
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            anyhow::bail!("Gemini API error {}: {}", status, text);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        parsed.text_or_err()
    }
}
