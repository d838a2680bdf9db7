//! Text-completion backend for the career tools.
//!
//! ## Configuration
//!
//! ```bash
//! GEMINI_API_KEY=...
//! GEMINI_BASE_URL=https://generativelanguage.googleapis.com/v1beta
//! GEMINI_MODEL=gemini-3-flash-preview
//! GEMINI_ASSISTANT_MODEL=gemini-3-pro-preview
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::career::{ChatRole, ChatTurn};

/// Which configured model serves a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Structured tools: translator, refiner, interview coach
    Standard,
    /// Open-ended general assistant
    Assistant,
}

/// One completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub tier: ModelTier,
    pub system_instruction: Option<String>,
    pub turns: Vec<ChatTurn>,
    /// When set, the model is asked for JSON matching this schema.
    pub response_schema: Option<Value>,
}

impl CompletionRequest {
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            tier: ModelTier::Standard,
            system_instruction: None,
            turns: vec![ChatTurn::user(text)],
            response_schema: None,
        }
    }

    pub fn conversation(tier: ModelTier, system: impl Into<String>, turns: Vec<ChatTurn>) -> Self {
        Self {
            tier,
            system_instruction: Some(system.into()),
            turns,
            response_schema: None,
        }
    }

    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }
}

/// Anything that turns a prompt into text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String>;
}

/// Generative-language API client configuration
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub assistant_model: String,
    pub timeout_secs: u64,
}

redacted_debug!(GeminiConfig {
    redact api_key,
    show base_url,
    show model,
    show assistant_model,
    show timeout_secs,
});

impl GeminiConfig {
    /// `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let api_key = config.gemini_api_key.clone()?;
        Some(Self {
            api_key,
            base_url: config.gemini_base_url.trim_end_matches('/').to_string(),
            model: config.gemini_model.clone(),
            assistant_model: config.gemini_assistant_model.clone(),
            timeout_secs: config.http_timeout_secs,
        })
    }
}

// ============ Wire types ============

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

fn wire_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Model => "model",
    }
}

/// Generative-language API client
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, config })
    }

    fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Standard => &self.config.model,
            ModelTier::Assistant => &self.config.assistant_model,
        }
    }

    fn build_body<'a>(request: &'a CompletionRequest) -> GenerateContentRequest<'a> {
        GenerateContentRequest {
            contents: request
                .turns
                .iter()
                .map(|turn| Content {
                    role: Some(wire_role(turn.role)),
                    parts: vec![Part { text: &turn.text }],
                })
                .collect(),
            system_instruction: request.system_instruction.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
            generation_config: request.response_schema.as_ref().map(|schema| GenerationConfig {
                response_mime_type: "application/json",
                response_schema: schema,
            }),
        }
    }
}

#[async_trait]
impl CompletionService for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        let model = self.model_for(request.tier);
        let url = format!("{}/models/{}:generateContent", self.config.base_url, model);
        debug!(model = %model, turns = request.turns.len(), "Requesting completion");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&Self::build_body(&request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "completion API returned {status}: {message}"
            )));
        }

        let body: GenerateContentResponse = response.json().await?;
        Ok(body.text())
    }
}
