//! Career tools: skills translator, resume refiner, interview coach and the
//! general assistant.
//!
//! None of these fail because of the completion backend. A missing API key,
//! a transport error or unparseable output turns into an empty list or a
//! fixed fallback reply, and the cause is logged at `warn`.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::models::career::{ChatRole, ChatTurn, ResumeRefinement, TranslationResult};
use crate::services::completion_service::{CompletionRequest, CompletionService, ModelTier};

pub const INTERVIEW_EMPTY_REPLY: &str =
    "I'm having trouble connecting right now, but keep practicing!";
pub const INTERVIEW_ERROR_REPLY: &str = "Something went wrong. Let's try another question.";
pub const ASSISTANT_EMPTY_REPLY: &str =
    "I'm here to help, but I'm having trouble with the communication uplink. Please try again.";
pub const ASSISTANT_ERROR_REPLY: &str =
    "My systems are currently experiencing an outage. Please check back shortly, Sgt.";

const ASSISTANT_SYSTEM_INSTRUCTION: &str = "You are the VetPath Command Assistant, an AI that \
supports veterans in their transition to civilian life. Your tone is professional, respectful, \
disciplined yet supportive. Answer questions about the VetPath Academy learning platform, career \
advice, benefits navigation and general veteran support. Be concise and helpful.";

fn translate_prompt(mos_code: &str, description: &str) -> String {
    format!(
        "As a veteran career coach, map the following Military Occupational Specialty (MOS) \
         or role to 3 relevant civilian career paths.\n\
         MOS Code: {mos_code}\n\
         Experience Description: {description}\n\n\
         For each path give the relevance, matching skills, skill gaps and suggested course topics."
    )
}

fn resume_prompt(bullet: &str) -> String {
    format!(
        "Rewrite this military resume bullet as 3 different high-impact civilian versions \
         suitable for a corporate resume.\n\
         Military Bullet: \"{bullet}\"\n\
         Replace jargon such as 'command', 'accountability', 'NCOIC' and 'deployment' with \
         business terms such as 'management', 'inventory control', 'team lead' and 'global operations'."
    )
}

fn interview_prompt(last_answer: &str) -> String {
    format!(
        "You are an expert interview coach for veterans.\n\
         Context: the user is a transitioning veteran practising for a civilian job interview.\n\
         Last user response: \"{last_answer}\"\n\n\
         1. Give short, encouraging feedback on the response (at most 2 sentences) and point out \
         any military-speak to avoid.\n\
         2. Ask the next relevant interview question.\n\n\
         Keep the tone professional yet supportive."
    )
}

fn translation_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "civilianRole": {"type": "STRING"},
                "relevance": {"type": "STRING"},
                "matchingSkills": {"type": "ARRAY", "items": {"type": "STRING"}},
                "suggestedCourses": {"type": "ARRAY", "items": {"type": "STRING"}},
                "skillGaps": {"type": "ARRAY", "items": {"type": "STRING"}}
            },
            "required": ["civilianRole", "relevance", "matchingSkills", "suggestedCourses", "skillGaps"]
        }
    })
}

fn refinement_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "civilianVersion": {"type": "STRING"},
                "whyItWorks": {"type": "STRING"}
            },
            "required": ["civilianVersion", "whyItWorks"]
        }
    })
}

/// Strip a Markdown code fence some models wrap JSON in.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse a JSON array of `T`, or nothing.
pub fn parse_json_list<T: DeserializeOwned>(text: &str) -> Vec<T> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<T>>(body) {
        Ok(items) => items,
        Err(e) => {
            warn!(error = %e, "Discarding unparseable completion output");
            Vec::new()
        }
    }
}

pub struct CareerService {
    completion: Option<Arc<dyn CompletionService>>,
}

impl CareerService {
    pub fn new(completion: Option<Arc<dyn CompletionService>>) -> Self {
        Self { completion }
    }

    /// Service with no backend; every tool returns its fallback.
    pub fn disabled() -> Self {
        Self { completion: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.completion.is_some()
    }

    async fn complete(&self, tool: &'static str, request: CompletionRequest) -> Option<String> {
        let Some(completion) = &self.completion else {
            warn!(tool, "Completion backend not configured");
            return None;
        };
        match completion.complete(request).await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(tool, error = %e, "Completion request failed");
                None
            }
        }
    }

    /// Three civilian career paths for a military specialty.
    pub async fn translate_skills(
        &self,
        mos_code: &str,
        description: &str,
    ) -> Result<Vec<TranslationResult>> {
        if mos_code.trim().is_empty() {
            return Err(AppError::Validation("mosCode is required".to_string()));
        }
        let request = CompletionRequest::prompt(translate_prompt(mos_code.trim(), description.trim()))
            .with_schema(translation_schema());
        Ok(self
            .complete("translate", request)
            .await
            .map(|text| parse_json_list(&text))
            .unwrap_or_default())
    }

    /// Three civilian rewrites of a resume bullet.
    pub async fn refine_bullet(&self, bullet: &str) -> Result<Vec<ResumeRefinement>> {
        if bullet.trim().is_empty() {
            return Err(AppError::Validation("bullet is required".to_string()));
        }
        let request =
            CompletionRequest::prompt(resume_prompt(bullet.trim())).with_schema(refinement_schema());
        Ok(self
            .complete("resume", request)
            .await
            .map(|text| parse_json_list(&text))
            .unwrap_or_default())
    }

    /// Feedback on the latest answer plus the next question.
    pub async fn interview_reply(&self, history: &[ChatTurn]) -> Result<String> {
        let last_answer = history
            .iter()
            .rev()
            .find(|turn| turn.role == ChatRole::User)
            .map(|turn| turn.text.trim())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| {
                AppError::Validation("history must contain a user answer".to_string())
            })?;

        let reply = match self
            .complete("interview", CompletionRequest::prompt(interview_prompt(last_answer)))
            .await
        {
            Some(text) if !text.trim().is_empty() => text,
            Some(_) => INTERVIEW_EMPTY_REPLY.to_string(),
            None => INTERVIEW_ERROR_REPLY.to_string(),
        };
        Ok(reply)
    }

    /// Next assistant turn for a conversation.
    pub async fn assistant_reply(&self, history: Vec<ChatTurn>) -> Result<String> {
        if history.is_empty() {
            return Err(AppError::Validation("history must not be empty".to_string()));
        }
        let request = CompletionRequest::conversation(
            ModelTier::Assistant,
            ASSISTANT_SYSTEM_INSTRUCTION,
            history,
        );
        let reply = match self.complete("assistant", request).await {
            Some(text) if !text.trim().is_empty() => text,
            Some(_) => ASSISTANT_EMPTY_REPLY.to_string(),
            None => ASSISTANT_ERROR_REPLY.to_string(),
        };
        Ok(reply)
    }
}
