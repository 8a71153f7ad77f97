//! Blocking client for the generative-AI endpoint.
//!
//! Both operations send exactly one `generateContent` request with a JSON
//! response schema and parse the text reply. Any fault (missing credential,
//! transport error, non-2xx status, empty reply, shape mismatch) is caught
//! here and replaced with a deterministic fallback value, so callers never
//! see an error. Latencies and failures are logged; the API key and reply
//! contents are not.

use std::env;
use std::time::Instant;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{error, info};

use crate::gateway::prompt;
use crate::session::task::{CodeTask, Difficulty, FeedbackResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_VAR: &str = "GEMINI_API_KEY";
const USER_AGENT: &str = concat!("deepclone/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("GEMINI_API_KEY is not set")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("endpoint returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("empty reply from model")]
    EmptyReply,
    #[error("reply did not match the expected shape: {0}")]
    Shape(#[from] serde_json::Error),
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: Option<String>,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Build the client. A missing API key is not an error here: it
    /// surfaces later as per-call failures, handled by the fallbacks.
    pub fn new(model: impl Into<String>, base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            api_key: env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()),
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// Generate a fresh clone-coding task. Never fails: any fault yields
    /// the sentinel task carrying the requested difficulty.
    pub fn generate_task(&self, difficulty: Difficulty, topic: Option<&str>) -> CodeTask {
        let start = Instant::now();
        match self.try_generate(difficulty, topic) {
            Ok(task) => {
                info!(
                    model = %self.model,
                    difficulty = difficulty.as_str(),
                    elapsed = ?start.elapsed(),
                    code_lines = task.code.lines().count(),
                    "task generated"
                );
                task
            }
            Err(err) => {
                error!(
                    model = %self.model,
                    difficulty = difficulty.as_str(),
                    elapsed = ?start.elapsed(),
                    error = %err,
                    "task generation failed, substituting fallback"
                );
                fallback_task(difficulty)
            }
        }
    }

    /// Score a retyped submission. Never fails: any fault yields the
    /// zero-score sentinel feedback.
    pub fn evaluate(&self, original: &str, candidate: &str) -> FeedbackResult {
        let start = Instant::now();
        match self.try_evaluate(original, candidate) {
            Ok(result) => {
                info!(
                    model = %self.model,
                    elapsed = ?start.elapsed(),
                    score = result.score,
                    is_correct = result.is_correct,
                    "submission evaluated"
                );
                result
            }
            Err(err) => {
                error!(
                    model = %self.model,
                    elapsed = ?start.elapsed(),
                    error = %err,
                    "evaluation failed, substituting fallback"
                );
                fallback_feedback()
            }
        }
    }

    fn try_generate(&self, difficulty: Difficulty, topic: Option<&str>) -> Result<CodeTask, GatewayError> {
        let text = self.request_json(
            prompt::generation_prompt(difficulty, topic),
            prompt::generation_schema(),
            Some(prompt::GENERATION_SYSTEM_INSTRUCTION),
        )?;
        parse_task_reply(&text, difficulty)
    }

    fn try_evaluate(&self, original: &str, candidate: &str) -> Result<FeedbackResult, GatewayError> {
        let text = self.request_json(
            prompt::evaluation_prompt(original, candidate),
            prompt::evaluation_schema(),
            None,
        )?;
        parse_feedback_reply(&text)
    }

    /// One request, one reply: no retries, no caching.
    fn request_json(
        &self,
        prompt: String,
        schema: Value,
        system_instruction: Option<&str>,
    ) -> Result<String, GatewayError> {
        let api_key = self.api_key.as_deref().ok_or(GatewayError::MissingApiKey)?;
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let req = GenerateContentRequest {
            contents: vec![Content::from_text(prompt)],
            generation_config: GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            },
            system_instruction: system_instruction.map(|s| Content::from_text(s.to_string())),
        };

        let res = self
            .http
            .post(&url)
            .query(&[("key", api_key)])
            .json(&req)
            .send()?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().unwrap_or_default();
            let message = extract_api_error(&body).unwrap_or_else(|| truncate(&body, 300));
            return Err(GatewayError::Status { status, message });
        }

        let body: GenerateContentResponse = res.json()?;
        let text = body.reply_text();
        if text.trim().is_empty() {
            return Err(GatewayError::EmptyReply);
        }
        Ok(text)
    }
}

/// Sentinel task surfaced as task content itself when generation fails.
pub fn fallback_task(difficulty: Difficulty) -> CodeTask {
    CodeTask {
        id: "fallback".to_string(),
        title: "과제 생성 오류".to_string(),
        description: "API 키를 확인하거나 다시 시도해주세요.".to_string(),
        language: "python".to_string(),
        code: "# 과제를 불러올 수 없습니다".to_string(),
        explanation: "오류 발생".to_string(),
        difficulty,
    }
}

/// Sentinel feedback when evaluation fails.
pub fn fallback_feedback() -> FeedbackResult {
    FeedbackResult {
        score: 0,
        is_correct: false,
        feedback: "평가에 실패했습니다. 다시 시도해주세요.".to_string(),
        suggestions: Vec::new(),
    }
}

/// Validate the generation reply against the expected field set and stamp
/// a fresh id plus the requested difficulty onto it.
pub fn parse_task_reply(text: &str, difficulty: Difficulty) -> Result<CodeTask, GatewayError> {
    let payload: TaskPayload = serde_json::from_str(text)?;
    Ok(CodeTask {
        id: chrono::Utc::now().timestamp_millis().to_string(),
        title: payload.title,
        description: payload.description,
        language: payload.language,
        code: payload.code,
        explanation: payload.explanation,
        difficulty,
    })
}

/// Validate the evaluation reply. The score is clamped to [0, 100] and
/// rounded to an integer at this boundary.
pub fn parse_feedback_reply(text: &str) -> Result<FeedbackResult, GatewayError> {
    let payload: FeedbackPayload = serde_json::from_str(text)?;
    Ok(FeedbackResult {
        score: payload.score.round().clamp(0.0, 100.0) as u8,
        is_correct: payload.is_correct,
        feedback: payload.feedback,
        suggestions: payload.suggestions,
    })
}

// --- Wire DTOs ---

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn from_text(text: String) -> Self {
        Self {
            parts: vec![Part { text }],
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    fn reply_text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .map(|p| p.text.as_str())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Reply payload of a generation call, before id/difficulty stamping.
#[derive(Deserialize)]
struct TaskPayload {
    title: String,
    description: String,
    code: String,
    explanation: String,
    language: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedbackPayload {
    score: f64,
    is_correct: bool,
    feedback: String,
    suggestions: Vec<String>,
}

/// Pull the human-readable message out of an API error body, if present.
fn extract_api_error(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value["error"]["message"].as_str().map(|s| truncate(s, 300))
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        s.chars().take(max_chars).collect()
    }
}
