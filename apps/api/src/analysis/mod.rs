//! CV analysis: prompt the completion endpoint and turn its reply into an outcome.
//!
//! `AppState` carries an `Arc<dyn CvAnalyzer>` so the backend can be swapped
//! (tests use a deterministic stub).

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::llm_client::{strip_json_fences, ChatCompletion, LlmClient, RawReply};

pub mod handlers;
pub mod prompts;

use prompts::{build_prompt, CV_ANALYSIS_SYSTEM};

pub const UPSTREAM_CALL_FAILED: &str = "Appel à OpenRouter échoué";
pub const REPLY_PARSE_FAILED: &str = "Erreur d'analyse ou de parsing JSON";

/// The JSON object produced by the model. Passed through without schema checks.
pub type AnalysisResult = Map<String, Value>;

/// Diagnostic body returned instead of an analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Success(AnalysisResult),
    Failure(ErrorDetail),
}

#[async_trait]
pub trait CvAnalyzer: Send + Sync {
    /// Never fails outward: every failure is folded into `AnalysisOutcome::Failure`.
    async fn analyze(&self, cv_text: &str, job_title: &str) -> AnalysisOutcome;
}

/// Analyzer backed by the chat-completion endpoint.
pub struct LlmCvAnalyzer {
    llm: LlmClient,
}

impl LlmCvAnalyzer {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl CvAnalyzer for LlmCvAnalyzer {
    async fn analyze(&self, cv_text: &str, job_title: &str) -> AnalysisOutcome {
        let prompt = build_prompt(cv_text, job_title);

        let reply = match self.llm.chat(CV_ANALYSIS_SYSTEM, &prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Completion call to {} failed: {e}", self.llm.endpoint());
                return AnalysisOutcome::Failure(ErrorDetail {
                    error: UPSTREAM_CALL_FAILED.to_string(),
                    status_code: None,
                    details: Some(format!("{e:#}")),
                    response: None,
                });
            }
        };

        interpret_reply(reply)
    }
}

/// Maps a raw completion reply onto an outcome.
pub fn interpret_reply(reply: RawReply) -> AnalysisOutcome {
    if !reply.status.is_success() {
        return AnalysisOutcome::Failure(ErrorDetail {
            error: UPSTREAM_CALL_FAILED.to_string(),
            status_code: Some(reply.status.as_u16()),
            details: None,
            response: Some(reply.body),
        });
    }

    match parse_analysis(&reply.body) {
        Ok(result) => {
            info!("Analysis parsed ({} top-level keys)", result.len());
            AnalysisOutcome::Success(result)
        }
        Err(details) => {
            warn!("Could not parse analysis reply: {details}");
            AnalysisOutcome::Failure(ErrorDetail {
                error: REPLY_PARSE_FAILED.to_string(),
                status_code: None,
                details: Some(details),
                response: Some(reply.body),
            })
        }
    }
}

fn parse_analysis(body: &str) -> Result<AnalysisResult, String> {
    let completion: ChatCompletion = serde_json::from_str(body)
        .map_err(|e| format!("invalid completion envelope: {e}"))?;

    let content = completion
        .first_content()
        .ok_or_else(|| "completion has no message content".to_string())?;

    match serde_json::from_str::<Value>(strip_json_fences(content)) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(format!("expected a JSON object, got {}", json_kind(&other))),
        Err(e) => Err(format!("message content is not valid JSON: {e}")),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
