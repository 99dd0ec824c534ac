use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Seam between the pipeline and the model provider. Returns the raw response
/// text, prose and all; extracting questions from it is the parser's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

/// Gemini `generateContent` client. One request per call, no retries; the
/// caller decides what a failure means.
pub struct GeminiGenerator {
    http: reqwest::Client,
    api_key: secrecy::SecretString,
    model: String,
    timeout: Duration,
}

impl GeminiGenerator {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            timeout: Duration::from_secs(config.generation_timeout_secs),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE,
            self.model,
            self.api_key.expose_secret()
        )
    }

    async fn call_model(&self, prompt: &str) -> AppResult<String> {
        let request_body = json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let response = self
            .http
            .post(self.endpoint())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::GenerationError(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::GenerationError(format!(
                "model API returned {}: {}",
                status, body
            )));
        }

        let parsed: GeminiResponse = response
            .json()
            .await
            .map_err(|e| AppError::GenerationError(format!("unreadable response: {}", e)))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(AppError::GenerationError(
                "model returned no candidates".to_string(),
            ));
        }

        Ok(text)
    }
}

#[async_trait]
impl QuestionGenerator for GeminiGenerator {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        log::debug!("Submitting generation prompt ({} bytes)", prompt.len());

        tokio::time::timeout(self.timeout, self.call_model(prompt))
            .await
            .map_err(|_| {
                AppError::GenerationError(format!(
                    "model call exceeded {}s timeout",
                    self.timeout.as_secs()
                ))
            })?
    }
}
