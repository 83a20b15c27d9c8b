use super::parse::parse_draft;
use super::prompt::build_prompt;
use crate::domain::entities::decision::DecisionDraft;
use crate::domain::error::DomainError;
use crate::domain::ports::decision_provider::{DecisionContext, DecisionProvider};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MAX_ATTEMPTS: u32 = 3;

/// Google Gemini over the REST `generateContent` endpoint.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    /// Pause before retry `n` (0-based) is `pause_base + n * pause_step`.
    pause_base: Duration,
    pause_step: Duration,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// A failed call and whether it is worth trying again.
struct CallError {
    error: DomainError,
    retryable: bool,
}

impl GeminiProvider {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(180))
                .build()
                .unwrap_or_default(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
            pause_base: Duration::from_secs(30),
            pause_step: Duration::from_secs(20),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_pause(mut self, base: Duration, step: Duration) -> Self {
        self.pause_base = base;
        self.pause_step = step;
        self
    }

    async fn generate(&self, prompt: &str) -> Result<String, CallError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| CallError {
                retryable: e.is_timeout(),
                error: DomainError::Reasoning(format!("Gemini request failed: {e}")),
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let lower = body.to_lowercase();
            let retryable = status == StatusCode::TOO_MANY_REQUESTS
                || status == StatusCode::GATEWAY_TIMEOUT
                || lower.contains("quota")
                || lower.contains("resource_exhausted")
                || lower.contains("deadline");
            return Err(CallError {
                retryable,
                error: DomainError::Reasoning(format!("Gemini API {status}: {body}")),
            });
        }

        let parsed: GenerateResponse = resp.json().await.map_err(|e| CallError {
            retryable: false,
            error: DomainError::Reasoning(format!("Gemini response decode failed: {e}")),
        })?;
        let text: String = parsed
            .candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .filter_map(|p| p.text)
            .collect();
        if text.trim().is_empty() {
            return Err(CallError {
                retryable: false,
                error: DomainError::Reasoning("empty response from model".into()),
            });
        }
        Ok(text)
    }
}

#[async_trait]
impl DecisionProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn propose(&self, context: &DecisionContext) -> Result<DecisionDraft, DomainError> {
        let prompt = build_prompt(context);
        info!(model = %self.model, prompt_chars = prompt.len(), "Calling Gemini");

        let mut attempt = 0;
        loop {
            match self.generate(&prompt).await {
                Ok(text) => return parse_draft(&text),
                Err(CallError { error, retryable }) if retryable && attempt + 1 < MAX_ATTEMPTS => {
                    let pause = self.pause_base + self.pause_step * attempt;
                    warn!(attempt, error = %error, pause_secs = pause.as_secs(), "Gemini call failed; retrying");
                    tokio::time::sleep(pause).await;
                    attempt += 1;
                }
                Err(CallError { error, .. }) => return Err(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::values::game_rules::GameRules;
    use crate::domain::values::gameweek::Gameweek;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context() -> DecisionContext {
        DecisionContext {
            gameweek: Gameweek::new(3).unwrap(),
            squad: vec![],
            bank: Some(0),
            free_transfers: Some(1),
            chips_available: vec![],
            players: vec![],
            fixtures: vec![],
            rules: GameRules::default(),
        }
    }

    fn provider(server: &MockServer) -> GeminiProvider {
        GeminiProvider::new("test-key".into(), None)
            .with_base_url(server.uri())
            .with_retry_pause(Duration::from_millis(1), Duration::from_millis(1))
    }

    fn reply(text: &str) -> serde_json::Value {
        serde_json::json!({
            "candidates": [{"content": {"parts": [{"text": text}]}}]
        })
    }

    #[tokio::test]
    async fn test_propose_parses_model_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/gemini-2.5-flash:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply(
                "Thinking...\n```json\n{\"captain_id\": 13, \"chip\": \"bboost\", \"reasoning\": \"go\"}\n```",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let draft = provider(&server).propose(&context()).await.unwrap();
        assert_eq!(draft.captain_id, Some(13));
        assert_eq!(draft.reasoning, "go");
    }

    #[tokio::test]
    async fn test_rate_limit_is_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("{\"transfers\": []}")))
            .mount(&server)
            .await;

        let draft = provider(&server).propose(&context()).await.unwrap();
        assert!(draft.transfers.is_empty());
    }

    #[tokio::test]
    async fn test_gives_up_after_three_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(504))
            .expect(3)
            .mount(&server)
            .await;

        let err = provider(&server).propose(&context()).await.unwrap_err();
        assert!(matches!(err, DomainError::Reasoning(_)));
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
            .expect(1)
            .mount(&server)
            .await;

        assert!(provider(&server).propose(&context()).await.is_err());
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("I cannot decide.")))
            .mount(&server)
            .await;

        let err = provider(&server).propose(&context()).await.unwrap_err();
        assert!(matches!(err, DomainError::Parse(_)));
    }
}
