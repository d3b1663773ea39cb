use serde::{Deserialize, Serialize};

use crate::config;

use super::NarrativeError;

/// Generation settings for the narrative call. Low temperature and a
/// short budget keep the model from drifting off the required format.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub num_predict: u32,
    pub num_ctx: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            num_predict: 100,
            num_ctx: 2048,
        }
    }
}

/// Generative-text backend abstraction (allows mocking).
pub trait LlmClient {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, NarrativeError>;
}

/// Ollama HTTP client for local LLM inference.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl OllamaClient {
    /// Create a new OllamaClient pointing at a local Ollama instance.
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
        }
    }

    /// Default local instance with the pipeline's bounded wait.
    pub fn default_local() -> Self {
        Self::new(config::OLLAMA_BASE_URL, config::NARRATIVE_TIMEOUT_SECS)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    raw: bool,
    options: &'a GenerationOptions,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl LlmClient for OllamaClient {
    fn generate(
        &self,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, NarrativeError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model,
            prompt,
            stream: false,
            raw: true,
            options,
        };

        let response = self.client.post(&url).json(&body).send().map_err(|e| {
            if e.is_connect() {
                NarrativeError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                NarrativeError::Timeout(self.timeout_secs)
            } else {
                NarrativeError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NarrativeError::BackendStatus {
                status: status.as_u16(),
            });
        }

        let parsed: OllamaGenerateResponse = response
            .json()
            .map_err(|e| NarrativeError::ResponseParsing(e.to_string()))?;

        Ok(parsed.response.trim().to_string())
    }
}

/// Mock LLM client for testing — returns a configurable response.
pub struct MockLlmClient {
    response: String,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

impl LlmClient for MockLlmClient {
    fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, NarrativeError> {
        Ok(self.response.clone())
    }
}

/// What a failing mock should fail with.
#[derive(Debug, Clone, Copy)]
pub enum FailureKind {
    Connection,
    Timeout,
    Status(u16),
}

/// Mock LLM client that always fails — exercises the bridge fallbacks.
pub struct FailingLlmClient {
    kind: FailureKind,
}

impl FailingLlmClient {
    pub fn new(kind: FailureKind) -> Self {
        Self { kind }
    }
}

impl LlmClient for FailingLlmClient {
    fn generate(
        &self,
        _model: &str,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, NarrativeError> {
        Err(match self.kind {
            FailureKind::Connection => {
                NarrativeError::Connection(config::OLLAMA_BASE_URL.to_string())
            }
            FailureKind::Timeout => NarrativeError::Timeout(config::NARRATIVE_TIMEOUT_SECS),
            FailureKind::Status(status) => NarrativeError::BackendStatus { status },
        })
    }
}
