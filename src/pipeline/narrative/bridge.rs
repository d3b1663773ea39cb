//! Narrative synthesis bridge.
//!
//! Turns a triage level, the ranked attribution summary, and the raw
//! clinical notes into a one-sentence synthesis, a recommended action,
//! and a department routing via the local generative backend. Total:
//! backend unavailability, timeouts, and malformed output all degrade
//! to informative placeholders — a narrative problem must never block
//! the decision from reaching the board.

use crate::config;
use crate::models::NarrativeResult;

use super::ollama::{GenerationOptions, LlmClient, OllamaClient};
use super::parser::parse_narrative_response;
use super::prompt::build_narrative_prompt;
use super::NarrativeError;

pub struct NarrativeBridge {
    client: Box<dyn LlmClient + Send + Sync>,
    model: String,
    options: GenerationOptions,
}

impl NarrativeBridge {
    pub fn new(client: Box<dyn LlmClient + Send + Sync>, model: &str) -> Self {
        Self {
            client,
            model: model.to_string(),
            options: GenerationOptions::default(),
        }
    }

    /// Bridge against the default local Ollama instance.
    pub fn default_local() -> Self {
        Self::new(
            Box::new(OllamaClient::default_local()),
            config::DEFAULT_NARRATIVE_MODEL,
        )
    }

    /// Synthesize the narrative fields for one decision.
    ///
    /// Every branch returns a fully populated result.
    pub fn synthesize(&self, level: u8, drivers: &str, notes: &str) -> NarrativeResult {
        let prompt = build_narrative_prompt(level, drivers, notes);

        match self.client.generate(&self.model, &prompt, &self.options) {
            Ok(raw) => {
                tracing::debug!(response = %raw, "Raw narrative backend output");
                parse_narrative_response(&raw).into_result()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Narrative synthesis degraded to placeholder");
                placeholder_for(&e)
            }
        }
    }
}

/// Structured placeholder per failure mode.
fn placeholder_for(error: &NarrativeError) -> NarrativeResult {
    match error {
        NarrativeError::Connection(url) => NarrativeResult {
            synthesis: format!("Connection to narrative backend at {url} failed."),
            recommended_action: "Start Ollama".to_string(),
            department_routing: "Offline".to_string(),
        },
        NarrativeError::Timeout(secs) => NarrativeResult {
            synthesis: format!("Narrative model timed out after {secs}s."),
            recommended_action: "Retry".to_string(),
            department_routing: "Timeout".to_string(),
        },
        NarrativeError::BackendStatus { status } => NarrativeResult {
            synthesis: format!("Narrative backend error {status}."),
            recommended_action: "Error".to_string(),
            department_routing: "Error".to_string(),
        },
        NarrativeError::HttpClient(msg) | NarrativeError::ResponseParsing(msg) => {
            NarrativeResult {
                synthesis: format!("Narrative request failed: {msg}"),
                recommended_action: "Manual Review".to_string(),
                department_routing: "General Triage".to_string(),
            }
        }
    }
}
