//! Defensive parsing of the backend's free-text response.
//!
//! The generative channel is inherently unreliable: the parse result is
//! a tagged variant with an explicit fallback construction per variant,
//! and nothing here can fail. Meaning beyond the documented fallbacks
//! is never guessed at.

use crate::models::NarrativeResult;

use super::prompt::ANSWER_DELIMITER;

/// Longest synthesis kept when the response carried no delimiter.
pub const SYNTHESIS_CHAR_LIMIT: usize = 150;

const DEFAULT_DEPARTMENT: &str = "General Triage";
const DEFAULT_ACTION: &str = "Manual Review";

/// How well the response matched the required three-field format.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedNarrative {
    /// Three or more delimited segments — extras are discarded.
    WellFormed {
        synthesis: String,
        action: String,
        department: String,
    },
    /// Exactly two segments — the department is missing.
    PartiallyFormed { synthesis: String, action: String },
    /// No delimiter found — the raw text is all we have.
    Unparsed(String),
}

/// Classify a raw backend response. Embedded line breaks are flattened
/// first in case the model wrapped its single line.
pub fn parse_narrative_response(raw: &str) -> ParsedNarrative {
    let flat = raw.replace('\n', " ");
    let parts: Vec<&str> = flat.split(ANSWER_DELIMITER).map(str::trim).collect();

    match parts.len() {
        n if n >= 3 => ParsedNarrative::WellFormed {
            synthesis: parts[0].to_string(),
            action: parts[1].to_string(),
            department: parts[2].to_string(),
        },
        2 => ParsedNarrative::PartiallyFormed {
            synthesis: parts[0].to_string(),
            action: parts[1].to_string(),
        },
        _ => ParsedNarrative::Unparsed(flat.trim().to_string()),
    }
}

impl ParsedNarrative {
    /// Convert to the always-fully-populated result, applying the
    /// documented fallback per variant.
    pub fn into_result(self) -> NarrativeResult {
        match self {
            ParsedNarrative::WellFormed {
                synthesis,
                action,
                department,
            } => NarrativeResult {
                synthesis,
                recommended_action: action,
                department_routing: department,
            },
            ParsedNarrative::PartiallyFormed { synthesis, action } => NarrativeResult {
                synthesis,
                recommended_action: action,
                department_routing: DEFAULT_DEPARTMENT.to_string(),
            },
            ParsedNarrative::Unparsed(raw) => NarrativeResult {
                synthesis: raw.chars().take(SYNTHESIS_CHAR_LIMIT).collect(),
                recommended_action: DEFAULT_ACTION.to_string(),
                department_routing: DEFAULT_DEPARTMENT.to_string(),
            },
        }
    }
}
