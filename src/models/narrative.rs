use serde::{Deserialize, Serialize};

/// Structured output of narrative synthesis.
///
/// Always fully populated — the bridge substitutes placeholders on
/// malformed or failed backend responses, so callers never null-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeResult {
    /// One-sentence clinical synthesis.
    pub synthesis: String,
    /// Short recommended action (a few words).
    pub recommended_action: String,
    /// Department routing suggestion.
    pub department_routing: String,
}
