use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ModelError;

/// Categorical encoder for the arrival-mode feature, fitted during the
/// offline training job. `transform` maps a category to its integer code;
/// a category the encoder was not fitted on is an error with no recovery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArrivalEncoder {
    /// Fitted categories in code order — index IS the code.
    categories: Vec<String>,
}

impl ArrivalEncoder {
    /// Load the encoder artifact from disk. Fatal on missing or corrupt
    /// files — the pipeline must not start without a usable encoder.
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        if !path.exists() {
            return Err(ModelError::ArtifactMissing(path.to_path_buf()));
        }
        let raw = std::fs::read_to_string(path)?;
        let encoder: ArrivalEncoder =
            serde_json::from_str(&raw).map_err(|e| ModelError::Malformed(e.to_string()))?;
        encoder.validate()?;
        Ok(encoder)
    }

    /// Build an encoder from an already-fitted category list (tests,
    /// embedded artifacts).
    pub fn fitted(categories: &[&str]) -> Self {
        Self {
            categories: categories.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn transform(&self, category: &str) -> Result<u32, ModelError> {
        self.categories
            .iter()
            .position(|c| c == category)
            .map(|i| i as u32)
            .ok_or_else(|| ModelError::UnseenCategory(category.to_string()))
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    fn validate(&self) -> Result<(), ModelError> {
        if self.categories.is_empty() {
            return Err(ModelError::Invalid("encoder has no categories".into()));
        }
        for (i, a) in self.categories.iter().enumerate() {
            if self.categories[..i].contains(a) {
                return Err(ModelError::Invalid(format!(
                    "duplicate encoder category: {a}"
                )));
            }
        }
        Ok(())
    }
}
