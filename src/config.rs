use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Acuity";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Artifact file names produced by the offline training job.
pub const RISK_MODEL_FILE: &str = "risk_model.json";
pub const ARRIVAL_ENCODER_FILE: &str = "arrival_encoder.json";

/// Local generative backend for narrative synthesis.
pub const OLLAMA_BASE_URL: &str = "http://127.0.0.1:11434";
pub const DEFAULT_NARRATIVE_MODEL: &str = "adrienbrault/biomistral-7b:Q4_K_M";
pub const NARRATIVE_TIMEOUT_SECS: u64 = 120;

/// Get the application data directory
/// ~/Acuity/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join(APP_NAME)
}

/// Get the models directory (trained classifier + encoder artifacts)
pub fn models_dir() -> PathBuf {
    app_data_dir().join("models")
}

pub fn risk_model_path() -> PathBuf {
    models_dir().join(RISK_MODEL_FILE)
}

pub fn arrival_encoder_path() -> PathBuf {
    models_dir().join(ARRIVAL_ENCODER_FILE)
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Acuity"));
    }

    #[test]
    fn models_dir_under_app_data() {
        let models = models_dir();
        assert!(models.starts_with(app_data_dir()));
        assert!(models.ends_with("models"));
    }

    #[test]
    fn artifact_paths_use_configured_names() {
        assert!(risk_model_path().ends_with(RISK_MODEL_FILE));
        assert!(arrival_encoder_path().ends_with(ARRIVAL_ENCODER_FILE));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }

    #[test]
    fn default_log_filter_names_the_crate() {
        assert!(default_log_filter().contains("acuity"));
    }
}
