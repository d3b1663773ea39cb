pub mod ollama;
pub mod prompt;
pub mod parser;
pub mod bridge;

pub use ollama::*;
pub use prompt::*;
pub use parser::*;
pub use bridge::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("Narrative backend is not running at {0}")]
    Connection(String),

    #[error("Narrative request timed out after {0}s")]
    Timeout(u64),

    #[error("Narrative backend returned error status {status}")]
    BackendStatus { status: u16 },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}
