//! codelens LLM - Remote Analysis Gateway
//!
//! Wraps a generative-language-model review of Java source behind a
//! single call that yields a codelens [`Report`](codelens_core::Report):
//! - Gemini `generateContent` client
//! - Process-wide rate limiting between dispatches
//! - Timeout-bounded calls
//! - Lenient decoding of the returned JSON document
//!
//! Every failure is reported as an [`LlmError`]; callers fall back to the
//! local report on any of them.

#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod gateway;
pub mod gemini;
pub mod prompt;
pub mod rate_limit;
pub mod response;

pub use gateway::{GatewayConfig, RemoteGateway};
pub use gemini::GeminiClient;
pub use prompt::build_prompt;
pub use rate_limit::RateLimiter;
pub use response::{parse_remote_document, strip_code_fence};

/// Result type for LLM operations
pub type LlmResult<T> = std::result::Result<T, LlmError>;

/// Error types for LLM operations
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// No API key configured
    #[error("Gemini API key is not configured")]
    MissingCredential,

    /// HTTP request error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("Transport error: {0}")]
    Transport(String),

    /// Provider rejected the call for quota or rate reasons
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("API call timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Remote payload could not be turned into a report
    #[error("Failed to parse remote response: {0}")]
    Parse(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl LlmError {
    /// Short machine-readable failure kind
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredential => "unavailable",
            Self::Http(_) | Self::Transport(_) => "transport",
            Self::RateLimited(_) => "rate_limit",
            Self::Timeout { .. } => "timeout",
            Self::Parse(_) | Self::Json(_) => "parse",
            Self::Config(_) => "config",
        }
    }
}

/// A remote capability that turns a prompt into generated text
#[async_trait::async_trait]
pub trait AnalysisBackend: Send + Sync {
    /// Backend name used in logs
    fn name(&self) -> &str;

    /// Generate a completion for `prompt`
    async fn generate(&self, prompt: &str) -> LlmResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(LlmError::MissingCredential.kind(), "unavailable");
        assert_eq!(LlmError::Timeout { seconds: 10 }.kind(), "timeout");
        assert_eq!(LlmError::RateLimited("429".into()).kind(), "rate_limit");
        assert_eq!(LlmError::Parse("x".into()).kind(), "parse");
    }

    #[test]
    fn test_error_messages_feed_failure_buckets() {
        assert!(LlmError::MissingCredential.to_string().contains("API key"));
        assert!(LlmError::Parse("bad".into()).to_string().contains("parse"));
        assert_eq!(LlmError::Timeout { seconds: 10 }.to_string(), "API call timed out after 10s");
    }
}
