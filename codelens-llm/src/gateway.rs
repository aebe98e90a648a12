//! Remote analysis gateway
//!
//! One call: wait for the shared rate limiter, send the review prompt,
//! bound the backend call with a timeout and decode the answer.

use crate::gemini::{GeminiClient, GenerationConfig, GEMINI_API_BASE_URL, GEMINI_MODEL};
use crate::rate_limit::{RateLimiter, DEFAULT_MIN_INTERVAL};
use crate::{build_prompt, parse_remote_document, AnalysisBackend, LlmError, LlmResult};
use codelens_core::Report;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Settings for the remote gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub min_interval_secs: u64,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: GEMINI_MODEL.to_string(),
            base_url: GEMINI_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            min_interval_secs: DEFAULT_MIN_INTERVAL.as_secs(),
            temperature: Some(0.7),
            max_output_tokens: Some(8192),
        }
    }
}

impl GatewayConfig {
    /// Configured key, if it is not blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub const fn min_interval(&self) -> Duration {
        Duration::from_secs(self.min_interval_secs)
    }
}

/// Rate-limited, timeout-bounded access to a remote analysis backend
pub struct RemoteGateway {
    backend: Arc<dyn AnalysisBackend>,
    limiter: Arc<RateLimiter>,
    timeout: Duration,
}

impl RemoteGateway {
    pub fn new(backend: Arc<dyn AnalysisBackend>, limiter: Arc<RateLimiter>, timeout: Duration) -> Self {
        Self {
            backend,
            limiter,
            timeout,
        }
    }

    /// Gemini-backed gateway; fails when no usable key is configured
    pub fn from_config(config: &GatewayConfig, limiter: Arc<RateLimiter>) -> LlmResult<Self> {
        let api_key = config.credential().ok_or(LlmError::MissingCredential)?;

        let client = GeminiClient::new(api_key.to_string())
            .with_model(config.model.clone())
            .with_base_url(config.base_url.clone())
            .with_generation_config(GenerationConfig {
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
            });

        Ok(Self::new(Arc::new(client), limiter, config.timeout()))
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run a remote review of `source`.
    ///
    /// The limiter wait is not counted against the timeout. When the
    /// timeout fires the in-flight request is dropped.
    pub async fn analyze(&self, source: &str) -> LlmResult<Report> {
        self.limiter.throttle().await;

        let prompt = build_prompt(source);
        tracing::info!("Requesting remote analysis from {}", self.backend.name());

        let raw = tokio::time::timeout(self.timeout, self.backend.generate(&prompt))
            .await
            .map_err(|_| LlmError::Timeout {
                seconds: self.timeout.as_secs(),
            })??;

        let report = parse_remote_document(&raw)?;
        tracing::debug!(
            "Remote analysis returned {} issue(s)",
            report.summary.total_issues
        );
        Ok(report)
    }
}

impl std::fmt::Debug for RemoteGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteGateway")
            .field("backend", &self.backend.name())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeBackend {
        reply: LlmResult<String>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl FakeBackend {
        fn replying(reply: LlmResult<String>) -> Self {
            Self {
                reply,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl AnalysisBackend for FakeBackend {
        fn name(&self) -> &str {
            "fake"
        }

        async fn generate(&self, prompt: &str) -> LlmResult<String> {
            assert!(prompt.contains("Java code to analyze:"));
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(LlmError::Transport(e.to_string())),
            }
        }
    }

    fn gateway(backend: Arc<FakeBackend>) -> RemoteGateway {
        RemoteGateway::new(backend, Arc::new(RateLimiter::default()), Duration::from_secs(10))
    }

    #[test]
    fn test_blank_key_is_no_credential() {
        let mut config = GatewayConfig::default();
        assert_eq!(config.credential(), None);
        config.api_key = Some("   ".into());
        assert_eq!(config.credential(), None);
        config.api_key = Some(" abc ".into());
        assert_eq!(config.credential(), Some("abc"));

        config.api_key = None;
        let err = RemoteGateway::from_config(&config, Arc::default()).unwrap_err();
        assert!(matches!(err, LlmError::MissingCredential));
    }

    #[test]
    fn test_config_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.min_interval(), Duration::from_secs(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_call_decodes_report() {
        let backend = Arc::new(FakeBackend::replying(Ok(
            "```json\n{\"warnings\": [{\"type\": \"Naming\", \"line\": 2}]}\n```".into(),
        )));
        let report = gateway(backend.clone()).analyze("int x = 5;").await.unwrap();
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_backend_times_out() {
        let backend = Arc::new(FakeBackend {
            delay: Duration::from_secs(60),
            ..FakeBackend::replying(Ok("{}".into()))
        });
        let err = gateway(backend).analyze("int x = 5;").await.unwrap_err();
        assert!(matches!(err, LlmError::Timeout { seconds: 10 }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unparseable_reply_is_parse_error() {
        let backend = Arc::new(FakeBackend::replying(Ok("I could not analyze this".into())));
        let err = gateway(backend).analyze("int x = 5;").await.unwrap_err();
        assert_eq!(err.kind(), "parse");
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_error_propagates() {
        let backend = Arc::new(FakeBackend::replying(Err(LlmError::Transport("down".into()))));
        let err = gateway(backend).analyze("int x = 5;").await.unwrap_err();
        assert_eq!(err.kind(), "transport");
    }
}
