//! Runtime configuration for the analyzer.

use std::time::Duration;

/// Default Messages API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.anthropic.com";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";

/// Default output token bound.
pub const DEFAULT_MAX_TOKENS: u32 = 3000;

/// Default overall time budget for one analysis, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Messages API protocol version header value.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Period of the simulated progress timer.
pub const PROGRESS_INTERVAL: Duration = Duration::from_millis(800);

/// Pause at 100% before the results are shown.
pub const COMPLETION_DELAY: Duration = Duration::from_millis(500);

/// Settings for the inference service and the analysis session timers.
#[derive(Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// API credential. `None` when the environment variable is unset.
    pub api_key: Option<String>,
    /// Base URL, without the `/v1/messages` path.
    pub api_base: String,
    pub model: String,
    pub max_tokens: u32,
    /// Overall time budget for one analysis.
    pub timeout: Duration,
    pub progress_interval: Duration,
    pub completion_delay: Duration,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: DEFAULT_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            progress_interval: PROGRESS_INTERVAL,
            completion_delay: COMPLETION_DELAY,
        }
    }
}

impl AnalyzerConfig {
    /// Returns the full Messages endpoint URL.
    #[must_use]
    pub fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base.trim_end_matches('/'))
    }

    /// Returns true if a non-empty credential is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

// Hand-written so the credential never ends up in logs.
impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout", &self.timeout)
            .field("progress_interval", &self.progress_interval)
            .field("completion_delay", &self.completion_delay)
            .finish()
    }
}
