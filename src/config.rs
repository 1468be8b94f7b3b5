use std::env;
use std::time::Duration;

use anyhow::Result;

/// Central configuration loaded from environment variables.
///
/// All secrets come from env vars (never hardcoded). The .env file
/// is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Reddit listing API base URL (defaults to https://www.reddit.com).
    /// Only overridden in tests or for a caching proxy.
    pub reddit_base_url: String,
    /// OpenAI API key — empty means the oracle strategy is disabled and
    /// every request uses the deterministic keyword fallback.
    pub openai_api_key: String,
    /// OpenAI-compatible API base URL (defaults to https://api.openai.com).
    pub openai_base_url: String,
    /// Chat model used for topic categorization.
    pub openai_model: String,
    /// Per-request timeout for both external collaborators.
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the OpenAI key; without it the
    /// pipeline still works, just without the oracle.
    pub fn load() -> Result<Self> {
        let timeout_secs = env::var("SMOLDER_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(20);

        Ok(Self {
            reddit_base_url: env::var("REDDIT_BASE_URL")
                .unwrap_or_else(|_| crate::reddit::DEFAULT_REDDIT_URL.to_string()),
            openai_api_key: env::var("OPENAI_API_KEY").unwrap_or_default(),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com".to_string()),
            openai_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Whether the categorization oracle is configured.
    pub fn oracle_enabled(&self) -> bool {
        !self.openai_api_key.is_empty()
    }
}
