// Categorization oracle trait — swap-ready abstraction.
//
// The pipeline only needs "prompt in, completion text out" from the
// oracle, so that is the whole seam. Tests substitute a canned double;
// production uses the OpenAI chat-completions client.

use anyhow::Result;
use async_trait::async_trait;

/// Transport seam for the external categorization service.
#[async_trait]
pub trait CategoryOracle: Send + Sync {
    /// Send a clustering prompt and return the raw completion text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
