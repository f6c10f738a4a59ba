//! Hint providers: produce a structuring hint for sanitized résumé text.
//!
//! `AppState` holds an `Option<Arc<dyn HintProvider>>`; when none is configured the
//! pipeline classifies heuristically.

use async_trait::async_trait;
use tracing::debug;

use crate::llm_client::prompts::{structure_prompt, JSON_ONLY_SYSTEM, STRUCTURE_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};

/// Implement this to swap hint backends without touching the pipeline or handlers.
///
/// The returned payload is untrusted: the pipeline validates it exactly like a
/// caller-supplied hint.
#[async_trait]
pub trait HintProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn structure(&self, resume_text: &str) -> Result<serde_json::Value, LlmError>;
}

/// Asks Claude to label each line with the closed role vocabulary.
pub struct LlmHintProvider(pub LlmClient);

#[async_trait]
impl HintProvider for LlmHintProvider {
    fn name(&self) -> &'static str {
        "llm"
    }

    async fn structure(&self, resume_text: &str) -> Result<serde_json::Value, LlmError> {
        let system = format!("{STRUCTURE_SYSTEM} {JSON_ONLY_SYSTEM}");
        let value: serde_json::Value = self
            .0
            .call_json(&structure_prompt(resume_text), &system)
            .await?;
        debug!(
            records = value.as_array().map_or(0, Vec::len),
            "Structuring hint received"
        );
        Ok(value)
    }
}
