use super::classification::DetailLevel;
use crate::error::LlmError;
use crate::providers::Provider;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::warn;

/// Returned when the summarization backend rejects our credentials.
pub const SUMMARIZER_AUTH_FAILURE: &str =
    "Failed: OpenAI authentication (401). Configure OPENAI_API_KEY.";

const SUMMARY_PREFIX: &str = "Summary: ";
const ELLIPSIS: &str = " ...";
const SUMMARIZER_SYSTEM_PROMPT: &str = "You summarize documents accurately.";

/// Maps raw text and a detail level to summary text. Never fails.
pub trait Summarizer: Send + Sync {
    fn summarize<'a>(
        &'a self,
        text: &'a str,
        detail: DetailLevel,
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>>;
}

/// Deterministic offline summary: the leading words of the text, single-spaced.
pub fn local_summary(text: &str, detail: DetailLevel) -> String {
    let budget = detail.word_budget();
    let mut words = text.split_whitespace();
    let snippet = words.by_ref().take(budget).collect::<Vec<_>>().join(" ");
    let suffix = if words.next().is_some() { ELLIPSIS } else { "" };
    format!("{SUMMARY_PREFIX}{snippet}{suffix}")
}

/// Summarizer that never leaves the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSummarizer;

impl Summarizer for LocalSummarizer {
    fn summarize<'a>(
        &'a self,
        text: &'a str,
        detail: DetailLevel,
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        Box::pin(async move { local_summary(text, detail) })
    }
}

/// Provider-backed summarizer with the local fallback for everything but
/// authentication failures.
pub struct LlmSummarizer {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f64,
}

impl LlmSummarizer {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    fn build_prompt(text: &str, detail: DetailLevel) -> String {
        let style = match detail {
            DetailLevel::Short => "concise",
            DetailLevel::Detailed => "detailed",
        };
        format!("Provide a {style} summary of the following text: \n{text}")
    }
}

impl Summarizer for LlmSummarizer {
    fn summarize<'a>(
        &'a self,
        text: &'a str,
        detail: DetailLevel,
    ) -> Pin<Box<dyn Future<Output = String> + Send + 'a>> {
        Box::pin(async move {
            let prompt = Self::build_prompt(text, detail);
            match self
                .provider
                .chat_with_system(
                    Some(SUMMARIZER_SYSTEM_PROMPT),
                    &prompt,
                    &self.model,
                    self.temperature,
                )
                .await
            {
                Ok(summary) => summary,
                Err(LlmError::Auth { .. }) => {
                    warn!(provider = self.provider.name(), "summarizer credentials rejected");
                    SUMMARIZER_AUTH_FAILURE.to_string()
                }
                Err(e) => {
                    warn!(provider = self.provider.name(), error = %e, "summarizer unavailable, using local summary");
                    local_summary(text, detail)
                }
            }
        })
    }
}
