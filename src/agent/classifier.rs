use super::classification::Classification;
use crate::error::LlmError;
use crate::providers::Provider;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

const CLASSIFIER_RULES: &str = r#"You are a strict intent classifier for a personal AI assistant.

Your task:
- Decide if the user's input is an ACTION or an ANSWER.
- ACTION means a side-effect (file operations or summarization).
- ANSWER means informational, chat, or explanation.

Rules:
- Respond ONLY with valid JSON.
- Do NOT explain.
- Do NOT include extra text.

Allowed ACTION intents:
WRITE, READ, APPEND, DELETE, SUMMARIZE

If data is missing, use null.

When answering, your personality is like J.A.R.V.I.S. from Iron Man.

JSON formats:

ANSWER:
{
  "type": "ANSWER",
  "answer": "Glad to hear that, sir. Let me know how I can help."
}

ACTION:
{
  "type": "ACTION",
  "intent": "WRITE|READ|APPEND|DELETE|SUMMARIZE",
  "filename": "string or null",
  "content": "string or null",
  "detail": "short|detailed|null",
  "include_ctx_in_filename": true|false|null
}
"#;

/// Maps raw command text plus an optional context hint to a [`Classification`].
///
/// Implementations never fail: transport and decoding problems surface as
/// fixed answers.
pub trait Classifier: Send + Sync {
    fn classify<'a>(
        &'a self,
        command: &'a str,
        context_hint: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Classification> + Send + 'a>>;
}

/// Full system prompt with the context hint appended when present.
pub fn build_system_prompt(context_hint: Option<&str>) -> String {
    match context_hint {
        Some(hint) if !hint.is_empty() => {
            format!("{CLASSIFIER_RULES}\n\nContext to remember:\n{hint}\n")
        }
        _ => CLASSIFIER_RULES.to_string(),
    }
}

/// Classifier backed by a chat-completion provider.
pub struct LlmClassifier {
    provider: Arc<dyn Provider>,
    model: String,
    temperature: f64,
}

impl LlmClassifier {
    pub fn new(provider: Arc<dyn Provider>, model: impl Into<String>, temperature: f64) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }
}

impl Classifier for LlmClassifier {
    fn classify<'a>(
        &'a self,
        command: &'a str,
        context_hint: Option<&'a str>,
    ) -> Pin<Box<dyn Future<Output = Classification> + Send + 'a>> {
        Box::pin(async move {
            let system_prompt = build_system_prompt(context_hint);
            let raw = match self
                .provider
                .chat_with_system(Some(&system_prompt), command, &self.model, self.temperature)
                .await
            {
                Ok(raw) => raw,
                Err(e @ (LlmError::Auth { .. } | LlmError::MissingApiKey { .. })) => {
                    warn!(provider = self.provider.name(), error = %e, "classifier credentials rejected");
                    return Classification::auth_failure();
                }
                Err(e) => {
                    warn!(provider = self.provider.name(), error = %e, "classifier call failed");
                    return Classification::not_understood();
                }
            };

            debug!(chars = raw.len(), "classifier responded");
            Classification::parse(&raw)
        })
    }
}
