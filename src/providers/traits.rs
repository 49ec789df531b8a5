use crate::error::LlmError;
use std::future::Future;
use std::pin::Pin;

/// Chat-completion backend used by the classifier and summarizer adapters.
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>>;

    fn chat<'a>(
        &'a self,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        self.chat_with_system(None, message, model, temperature)
    }
}
