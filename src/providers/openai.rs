use super::scrub::sanitize_api_error;
use super::traits::Provider;
use crate::error::LlmError;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const PROVIDER_NAME: &str = "openai";

pub struct OpenAiProvider {
    /// Pre-computed `"Bearer <key>"` header value.
    cached_auth_header: Option<String>,
    base_url: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// An empty key counts as no key: requests fail fast with
    /// [`LlmError::MissingApiKey`] and callers use their local fallbacks.
    pub fn new(api_key: Option<&str>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<&str>, base_url: &str) -> Self {
        Self {
            cached_auth_header: api_key
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(|k| format!("Bearer {k}")),
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(120))
                .connect_timeout(Duration::from_secs(10))
                .pool_max_idle_per_host(10)
                .pool_idle_timeout(Duration::from_secs(90))
                .tcp_keepalive(Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.cached_auth_header.is_some()
    }

    fn build_request(
        system_prompt: Option<&str>,
        message: &str,
        model: &str,
        temperature: f64,
    ) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system_prompt {
            messages.push(Message {
                role: "system",
                content: sys.to_string(),
            });
        }
        messages.push(Message {
            role: "user",
            content: message.to_string(),
        });

        ChatRequest {
            model: model.to_string(),
            messages,
            temperature,
        }
    }

    fn extract_text(chat_response: ChatResponse) -> Result<String, LlmError> {
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| LlmError::EmptyResponse {
                provider: PROVIDER_NAME.into(),
            })
    }

    async fn call_api(&self, request: &ChatRequest) -> Result<ChatResponse, LlmError> {
        let auth_header = self
            .cached_auth_header
            .as_ref()
            .ok_or_else(|| LlmError::MissingApiKey {
                provider: PROVIDER_NAME.into(),
            })?;

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", auth_header)
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Request {
                provider: PROVIDER_NAME.into(),
                message: sanitize_api_error(&e.to_string()),
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(LlmError::Auth {
                provider: PROVIDER_NAME.into(),
            });
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<failed to read provider error body>".to_string());
            return Err(LlmError::Status {
                provider: PROVIDER_NAME.into(),
                status: status.as_u16(),
                message: sanitize_api_error(&body),
            });
        }

        response.json().await.map_err(|e| LlmError::Decode {
            provider: PROVIDER_NAME.into(),
            message: e.to_string(),
        })
    }
}

impl Provider for OpenAiProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn chat_with_system<'a>(
        &'a self,
        system_prompt: Option<&'a str>,
        message: &'a str,
        model: &'a str,
        temperature: f64,
    ) -> Pin<Box<dyn Future<Output = Result<String, LlmError>> + Send + 'a>> {
        Box::pin(async move {
            let request = Self::build_request(system_prompt, message, model, temperature);
            let chat_response = self.call_api(&request).await?;
            Self::extract_text(chat_response)
        })
    }
}
