use crate::tools::Intent;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::warn;

/// Answer returned whenever the classifier output cannot be understood.
pub const NOT_UNDERSTOOD: &str = "Sorry sir, I couldn't understand that.";

/// Answer returned when the classifier rejects our credentials.
pub const CLASSIFIER_AUTH_FAILURE: &str =
    "Authentication with OpenAI failed (401). Please set OPENAI_API_KEY.";

/// Requested summary length.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum DetailLevel {
    #[default]
    Short,
    Detailed,
}

impl DetailLevel {
    /// Word budget for the local summary fallback.
    pub const fn word_budget(self) -> usize {
        match self {
            Self::Short => 120,
            Self::Detailed => 240,
        }
    }
}

/// Parameters of an actionable command. Absent parameters stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub intent: Intent,
    pub filename: Option<String>,
    pub content: Option<String>,
    pub detail: Option<DetailLevel>,
    pub include_ctx_in_filename: Option<bool>,
}

impl ActionRequest {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent,
            filename: None,
            content: None,
            detail: None,
            include_ctx_in_filename: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_detail(mut self, detail: DetailLevel) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_include_ctx(mut self, include_ctx: bool) -> Self {
        self.include_ctx_in_filename = Some(include_ctx);
        self
    }
}

/// Structured classifier output: an informational answer or a file action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Answer { text: String },
    Action(ActionRequest),
}

impl Classification {
    pub fn answer(text: impl Into<String>) -> Self {
        Self::Answer { text: text.into() }
    }

    pub fn not_understood() -> Self {
        Self::answer(NOT_UNDERSTOOD)
    }

    pub fn auth_failure() -> Self {
        Self::answer(CLASSIFIER_AUTH_FAILURE)
    }

    pub fn intent(&self) -> Option<Intent> {
        match self {
            Self::Answer { .. } => None,
            Self::Action(request) => Some(request.intent),
        }
    }

    pub fn filename(&self) -> Option<&str> {
        match self {
            Self::Answer { .. } => None,
            Self::Action(request) => request.filename.as_deref(),
        }
    }

    pub fn content(&self) -> Option<&str> {
        match self {
            Self::Answer { .. } => None,
            Self::Action(request) => request.content.as_deref(),
        }
    }

    /// Decode raw classifier output. Never fails: anything undecodable becomes
    /// the "could not understand" answer.
    pub fn parse(raw: &str) -> Self {
        let body = strip_code_fence(raw);
        let wire: WireClassification = match serde_json::from_str(body) {
            Ok(wire) => wire,
            Err(e) => {
                warn!(error = %e, "classifier output was not valid JSON");
                return Self::not_understood();
            }
        };
        wire.into_classification()
    }
}

/// JSON shape the classifier is instructed to emit.
#[derive(Debug, Deserialize)]
struct WireClassification {
    #[serde(rename = "type")]
    kind: Option<String>,
    answer: Option<String>,
    intent: Option<String>,
    filename: Option<String>,
    content: Option<String>,
    detail: Option<String>,
    include_ctx_in_filename: Option<bool>,
}

impl WireClassification {
    fn into_classification(self) -> Classification {
        match self.kind.as_deref().map(str::trim) {
            Some(kind) if kind.eq_ignore_ascii_case("answer") => {
                match present(self.answer) {
                    Some(text) => Classification::Answer { text },
                    None => Classification::not_understood(),
                }
            }
            Some(kind) if kind.eq_ignore_ascii_case("action") => {
                let Some(raw_intent) = present(self.intent) else {
                    return Classification::not_understood();
                };
                let intent = match Intent::parse(&raw_intent) {
                    Ok(intent) => intent,
                    Err(e) => {
                        warn!(intent = %raw_intent, "classifier produced an unsupported intent");
                        return Classification::answer(e.to_string());
                    }
                };
                Classification::Action(ActionRequest {
                    intent,
                    filename: present(self.filename),
                    content: self.content,
                    detail: present(self.detail).and_then(|d| DetailLevel::from_str(&d).ok()),
                    include_ctx_in_filename: self.include_ctx_in_filename,
                })
            }
            _ => Classification::not_understood(),
        }
    }
}

/// Treat empty strings and a literal `null` as absent.
fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("null"))
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
