use std::path::PathBuf;
use thiserror::Error;

/// Marker every failed file operation starts with when rendered for the user.
pub const FAILURE_MARKER: &str = "Failed:";

// ─── Top-level error hierarchy ───────────────────────────────────────────────

/// Structured error hierarchy for Stark Assistant.
///
/// Each subsystem defines its own error enum. Bootstrap code continues to use
/// `anyhow::Result` for ad-hoc context chains.
#[derive(Debug, Error)]
pub enum AssistantError {
    // ── Config ───────────────────────────────────────────────────────────
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    // ── LLM / Provider ──────────────────────────────────────────────────
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    // ── Memory ──────────────────────────────────────────────────────────
    #[error("memory: {0}")]
    Memory(#[from] MemoryError),

    // ── File operations ─────────────────────────────────────────────────
    #[error("file: {0}")]
    FileOp(#[from] FileOpError),

    // ── Generic fallthrough (wraps anyhow for interop) ──────────────────
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("validation failed: {0}")]
    Validation(String),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("provider {provider} authentication failed")]
    Auth { provider: String },

    #[error("provider {provider} has no API key configured")]
    MissingApiKey { provider: String },

    #[error("provider {provider} request failed: {message}")]
    Request { provider: String, message: String },

    #[error("provider {provider} returned {status}: {message}")]
    Status {
        provider: String,
        status: u16,
        message: String,
    },

    #[error("provider {provider} response could not be decoded: {message}")]
    Decode { provider: String, message: String },

    #[error("provider {provider} returned an empty response")]
    EmptyResponse { provider: String },
}

impl LlmError {
    /// Authentication failures signal a configuration problem, never a
    /// transient condition, so callers must not fall back on them.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

// ─── Memory errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MemoryError {
    #[error("failed to serialize conversation state: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to persist conversation state to {}: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// ─── File operation errors ──────────────────────────────────────────────────

/// Failure kinds produced by the safe executor.
///
/// Every variant renders as a single line starting with [`FAILURE_MARKER`].
#[derive(Debug, Error)]
pub enum FileOpError {
    #[error("Failed: {reason}")]
    InvalidFilename { reason: String },

    #[error("Failed: File '{}' does not exist.", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed: File '{}' does not exist (append disallowed).", .path.display())]
    AppendDisallowed { path: PathBuf },

    #[error("Failed: No {access} permission for '{}'.", .path.display())]
    PermissionDenied { path: PathBuf, access: Access },

    #[error("Failed: '{}' appears to be binary or unreadable for summarization.", .path.display())]
    NotSummarizable { path: PathBuf },

    #[error("Failed: No content provided to {intent}.")]
    MissingContent { intent: String },

    #[error("Failed: '{}' is not valid UTF-8 text.", .path.display())]
    InvalidEncoding { path: PathBuf },

    #[error("Failed: could not {action} '{}': {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed: Unknown intent: {0}")]
    UnsupportedIntent(String),
}

impl FileOpError {
    /// Whether this failure belongs to the `NotFound` class.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::AppendDisallowed { .. })
    }
}

/// Access mode named in permission failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Access {
    Read,
    Write,
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for the crate.
pub type Result<T> = std::result::Result<T, AssistantError>;
