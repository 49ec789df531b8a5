use crate::error::FileOpError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File intents the executor understands.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Intent {
    Write,
    Read,
    Append,
    Delete,
    Summarize,
}

impl Intent {
    /// Mutating intents must pass the confirmation gate before execution.
    pub const fn is_mutating(self) -> bool {
        matches!(self, Self::Write | Self::Append | Self::Delete)
    }

    /// Parse a raw intent name, mapping anything unknown to
    /// [`FileOpError::UnsupportedIntent`].
    pub fn parse(raw: &str) -> Result<Self, FileOpError> {
        Self::from_str(raw.trim()).map_err(|_| FileOpError::UnsupportedIntent(raw.trim().into()))
    }
}

/// Safety switches for a single executor call. Both default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    pub allow_overwrite: bool,
    pub append_if_missing: bool,
}

/// Successful executor outcome. Every variant carries the final effective path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOpOutcome {
    Written { path: PathBuf },
    /// The requested target existed, so the write landed on a suffixed path.
    Redirected { requested: PathBuf, path: PathBuf },
    Read { path: PathBuf, content: String },
    Appended { path: PathBuf },
    Deleted { path: PathBuf },
    /// Text extracted for summarization.
    Extracted { path: PathBuf, text: String },
}

impl FileOpOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Written { path }
            | Self::Redirected { path, .. }
            | Self::Read { path, .. }
            | Self::Appended { path }
            | Self::Deleted { path }
            | Self::Extracted { path, .. } => path,
        }
    }

    /// Consume the outcome into the text shown to the user.
    pub fn into_text(self) -> String {
        match self {
            Self::Read { content, .. } => content,
            Self::Extracted { text, .. } => text,
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FileOpOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Written { path } => write!(f, "Successfully wrote to '{}'.", path.display()),
            Self::Redirected { path, .. } => {
                write!(f, "Collision avoided. Wrote to '{}'.", path.display())
            }
            Self::Read { content, .. } => f.write_str(content),
            Self::Appended { path } => write!(f, "Successfully appended to '{}'.", path.display()),
            Self::Deleted { path } => write!(f, "Deleted '{}'.", path.display()),
            Self::Extracted { text, .. } => f.write_str(text),
        }
    }
}

/// Result of an executor call: success payload or a specific failure kind.
pub type FileOpResult = Result<FileOpOutcome, FileOpError>;

/// Render an executor result as the single line (or file body) shown to the user.
pub fn render_result(result: &FileOpResult) -> String {
    match result {
        Ok(outcome) => outcome.to_string(),
        Err(err) => err.to_string(),
    }
}
