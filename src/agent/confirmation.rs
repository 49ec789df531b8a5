use crate::tools::Intent;
use std::path::Path;

pub const CANCELLED: &str = "Operation cancelled.";
pub const REISSUE: &str = "Please re-issue the command with yes/no to proceed.";

/// Marker inserted before the extension when context goes into a filename.
pub const CONTEXT_MARKER: &str = "-ctx";

const AFFIRMATIVE: [&str; 5] = ["yes", "y", "confirm", "ok", "okay"];
const NEGATIVE: [&str; 3] = ["no", "n", "cancel"];

/// User reply while a pending action awaits confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationReply {
    Affirmative { mentions_context: bool },
    Negative,
    Unclear,
}

impl ConfirmationReply {
    /// Classify a reply. The whole reply or its first word must be one of
    /// the accepted tokens, so "yes, with context" still confirms.
    pub fn parse(raw: &str) -> Self {
        let answer = raw.trim().to_lowercase();
        let first_word = answer
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | '.' | '!'))
            .find(|w| !w.is_empty())
            .unwrap_or_default();
        let matches_any =
            |tokens: &[&str]| tokens.contains(&answer.as_str()) || tokens.contains(&first_word);

        if matches_any(&AFFIRMATIVE[..]) {
            Self::Affirmative {
                mentions_context: answer.contains("ctx") || answer.contains("context"),
            }
        } else if matches_any(&NEGATIVE[..]) {
            Self::Negative
        } else {
            Self::Unclear
        }
    }
}

pub fn confirmation_prompt(intent: Intent, filename: &str) -> String {
    format!("Confirm {intent} on '{filename}'. Include context in filename? (yes/no)")
}

/// Insert [`CONTEXT_MARKER`] before the extension when context is requested
/// and a context hint exists; otherwise return the filename unchanged.
pub fn apply_context_marker(filename: &str, include_ctx: bool, context_hint: Option<&str>) -> String {
    if !include_ctx || context_hint.is_none_or(str::is_empty) {
        return filename.to_string();
    }

    let path = Path::new(filename);
    let Some(stem) = path.file_stem() else {
        return filename.to_string();
    };
    let mut name = stem.to_os_string();
    name.push(CONTEXT_MARKER);
    if let Some(ext) = path.extension() {
        name.push(".");
        name.push(ext);
    }
    path.with_file_name(name).to_string_lossy().into_owned()
}
