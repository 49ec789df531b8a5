use crate::memory::{CONTEXT_WINDOW, ConfirmationState, ConversationState, build_context_hint};
use std::path::Path;

const NONE: &str = "(none)";

/// Human-readable dump of the persisted conversational state.
pub fn render_memory_status(memory_path: &Path, state: &ConversationState) -> String {
    let mut lines = vec![
        format!("◆ Stark Assistant memory ({})", memory_path.display()),
        String::new(),
        format!(
            "  Last intent:    {}",
            state
                .last_intent
                .map_or_else(|| NONE.to_string(), |i| i.to_string())
        ),
        format!(
            "  Last file:      {}",
            state.last_filename.as_deref().unwrap_or(NONE)
        ),
        format!(
            "  Last answer:    {}",
            state.last_answer.as_deref().unwrap_or(NONE)
        ),
    ];

    match state.confirmation_state() {
        ConfirmationState::Idle => lines.push("  Pending:        (none)".into()),
        ConfirmationState::AwaitingConfirmation(pending) => lines.push(format!(
            "  Pending:        {} on '{}' (context in filename: {})",
            pending.intent,
            pending.filename,
            if pending.include_ctx { "yes" } else { "no" }
        )),
    }

    lines.push(String::new());
    match build_context_hint(state, CONTEXT_WINDOW) {
        Some(hint) => lines.push(hint),
        None => lines.push("No turns recorded yet.".into()),
    }

    lines.join("\n")
}
