use super::types::{ConversationState, Turn};
use std::fmt::Write;

/// Default number of recent turns rendered into the context hint.
pub const CONTEXT_WINDOW: usize = 5;

const HEADER: &str = "Recent assistant context (most recent last):";
const MISSING: &str = "none";

/// Render the most recent `window` turns as a compact digest for the classifier.
///
/// Returns `None` when no turns have been recorded.
pub fn build_context_hint(state: &ConversationState, window: usize) -> Option<String> {
    if state.turns.is_empty() {
        return None;
    }

    let start = state.turns.len().saturating_sub(window);
    let mut hint = String::from(HEADER);
    for turn in &state.turns[start..] {
        hint.push('\n');
        render_turn(&mut hint, turn);
    }

    if let Some(answer) = state.last_answer.as_deref().filter(|a| !a.is_empty()) {
        let _ = write!(hint, "\n- last_answer: {answer}");
    }

    Some(hint)
}

fn render_turn(out: &mut String, turn: &Turn) {
    let intent = turn
        .intent
        .map_or_else(|| MISSING.to_string(), |i| i.to_string());
    let _ = write!(
        out,
        "- cmd: {} | type: {} | intent: {} | file: {} | outcome: {}",
        turn.command,
        turn.kind,
        intent,
        turn.filename.as_deref().unwrap_or(MISSING),
        turn.outcome,
    );
}
