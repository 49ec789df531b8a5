use crate::agent::classification::Classification;
use crate::error::FAILURE_MARKER;
use crate::tools::Intent;
use serde::{Deserialize, Serialize};

/// Maximum number of turns kept in the sliding window.
pub const MAX_TURNS: usize = 5;

/// Character limit applied to text stored inside a turn.
pub const TURN_TEXT_LIMIT: usize = 400;

const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum TurnKind {
    Answer,
    Action,
}

/// One recorded command and its outcome. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub command: String,
    #[serde(rename = "type")]
    pub kind: TurnKind,
    #[serde(default)]
    pub intent: Option<Intent>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub outcome: String,
}

impl Turn {
    pub fn new(command: &str, classification: &Classification, outcome: &str) -> Self {
        let kind = match classification {
            Classification::Answer { .. } => TurnKind::Answer,
            Classification::Action(_) => TurnKind::Action,
        };
        Self {
            command: truncate_text(command),
            kind,
            intent: classification.intent(),
            filename: classification.filename().map(ToOwned::to_owned),
            content: classification.content().map(truncate_text),
            outcome: truncate_text(outcome),
        }
    }
}

/// A mutating action awaiting the user's yes/no.
///
/// Persisted as the `pending_*` field group of [`ConversationState`]; the
/// group is written and cleared as a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    #[serde(rename = "pending_intent")]
    pub intent: Intent,
    #[serde(rename = "pending_filename")]
    pub filename: String,
    #[serde(rename = "pending_content")]
    pub content: Option<String>,
    #[serde(rename = "pending_include_ctx", default)]
    pub include_ctx: bool,
}

/// The two states of the confirmation gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState<'a> {
    Idle,
    AwaitingConfirmation(&'a PendingAction),
}

/// Process-wide conversational state, loaded fresh for every command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversationState {
    pub turns: Vec<Turn>,
    pub last_intent: Option<Intent>,
    pub last_filename: Option<String>,
    pub last_content: Option<String>,
    pub last_answer: Option<String>,
    #[serde(flatten)]
    pending: Option<PendingAction>,
}

impl ConversationState {
    pub fn confirmation_state(&self) -> ConfirmationState<'_> {
        match &self.pending {
            Some(pending) => ConfirmationState::AwaitingConfirmation(pending),
            None => ConfirmationState::Idle,
        }
    }

    pub fn pending(&self) -> Option<&PendingAction> {
        self.pending.as_ref()
    }

    pub fn set_pending(&mut self, pending: PendingAction) {
        self.pending = Some(pending);
    }

    /// Clear the pending group, returning what was awaiting confirmation.
    pub fn take_pending(&mut self) -> Option<PendingAction> {
        self.pending.take()
    }

    /// Explicit filename if non-empty, else the remembered one.
    pub fn resolve_filename(&self, candidate: Option<&str>) -> Option<String> {
        candidate
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .or_else(|| {
                self.last_filename
                    .as_deref()
                    .filter(|name| !name.trim().is_empty())
            })
            .map(ToOwned::to_owned)
    }

    /// Append a turn and refresh the `last_*` pointers from non-empty values.
    /// Answers carrying the failure marker are never kept as `last_answer`.
    pub fn record_turn(&mut self, command: &str, classification: &Classification, outcome: &str) {
        self.push_turn(Turn::new(command, classification, outcome));

        if let Some(intent) = classification.intent() {
            self.last_intent = Some(intent);
        }
        if let Some(filename) = classification.filename().filter(|f| !f.is_empty()) {
            self.last_filename = Some(filename.to_string());
        }
        if let Some(content) = classification.content().filter(|c| !c.is_empty()) {
            self.last_content = Some(content.to_string());
        }
        if matches!(classification, Classification::Answer { .. })
            && !outcome.is_empty()
            && !outcome.starts_with(FAILURE_MARKER)
        {
            self.last_answer = Some(outcome.to_string());
        }
    }

    /// Append a turn for a failed action without touching the `last_*` pointers.
    pub fn record_failed_turn(
        &mut self,
        command: &str,
        classification: &Classification,
        outcome: &str,
    ) {
        self.push_turn(Turn::new(command, classification, outcome));
    }

    fn push_turn(&mut self, turn: Turn) {
        self.turns.push(turn);
        self.trim_turns();
    }

    /// Evict oldest turns beyond [`MAX_TURNS`].
    pub(crate) fn trim_turns(&mut self) {
        if self.turns.len() > MAX_TURNS {
            let excess = self.turns.len() - MAX_TURNS;
            self.turns.drain(..excess);
        }
    }
}

/// Truncate to [`TURN_TEXT_LIMIT`] characters, marking the cut with an ellipsis.
pub fn truncate_text(text: &str) -> String {
    match text.char_indices().nth(TURN_TEXT_LIMIT) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &text[..cut]),
        None => text.to_string(),
    }
}
