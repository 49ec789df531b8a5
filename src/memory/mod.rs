pub mod context;
pub mod store;
pub mod types;

pub use context::{CONTEXT_WINDOW, build_context_hint};
pub use store::MemoryStore;
pub use types::{
    ConfirmationState, ConversationState, MAX_TURNS, PendingAction, TURN_TEXT_LIMIT, Turn,
    TurnKind, truncate_text,
};
