use super::types::ConversationState;
use crate::agent::classification::Classification;
use crate::error::MemoryError;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File-backed persistence boundary for [`ConversationState`].
///
/// The store holds no state of its own: every call reads or writes the
/// backing JSON file in full.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    path: PathBuf,
}

impl MemoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted state. Missing, unreadable or corrupt files yield
    /// the default state; this never fails.
    pub async fn load(&self) -> ConversationState {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no conversation state yet, starting fresh");
                return ConversationState::default();
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "conversation state unreadable, resetting");
                return ConversationState::default();
            }
        };

        match serde_json::from_str::<ConversationState>(&raw) {
            Ok(mut state) => {
                state.trim_turns();
                state
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "conversation state corrupt, resetting");
                ConversationState::default()
            }
        }
    }

    /// Persist the full state, creating the containing directory if needed.
    pub async fn save(&self, state: &ConversationState) -> Result<(), MemoryError> {
        let body = serde_json::to_string_pretty(state)?;
        write_atomic(&self.path, &body).await
    }

    /// Load, append one turn, persist.
    pub async fn record_turn(
        &self,
        command: &str,
        classification: &Classification,
        outcome: &str,
    ) -> Result<ConversationState, MemoryError> {
        let mut state = self.load().await;
        state.record_turn(command, classification, outcome);
        self.save(&state).await?;
        Ok(state)
    }

    /// Restore defaults on disk.
    pub async fn reset(&self) -> Result<(), MemoryError> {
        self.save(&ConversationState::default()).await
    }
}

async fn write_atomic(path: &Path, content: &str) -> Result<(), MemoryError> {
    let persist_err = |source| MemoryError::Persist {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await.map_err(persist_err)?;
    }

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, content)
        .await
        .map_err(persist_err)?;

    if let Err(rename_error) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(persist_err(rename_error));
    }
    Ok(())
}
