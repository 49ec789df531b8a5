use super::classification::{ActionRequest, Classification};
use super::classifier::Classifier;
use super::confirmation::{
    CANCELLED, ConfirmationReply, REISSUE, apply_context_marker, confirmation_prompt,
};
use super::summarizer::Summarizer;
use crate::memory::{
    CONTEXT_WINDOW, ConversationState, MemoryStore, PendingAction, build_context_hint,
};
use crate::tools::{ExecuteOptions, FileOpResult, Intent, SafeExecutor, render_result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Asked when an action names no file and memory has none to offer.
pub const CLARIFY_FILENAME: &str = "Which file should I use, sir?";

/// Orchestrates one command: memory load, confirmation gate, classification,
/// filename resolution, execution and the memory write-back.
///
/// The confirmation state machine lives entirely in the persisted pending
/// group of [`ConversationState`]; the pipeline keeps nothing between calls.
pub struct CommandPipeline {
    memory: MemoryStore,
    executor: SafeExecutor,
    classifier: Arc<dyn Classifier>,
    summarizer: Arc<dyn Summarizer>,
    default_summary_file: PathBuf,
}

impl CommandPipeline {
    pub fn new(
        memory: MemoryStore,
        executor: SafeExecutor,
        classifier: Arc<dyn Classifier>,
        summarizer: Arc<dyn Summarizer>,
        default_summary_file: impl Into<PathBuf>,
    ) -> Self {
        Self {
            memory,
            executor,
            classifier,
            summarizer,
            default_summary_file: default_summary_file.into(),
        }
    }

    pub fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    /// Process one raw command and return the text shown to the user.
    pub async fn process(&self, command: &str) -> String {
        info!(command, "COMMAND");

        let mut state = self.memory.load().await;
        let outcome = match state.take_pending() {
            Some(pending) => {
                self.resolve_confirmation(command, pending, &mut state)
                    .await
            }
            None => self.handle_command(command, &mut state).await,
        };

        self.persist(&state).await;
        outcome
    }

    async fn resolve_confirmation(
        &self,
        command: &str,
        pending: PendingAction,
        state: &mut ConversationState,
    ) -> String {
        let intent = pending.intent;
        match ConfirmationReply::parse(command) {
            ConfirmationReply::Affirmative { mentions_context } => {
                let include_ctx = mentions_context || pending.include_ctx;
                let hint = build_context_hint(state, CONTEXT_WINDOW);
                let filename = apply_context_marker(&pending.filename, include_ctx, hint.as_deref());
                info!(%intent, file = %filename, include_ctx, "pending action confirmed");

                // The cleared pending group reaches disk before any side effect.
                self.persist(state).await;

                let result = self
                    .executor
                    .execute(
                        intent,
                        Some(&filename),
                        pending.content.as_deref(),
                        ExecuteOptions::default(),
                    )
                    .await;
                let record = Classification::Action(ActionRequest {
                    content: pending.content,
                    ..ActionRequest::new(intent).with_filename(filename)
                });
                record_action(command, &record, &result, state)
            }
            ConfirmationReply::Negative => {
                info!(%intent, file = %pending.filename, "pending action cancelled");
                let record =
                    Classification::Action(ActionRequest::new(intent).with_filename(pending.filename));
                state.record_turn(command, &record, CANCELLED);
                CANCELLED.to_string()
            }
            ConfirmationReply::Unclear => {
                info!(%intent, file = %pending.filename, "unclear confirmation, pending action dropped");
                let record =
                    Classification::Action(ActionRequest::new(intent).with_filename(pending.filename));
                state.record_turn(command, &record, REISSUE);
                REISSUE.to_string()
            }
        }
    }

    async fn handle_command(&self, command: &str, state: &mut ConversationState) -> String {
        let hint = build_context_hint(state, CONTEXT_WINDOW);
        let classification = self.classifier.classify(command, hint.as_deref()).await;

        let request = match &classification {
            Classification::Answer { text } => {
                info!(answer = %text, "ANSWER");
                state.record_turn(command, &classification, text);
                return text.clone();
            }
            Classification::Action(request) => request.clone(),
        };

        let filename = state.resolve_filename(request.filename.as_deref());
        if request.intent == Intent::Summarize {
            return self.summarize(command, request, filename, state).await;
        }

        let Some(filename) = filename else {
            info!(intent = %request.intent, "no filename to act on");
            state.record_turn(command, &classification, CLARIFY_FILENAME);
            return CLARIFY_FILENAME.to_string();
        };
        let resolved = Classification::Action(request.clone().with_filename(filename.clone()));

        if request.intent.is_mutating() {
            let prompt = confirmation_prompt(request.intent, &filename);
            state.set_pending(PendingAction {
                intent: request.intent,
                filename,
                content: request.content,
                include_ctx: request.include_ctx_in_filename.unwrap_or(false),
            });
            info!(intent = %request.intent, "awaiting confirmation");
            state.record_turn(command, &resolved, &prompt);
            return prompt;
        }

        let result = self
            .executor
            .execute(
                request.intent,
                Some(&filename),
                request.content.as_deref(),
                ExecuteOptions::default(),
            )
            .await;
        record_action(command, &resolved, &result, state)
    }

    async fn summarize(
        &self,
        command: &str,
        request: ActionRequest,
        filename: Option<String>,
        state: &mut ConversationState,
    ) -> String {
        let detail = request.detail.unwrap_or_default();
        let (target, record) = match filename {
            Some(name) => (
                name.clone(),
                Classification::Action(request.with_filename(name)),
            ),
            // The default document is not remembered as the user's file.
            None => (
                self.default_summary_file.to_string_lossy().into_owned(),
                Classification::Action(request),
            ),
        };

        let text = match self
            .executor
            .execute(Intent::Summarize, Some(&target), None, ExecuteOptions::default())
            .await
        {
            Ok(outcome) => outcome.into_text(),
            Err(e) => {
                info!(file = %file_label(&target), status = "failed", "SUMMARIZE");
                let failure = e.to_string();
                state.record_failed_turn(command, &record, &failure);
                return failure;
            }
        };

        let summary = self.summarizer.summarize(&text, detail).await;
        info!(file = %file_label(&target), %detail, status = "ok", "SUMMARIZE");
        state.record_turn(command, &record, &summary);
        summary
    }

    async fn persist(&self, state: &ConversationState) {
        if let Err(e) = self.memory.save(state).await {
            error!(path = %self.memory.path().display(), error = %e, "conversation state not saved");
        }
    }
}

/// Record an executed action and return its rendered outcome. Failures are
/// kept as turns but leave the `last_*` pointers alone.
fn record_action(
    command: &str,
    classification: &Classification,
    result: &FileOpResult,
    state: &mut ConversationState,
) -> String {
    let outcome = render_result(result);
    let file = classification.filename().map_or("none", file_label);
    let intent = classification.intent().map(|i| i.to_string()).unwrap_or_default();

    if result.is_ok() {
        info!(%intent, file, status = "ok", "ACTION");
        state.record_turn(command, classification, &outcome);
    } else {
        info!(%intent, file, status = "failed", "ACTION");
        state.record_failed_turn(command, classification, &outcome);
    }
    outcome
}

fn file_label(filename: &str) -> &str {
    Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(filename)
}
