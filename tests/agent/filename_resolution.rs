use stark_assistant::agent::{CLARIFY_FILENAME, Classification};
use stark_assistant::memory::{ConversationState, TurnKind};
use stark_assistant::tools::Intent;

use super::pipeline_harness::{Harness, action, on_file, write_to};

fn remembering(filename: &str) -> ConversationState {
    let mut state = ConversationState::default();
    state.last_filename = Some(filename.into());
    state
}

#[tokio::test]
async fn read_without_filename_falls_back_to_last_file() {
    let h = Harness::new();
    h.write_file("notes.txt", "remember the milk");
    h.seed_state(&remembering("notes.txt")).await;
    h.script(Classification::Action(action(Intent::Read)));

    assert_eq!(h.run("read it again").await, "remember the milk");
}

#[tokio::test]
async fn read_after_confirmed_write_targets_the_written_file() {
    let h = Harness::new();
    h.script(write_to("report.txt", "draft one"));
    h.run("write draft one to report.txt").await;
    h.run("yes").await;

    h.script(Classification::Action(action(Intent::Read)));
    assert_eq!(h.run("show me that file").await, "draft one");

    let state = h.state().await;
    assert_eq!(state.last_intent, Some(Intent::Read));
    assert_eq!(state.last_filename.as_deref(), Some("report.txt"));
}

#[tokio::test]
async fn action_without_any_filename_asks_for_one() {
    let h = Harness::new();
    h.script(Classification::Action(
        action(Intent::Delete).with_content("ignored"),
    ));

    assert_eq!(h.run("delete it").await, CLARIFY_FILENAME);
    let state = h.state().await;
    assert!(state.pending().is_none());
    assert_eq!(state.turns.len(), 1);
    assert_eq!(state.turns[0].outcome, CLARIFY_FILENAME);
}

#[tokio::test]
async fn failed_read_is_recorded_but_keeps_last_filename() {
    let h = Harness::new();
    h.seed_state(&remembering("notes.txt")).await;
    h.script(on_file(Intent::Read, "missing.txt"));

    let reply = h.run("read missing.txt").await;
    assert_eq!(
        reply,
        format!("Failed: File '{}' does not exist.", h.path("missing.txt").display())
    );

    let state = h.state().await;
    assert_eq!(state.last_filename.as_deref(), Some("notes.txt"));
    assert_eq!(state.last_intent, None);
    let turn = state.turns.last().unwrap();
    assert_eq!(turn.kind, TurnKind::Action);
    assert_eq!(turn.filename.as_deref(), Some("missing.txt"));
    assert!(turn.outcome.starts_with("Failed:"));
}

#[tokio::test]
async fn answers_are_remembered_and_fed_back_as_context() {
    let h = Harness::new();
    h.script(Classification::answer("It is Tuesday, sir."));
    h.script(Classification::answer("Still Tuesday, sir."));

    assert_eq!(h.run("what day is it").await, "It is Tuesday, sir.");
    h.run("and now?").await;

    let hints = h.classifier.hints();
    assert_eq!(hints[0], None);
    let second = hints[1].as_deref().unwrap();
    assert!(second.starts_with("Recent assistant context (most recent last):"));
    assert!(second.contains("- cmd: what day is it | type: ANSWER"));
    assert!(second.contains("- last_answer: It is Tuesday, sir."));

    let state = h.state().await;
    assert_eq!(state.last_answer.as_deref(), Some("Still Tuesday, sir."));
}

#[tokio::test]
async fn prompt_turn_remembers_the_pending_filename() {
    let h = Harness::new();
    h.script(write_to("todo.txt", "buy suits"));
    h.run("write buy suits to todo.txt").await;
    h.run("no").await;

    // Even a cancelled action leaves the file in memory for follow-ups.
    h.write_file("todo.txt", "existing list");
    h.script(Classification::Action(action(Intent::Read)));
    assert_eq!(h.run("read it").await, "existing list");
}

#[tokio::test]
async fn unsupported_intent_is_not_fed_back_as_last_answer() {
    let h = Harness::new();
    h.script(Classification::answer("At your service, sir."));
    h.script(Classification::parse(r#"{"type":"ACTION","intent":"RENAME"}"#));
    h.script(Classification::answer("Anything else?"));

    h.run("hello").await;
    assert_eq!(h.run("rename a.txt").await, "Failed: Unknown intent: RENAME");
    h.run("and now?").await;

    let hint = h.classifier.hints()[2].clone().unwrap();
    assert!(hint.contains("- last_answer: At your service, sir."));
    assert!(!hint.contains("- last_answer: Failed"));
}
