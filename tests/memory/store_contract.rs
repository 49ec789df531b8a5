use stark_assistant::agent::Classification;
use stark_assistant::memory::{ConversationState, MAX_TURNS, MemoryStore, TURN_TEXT_LIMIT};
use tempfile::TempDir;

fn store(tmp: &TempDir) -> MemoryStore {
    MemoryStore::new(tmp.path().join("nested").join("memory.json"))
}

#[tokio::test]
async fn turn_window_never_exceeds_five() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);

    for i in 0..12 {
        let state = store
            .record_turn(&format!("command {i}"), &Classification::answer("ok"), "ok")
            .await
            .unwrap();
        assert!(state.turns.len() <= MAX_TURNS);
    }

    let state = store.load().await;
    let commands: Vec<_> = state.turns.iter().map(|t| t.command.as_str()).collect();
    assert_eq!(
        commands,
        ["command 7", "command 8", "command 9", "command 10", "command 11"]
    );
}

#[tokio::test]
async fn oversized_file_is_trimmed_on_load() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    let turns: Vec<_> = (0..9)
        .map(|i| serde_json::json!({"command": format!("c{i}"), "type": "ANSWER", "outcome": "x"}))
        .collect();
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), serde_json::json!({ "turns": turns }).to_string()).unwrap();

    let state = store.load().await;

    assert_eq!(state.turns.len(), MAX_TURNS);
    assert_eq!(state.turns[0].command, "c4");
}

#[tokio::test]
async fn corrupt_or_foreign_files_fall_back_to_defaults() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();

    for body in ["{not json", "[]", "\"just a string\""] {
        std::fs::write(store.path(), body).unwrap();
        assert_eq!(store.load().await, ConversationState::default(), "{body}");
    }
}

#[tokio::test]
async fn missing_fields_take_defaults() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), r#"{"last_filename": "notes.txt"}"#).unwrap();

    let state = store.load().await;

    assert_eq!(state.last_filename.as_deref(), Some("notes.txt"));
    assert!(state.turns.is_empty());
    assert!(state.pending().is_none());
}

#[tokio::test]
async fn long_turn_text_is_truncated_when_recorded() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    let long = "x".repeat(TURN_TEXT_LIMIT * 2);

    let state = store
        .record_turn(&long, &Classification::answer("fine"), &long)
        .await
        .unwrap();

    let turn = &state.turns[0];
    assert_eq!(turn.command.chars().count(), TURN_TEXT_LIMIT + 3);
    assert!(turn.outcome.ends_with("..."));
}

#[tokio::test]
async fn reset_restores_defaults_on_disk() {
    let tmp = TempDir::new().unwrap();
    let store = store(&tmp);
    store
        .record_turn("hello", &Classification::answer("hi"), "hi")
        .await
        .unwrap();

    store.reset().await.unwrap();

    assert_eq!(store.load().await, ConversationState::default());
    assert!(store.path().exists());
    assert!(!store.path().with_extension("tmp").exists());
}
