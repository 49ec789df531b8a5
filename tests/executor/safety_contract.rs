use stark_assistant::error::FileOpError;
use stark_assistant::tools::{
    ExecuteOptions, FileOpOutcome, Intent, SAFETY_SUFFIX, SafeExecutor, render_result,
};
use tempfile::TempDir;

fn fixture() -> (TempDir, SafeExecutor) {
    let tmp = TempDir::new().unwrap();
    let executor = SafeExecutor::new(tmp.path());
    (tmp, executor)
}

async fn run(
    executor: &SafeExecutor,
    intent: Intent,
    filename: Option<&str>,
    content: Option<&str>,
) -> Result<FileOpOutcome, FileOpError> {
    executor
        .execute(intent, filename, content, ExecuteOptions::default())
        .await
}

#[tokio::test]
async fn default_write_never_mutates_an_existing_file() {
    let (tmp, executor) = fixture();
    let original = tmp.path().join("ledger.txt");
    std::fs::write(&original, "balance: 100").unwrap();

    for attempt in ["balance: 0", "balance: -5"] {
        let outcome = run(&executor, Intent::Write, Some("ledger.txt"), Some(attempt))
            .await
            .unwrap();
        assert!(matches!(outcome, FileOpOutcome::Redirected { .. }));
        assert_eq!(
            outcome.path(),
            tmp.path().join(format!("ledger.txt{SAFETY_SUFFIX}"))
        );
        assert_eq!(std::fs::read_to_string(&original).unwrap(), "balance: 100");
    }

    // The safety suffix is single-level: the second redirect overwrites it.
    assert_eq!(
        std::fs::read_to_string(tmp.path().join("ledger.txt.safe")).unwrap(),
        "balance: -5"
    );
}

#[tokio::test]
async fn default_append_to_missing_file_changes_nothing() {
    let (tmp, executor) = fixture();

    let err = run(&executor, Intent::Append, Some("new.log"), Some("line"))
        .await
        .unwrap_err();

    assert!(matches!(err, FileOpError::AppendDisallowed { .. }));
    assert!(!tmp.path().join("new.log").exists());
    assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn delete_then_read_reports_not_found() {
    let (tmp, executor) = fixture();
    std::fs::write(tmp.path().join("gone.txt"), "x").unwrap();

    run(&executor, Intent::Delete, Some("gone.txt"), None)
        .await
        .unwrap();
    let err = run(&executor, Intent::Read, Some("gone.txt"), None)
        .await
        .unwrap_err();

    assert!(err.is_not_found());
    let second_delete = run(&executor, Intent::Delete, Some("gone.txt"), None)
        .await
        .unwrap_err();
    assert!(second_delete.is_not_found());
}

#[tokio::test]
async fn missing_or_null_filenames_are_invalid() {
    let (_tmp, executor) = fixture();

    for filename in [None, Some(""), Some("   "), Some("null"), Some("NULL")] {
        let err = run(&executor, Intent::Read, filename, None)
            .await
            .unwrap_err();
        assert!(
            matches!(err, FileOpError::InvalidFilename { .. }),
            "{filename:?}"
        );
        assert_eq!(err.to_string(), "Failed: Invalid or missing filename.");
    }
}

#[tokio::test]
async fn directories_are_not_files() {
    let (tmp, executor) = fixture();
    std::fs::create_dir(tmp.path().join("folder")).unwrap();

    let err = run(&executor, Intent::Delete, Some("folder"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, FileOpError::InvalidFilename { .. }));
    assert!(tmp.path().join("folder").is_dir());
}

#[tokio::test]
async fn binary_content_is_not_summarizable() {
    let (tmp, executor) = fixture();
    let mut bytes = b"looks like text at first".to_vec();
    bytes.push(0);
    bytes.extend_from_slice(b"then a nul byte");
    std::fs::write(tmp.path().join("blob.dat"), bytes).unwrap();

    let err = run(&executor, Intent::Summarize, Some("blob.dat"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, FileOpError::NotSummarizable { .. }));
}

#[tokio::test]
async fn every_failure_renders_with_the_failure_marker() {
    let (tmp, executor) = fixture();
    std::fs::write(tmp.path().join("exists.txt"), "x").unwrap();

    let failures = [
        run(&executor, Intent::Read, Some("missing.txt"), None).await,
        run(&executor, Intent::Append, Some("missing.txt"), Some("x")).await,
        run(&executor, Intent::Append, Some("exists.txt"), None).await,
        run(&executor, Intent::Write, None, Some("x")).await,
        run(&executor, Intent::Delete, Some("missing.txt"), None).await,
    ];

    for result in &failures {
        assert!(result.is_err());
        assert!(render_result(result).starts_with("Failed:"), "{result:?}");
    }
}

#[cfg(unix)]
#[tokio::test]
async fn read_only_files_refuse_append_and_delete() {
    use std::os::unix::fs::PermissionsExt;

    let (tmp, executor) = fixture();
    let locked = tmp.path().join("locked.txt");
    std::fs::write(&locked, "frozen").unwrap();
    std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o444)).unwrap();

    let append = run(&executor, Intent::Append, Some("locked.txt"), Some("more"))
        .await
        .unwrap_err();
    let delete = run(&executor, Intent::Delete, Some("locked.txt"), None)
        .await
        .unwrap_err();

    assert!(matches!(append, FileOpError::PermissionDenied { .. }));
    assert!(matches!(delete, FileOpError::PermissionDenied { .. }));
    assert_eq!(std::fs::read_to_string(&locked).unwrap(), "frozen");
}

#[cfg(unix)]
#[tokio::test]
async fn read_only_parent_refuses_new_files() {
    use std::os::unix::fs::PermissionsExt;

    let (tmp, executor) = fixture();
    let sealed = tmp.path().join("sealed");
    std::fs::create_dir(&sealed).unwrap();
    std::fs::set_permissions(&sealed, std::fs::Permissions::from_mode(0o555)).unwrap();

    let write = run(&executor, Intent::Write, Some("sealed/new.txt"), Some("x")).await;
    let append = executor
        .execute(
            Intent::Append,
            Some("sealed/log.txt"),
            Some("x"),
            ExecuteOptions {
                append_if_missing: true,
                ..ExecuteOptions::default()
            },
        )
        .await;

    std::fs::set_permissions(&sealed, std::fs::Permissions::from_mode(0o755)).unwrap();
    assert!(matches!(write, Err(FileOpError::PermissionDenied { .. })), "{write:?}");
    assert!(matches!(append, Err(FileOpError::PermissionDenied { .. })), "{append:?}");
    assert!(!sealed.join("new.txt").exists());
    assert!(!sealed.join("log.txt").exists());
}

#[tokio::test]
async fn dot_segments_resolve_inside_the_base_dir() {
    let (tmp, executor) = fixture();
    std::fs::create_dir(tmp.path().join("sub")).unwrap();

    let outcome = run(&executor, Intent::Write, Some("sub/../top.txt"), Some("hi"))
        .await
        .unwrap();

    assert_eq!(outcome.path(), tmp.path().join("top.txt"));
    assert!(tmp.path().join("top.txt").exists());
}
