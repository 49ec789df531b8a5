use super::common::{
    absolute_base, check_readable, check_writable, ensure_writable_parent, exists, is_binary,
    map_io, safe_target, validate_filename,
};
use super::types::{ExecuteOptions, FileOpOutcome, FileOpResult, Intent};
use crate::error::{Access, FileOpError};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::debug;

/// Performs file intents against validated paths.
///
/// Every failure is returned as a [`FileOpError`]; nothing panics or escapes
/// as an I/O error. Relative filenames resolve against `base_dir`.
#[derive(Debug, Clone)]
pub struct SafeExecutor {
    base_dir: PathBuf,
}

impl SafeExecutor {
    /// A relative `base_dir` is anchored at the working directory, so every
    /// effective path the executor reports is absolute.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: absolute_base(base_dir.into()),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub async fn execute(
        &self,
        intent: Intent,
        filename: Option<&str>,
        content: Option<&str>,
        options: ExecuteOptions,
    ) -> FileOpResult {
        let path = validate_filename(&self.base_dir, filename).await?;
        debug!(%intent, path = %path.display(), "executing file intent");

        match intent {
            Intent::Write => write(path, content, options.allow_overwrite).await,
            Intent::Read => read(path).await,
            Intent::Append => append(path, content, options.append_if_missing).await,
            Intent::Delete => delete(path).await,
            Intent::Summarize => extract_for_summary(path).await,
        }
    }
}

async fn write(path: PathBuf, content: Option<&str>, allow_overwrite: bool) -> FileOpResult {
    let Some(content) = content else {
        return Err(FileOpError::MissingContent {
            intent: "write".into(),
        });
    };

    let (target, redirected) = safe_target(&path, allow_overwrite).await;
    ensure_writable_parent(&target).await?;
    tokio::fs::write(&target, content)
        .await
        .map_err(|e| map_io(e, "write", Access::Write, &target))?;

    if redirected {
        Ok(FileOpOutcome::Redirected {
            requested: path,
            path: target,
        })
    } else {
        Ok(FileOpOutcome::Written { path: target })
    }
}

async fn read(path: PathBuf) -> FileOpResult {
    check_readable(&path).await?;
    let content = read_text(&path).await?;
    Ok(FileOpOutcome::Read { path, content })
}

async fn append(path: PathBuf, content: Option<&str>, append_if_missing: bool) -> FileOpResult {
    let Some(content) = content else {
        return Err(FileOpError::MissingContent {
            intent: "append".into(),
        });
    };

    if exists(&path).await {
        check_writable(&path).await?;
    } else if append_if_missing {
        ensure_writable_parent(&path).await?;
    } else {
        return Err(FileOpError::AppendDisallowed { path });
    }

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
        .map_err(|e| map_io(e, "append to", Access::Write, &path))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| map_io(e, "append to", Access::Write, &path))?;
    file.flush()
        .await
        .map_err(|e| map_io(e, "append to", Access::Write, &path))?;

    Ok(FileOpOutcome::Appended { path })
}

async fn delete(path: PathBuf) -> FileOpResult {
    if !exists(&path).await {
        return Err(FileOpError::NotFound { path });
    }
    check_writable(&path).await?;
    tokio::fs::remove_file(&path)
        .await
        .map_err(|e| map_io(e, "delete", Access::Write, &path))?;
    Ok(FileOpOutcome::Deleted { path })
}

async fn extract_for_summary(path: PathBuf) -> FileOpResult {
    check_readable(&path).await?;
    if is_binary(&path).await {
        return Err(FileOpError::NotSummarizable { path });
    }
    match read_text(&path).await {
        Ok(text) => Ok(FileOpOutcome::Extracted { path, text }),
        Err(FileOpError::InvalidEncoding { path }) => Err(FileOpError::NotSummarizable { path }),
        Err(other) => Err(other),
    }
}

async fn read_text(path: &Path) -> Result<String, FileOpError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| map_io(e, "read", Access::Read, path))?;
    String::from_utf8(bytes).map_err(|_| FileOpError::InvalidEncoding {
        path: path.to_path_buf(),
    })
}
