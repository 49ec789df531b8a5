use crate::error::{Access, FileOpError};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Suffix appended to the target file name when a write would overwrite.
pub const SAFETY_SUFFIX: &str = ".safe";

/// Number of leading bytes inspected when sniffing for binary content.
pub const BINARY_SNIFF_BYTES: u64 = 1024;

/// Validate a user-supplied filename and resolve it to an absolute path.
pub(crate) async fn validate_filename(
    base_dir: &Path,
    filename: Option<&str>,
) -> Result<PathBuf, FileOpError> {
    let raw = filename.map(str::trim).unwrap_or_default();
    if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
        return Err(FileOpError::InvalidFilename {
            reason: "Invalid or missing filename.".into(),
        });
    }

    let expanded = shellexpand::tilde(raw);
    let candidate = Path::new(expanded.as_ref());
    let path = if candidate.is_absolute() {
        normalize(candidate)
    } else {
        normalize(&base_dir.join(candidate))
    };

    if tokio::fs::metadata(&path)
        .await
        .is_ok_and(|meta| meta.is_dir())
    {
        return Err(FileOpError::InvalidFilename {
            reason: format!("'{}' is a directory, not a file.", path.display()),
        });
    }

    Ok(path)
}

/// Anchor a relative base directory at the process working directory.
pub(crate) fn absolute_base(base: PathBuf) -> PathBuf {
    if base.is_absolute() {
        return normalize(&base);
    }
    match std::env::current_dir() {
        Ok(cwd) => normalize(&cwd.join(base)),
        Err(_) => base,
    }
}

/// Lexically fold `.` and `..` components. A `..` that cannot be folded
/// into a preceding normal component is kept.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

pub(crate) async fn exists(path: &Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}

/// Pick the effective write target. Returns the target and whether it was redirected.
pub(crate) async fn safe_target(path: &Path, allow_overwrite: bool) -> (PathBuf, bool) {
    if allow_overwrite || !exists(path).await {
        return (path.to_path_buf(), false);
    }
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(SAFETY_SUFFIX);
    (path.with_file_name(name), true)
}

/// The file must exist and open for reading.
pub(crate) async fn check_readable(path: &Path) -> Result<(), FileOpError> {
    if !exists(path).await {
        return Err(FileOpError::NotFound {
            path: path.to_path_buf(),
        });
    }
    tokio::fs::File::open(path)
        .await
        .map(|_| ())
        .map_err(|e| map_io(e, "read", Access::Read, path))
}

/// The file must exist and be writable.
pub(crate) async fn check_writable(path: &Path) -> Result<(), FileOpError> {
    let meta = match tokio::fs::metadata(path).await {
        Ok(meta) => meta,
        Err(e) => return Err(map_io(e, "inspect", Access::Write, path)),
    };
    if meta.permissions().readonly() {
        return Err(FileOpError::PermissionDenied {
            path: path.to_path_buf(),
            access: Access::Write,
        });
    }
    Ok(())
}

/// The parent directory must exist (created on demand) and be writable.
pub(crate) async fn ensure_writable_parent(path: &Path) -> Result<(), FileOpError> {
    let Some(parent) = path.parent() else {
        return Err(FileOpError::InvalidFilename {
            reason: "Invalid path: missing parent directory".into(),
        });
    };

    if !exists(parent).await {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| map_io(e, "create directory", Access::Write, parent))?;
    }

    let meta = tokio::fs::metadata(parent)
        .await
        .map_err(|e| map_io(e, "inspect", Access::Write, parent))?;
    if !meta.is_dir() {
        return Err(FileOpError::InvalidFilename {
            reason: format!(
                "Invalid path: parent is not a directory: {}",
                parent.display()
            ),
        });
    }
    if meta.permissions().readonly() {
        return Err(FileOpError::PermissionDenied {
            path: parent.to_path_buf(),
            access: Access::Write,
        });
    }
    Ok(())
}

/// A file is treated as binary when its first [`BINARY_SNIFF_BYTES`] contain a NUL.
/// Unreadable files count as binary.
pub(crate) async fn is_binary(path: &Path) -> bool {
    let Ok(file) = tokio::fs::File::open(path).await else {
        return true;
    };
    let mut head = Vec::with_capacity(1024);
    if file
        .take(BINARY_SNIFF_BYTES)
        .read_to_end(&mut head)
        .await
        .is_err()
    {
        return true;
    }
    head.contains(&0)
}

/// Map an I/O error onto the failure taxonomy.
pub(crate) fn map_io(
    err: std::io::Error,
    action: &'static str,
    access: Access,
    path: &Path,
) -> FileOpError {
    match err.kind() {
        ErrorKind::NotFound => FileOpError::NotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => FileOpError::PermissionDenied {
            path: path.to_path_buf(),
            access,
        },
        _ => FileOpError::Io {
            action,
            path: path.to_path_buf(),
            source: err,
        },
    }
}
