//! Environment/runtime helpers
//!
//! Sanity checks run before the database is opened.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::CoreError;

/// Extract the on-disk file of a `sqlite:` URL.
///
/// Returns `None` for in-memory databases (`sqlite::memory:`, `mode=memory`).
pub fn sqlite_file_path(url: &str) -> Option<PathBuf> {
    let rest = url
        .strip_prefix("sqlite://")
        .or_else(|| url.strip_prefix("sqlite:"))?;
    let (path, query) = match rest.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (rest, None),
    };
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    if query.is_some_and(|q| q.split('&').any(|kv| kv == "mode=memory")) {
        return None;
    }
    Some(PathBuf::from(path))
}

/// Ensure the directory holding the SQLite file exists.
pub async fn ensure_db_dir(database_url: &str) -> Result<(), CoreError> {
    let Some(file) = sqlite_file_path(database_url) else {
        debug!(%database_url, "in-memory database; nothing to prepare");
        return Ok(());
    };
    let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) else {
        return Ok(());
    };
    ensure_dir(parent).await
}

async fn ensure_dir(dir: &Path) -> Result<(), CoreError> {
    if tokio::fs::metadata(dir).await.is_ok() {
        return Ok(());
    }
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| CoreError::Io(format!("cannot create {}: {e}", dir.display())))?;
    info!(dir = %dir.display(), "created database directory");
    Ok(())
}
