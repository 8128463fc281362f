//! Utility functions for working with paths
use std::path::{Path, PathBuf};

/// Stand-in name for an upload whose filename sanitizes down to nothing.
const FALLBACK_FILENAME: &str = "upload";

/// Reduce a client supplied filename to characters that are safe on any
/// filesystem: alphanumerics, `-`, `_`, `.` and spaces.
///
/// Path separators never survive, so the result is always a single path
/// component.
#[must_use]
pub fn sanitize_filename(original_name: &str) -> String {
    let sanitized: String = original_name
        .chars()
        .filter(|ch| ch.is_alphanumeric() || matches!(*ch, '-' | '_' | '.' | ' '))
        .collect();
    let trimmed = sanitized.trim();
    if trimmed.is_empty() {
        FALLBACK_FILENAME.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Name under which an upload is stored: the creation time in unix
/// milliseconds, a dash, then the sanitized original name.
#[must_use]
pub fn stored_filename(original_name: &str, unix_millis: i64) -> String {
    format!("{unix_millis}-{}", sanitize_filename(original_name))
}

/// Resolve `filename` inside `uploads_dir`.
///
/// Returns `None` for anything that is not a plain file name, so a request
/// can never reach outside the uploads directory.
#[must_use]
pub fn resolve_upload_path(uploads_dir: &Path, filename: &str) -> Option<PathBuf> {
    let is_plain = !filename.is_empty()
        && filename != "."
        && filename != ".."
        && !filename.contains(['/', '\\', '\0']);
    is_plain.then(|| uploads_dir.join(filename))
}

/// Expand a leading `~` to the current user's home directory.
#[must_use]
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
