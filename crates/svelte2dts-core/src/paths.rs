//! Lexical path helpers shared by the walker, the writer and error reporting

use std::path::{Component, Path, PathBuf};

/// Join `path` onto `base` unless it is already absolute, then normalize
#[must_use]
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Fold `.` and `..` components without touching the filesystem
///
/// A `..` that would climb above the root (or above the start of a relative
/// path) is kept as-is.
#[must_use]
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Whether `child` lies strictly inside `parent`
///
/// Both paths are normalized and compared through their relative path: an
/// empty relative path (same directory), one starting with `..`, or one that
/// stays absolute all mean `child` is not contained.
#[must_use]
pub fn is_subpath_of(child: &Path, parent: &Path) -> bool {
    let child = normalize(child);
    let parent = normalize(parent);

    let Some(relative) = pathdiff::diff_paths(&child, &parent) else {
        return false;
    };

    if relative.as_os_str().is_empty() || relative.is_absolute() {
        return false;
    }

    !matches!(relative.components().next(), Some(Component::ParentDir))
}

/// Render `path` relative to `cwd` for operator-facing messages
///
/// Falls back to the path itself when no relative form exists (e.g. a
/// different drive prefix on Windows).
#[must_use]
pub fn relative_to(cwd: &Path, path: &Path) -> PathBuf {
    let normalized = normalize(path);
    pathdiff::diff_paths(&normalized, normalize(cwd)).unwrap_or(normalized)
}

/// JSON-quoted relative rendering, e.g. `"types/Button.svelte.d.ts"`
#[must_use]
pub fn display_relative(cwd: &Path, path: &Path) -> String {
    let relative = relative_to(cwd, path);
    serde_json::to_string(&relative.to_string_lossy()).unwrap_or_else(|_| format!("{relative:?}"))
}
