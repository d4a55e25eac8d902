//! Source discovery
//!
//! Walks every source root in the order given and keeps the files whose
//! path ends with one of the active target suffixes:
//! - `walker`: lazy depth-first traversal of one root
//! - `targets`: suffix-based target selection and exclude patterns

mod targets;
mod walker;


use std::path::{Path, PathBuf};

pub use targets::{ExcludeMatcher, JS_EXTENSIONS, TS_EXTENSIONS, TargetSet, select_targets};
pub use walker::SourceWalker;

use crate::error::Result;

/// Walks source roots and collects target files
pub struct Scanner {
    targets: TargetSet,
    exclude: ExcludeMatcher,
    follow_symlinks: bool,
}

impl Scanner {
    /// Create a scanner for the given target set
    #[must_use]
    pub const fn new(targets: TargetSet, exclude: ExcludeMatcher, follow_symlinks: bool) -> Self {
        Self {
            targets,
            exclude,
            follow_symlinks,
        }
    }

    /// Target suffixes in use
    #[must_use]
    pub const fn targets(&self) -> &TargetSet {
        &self.targets
    }

    /// Fail for the first root that is missing or not a directory
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::DirectoryNotFound`] or [`crate::Error::NotADirectory`]
    /// naming the first unusable root.
    pub fn check_roots(roots: &[PathBuf]) -> Result<()> {
        roots.iter().try_for_each(|root| walker::check_root(root))
    }

    /// Walk `roots` one after another and return the selected targets
    ///
    /// # Errors
    ///
    /// Returns an error if a root is missing or traversal fails.
    pub fn scan(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut selected = Vec::new();

        for root in roots {
            let walked = SourceWalker::new(root, self.follow_symlinks)?
                .collect::<Result<Vec<_>>>()?
                .into_iter()
                .filter(|path| !self.exclude.is_excluded(root, path));

            for path in select_targets(walked, &self.targets) {
                tracing::trace!(path = %path.display(), "selected target");
                selected.push(path);
            }
        }

        tracing::debug!(count = selected.len(), "selected target files");
        Ok(selected)
    }

    /// Whether a single path is a target (the auto-generate predicate)
    #[must_use]
    pub fn is_target(&self, path: &Path) -> bool {
        self.targets.matches(path)
    }
}
