//! Validation pass

use std::collections::HashSet;
use std::path::PathBuf;

use super::{GenerationFailure, PlannedWrite};
use crate::error::{Error, Result};
use crate::generator::GeneratedDeclaration;
use crate::paths;

/// Validated batch, ready for [`super::WriteExecutor`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WritePlan {
    /// Writes in generator order
    pub writes: Vec<PlannedWrite>,
    /// Candidates the generator failed to produce content for
    pub failures: Vec<GenerationFailure>,
}

/// Checks a batch of candidates against the output directory
pub struct WritePlanner {
    cwd: PathBuf,
    out_dir: PathBuf,
    overwrite: bool,
}

impl WritePlanner {
    /// Create a planner for `out_dir`; relative paths resolve against `cwd`
    #[must_use]
    pub fn new(cwd: PathBuf, out_dir: PathBuf, overwrite: bool) -> Self {
        let out_dir = paths::absolutize(&cwd, &out_dir);
        Self {
            cwd,
            out_dir,
            overwrite,
        }
    }

    /// Validate `candidates`
    ///
    /// A candidate without content is recorded as a failure but still claims
    /// its destination, so a later candidate for the same path conflicts.
    ///
    /// # Errors
    ///
    /// - [`Error::PathEscape`] if a destination lies outside the output directory
    /// - [`Error::AlreadyExists`] if a destination already exists on disk or is
    ///   claimed twice in the batch, unless overwriting is enabled
    pub fn plan(&self, candidates: Vec<GeneratedDeclaration>) -> Result<WritePlan> {
        let mut claimed: HashSet<PathBuf> = HashSet::new();
        let mut plan = WritePlan::default();

        for candidate in candidates {
            let dest = paths::absolutize(&self.cwd, &candidate.virtual_source_path);

            if !paths::is_subpath_of(&dest, &self.out_dir) {
                return Err(Error::PathEscape {
                    path: paths::relative_to(&self.cwd, &dest),
                    out_dir: paths::relative_to(&self.cwd, &self.out_dir),
                });
            }

            let conflict = claimed.contains(&dest) || dest.exists();
            if conflict && !self.overwrite {
                return Err(Error::AlreadyExists {
                    path: paths::relative_to(&self.cwd, &dest),
                });
            }
            claimed.insert(dest.clone());

            match candidate.code {
                Some(content) => plan.writes.push(PlannedWrite {
                    source: candidate.source,
                    dest,
                    content,
                }),
                None => {
                    tracing::warn!(
                        dest = %paths::relative_to(&self.cwd, &dest).display(),
                        "Failed to generate d.ts file"
                    );
                    plan.failures.push(GenerationFailure {
                        source: candidate.source,
                        dest,
                    });
                }
            }
        }

        tracing::debug!(
            writes = plan.writes.len(),
            failures = plan.failures.len(),
            "write plan validated"
        );
        Ok(plan)
    }
}
