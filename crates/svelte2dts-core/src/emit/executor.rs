//! Apply pass

use std::fs;

use super::{WritePlan, WriteReport};
use crate::error::{Error, Result};

/// Performs the writes of a validated [`WritePlan`]
pub struct WriteExecutor {
    dry_run: bool,
}

impl WriteExecutor {
    /// Create an executor; in dry-run mode nothing touches the filesystem
    #[must_use]
    pub const fn new(dry_run: bool) -> Self {
        Self { dry_run }
    }

    /// Write every planned declaration, creating parent directories as needed
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if a directory cannot be created or a file
    /// cannot be written. Writes before the failing one stay on disk.
    pub fn apply(&self, plan: WritePlan) -> Result<WriteReport> {
        if self.dry_run {
            tracing::info!(writes = plan.writes.len(), "dry run, skipping writes");
        } else {
            for write in &plan.writes {
                if let Some(parent) = write.dest.parent() {
                    fs::create_dir_all(parent).map_err(|source| Error::Io {
                        action: "create directory",
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }

                fs::write(&write.dest, &write.content).map_err(|source| Error::Io {
                    action: "write",
                    path: write.dest.clone(),
                    source,
                })?;
                tracing::debug!(dest = %write.dest.display(), "declaration written");
            }
        }

        Ok(WriteReport {
            writes: plan.writes,
            failures: plan.failures,
            dry_run: self.dry_run,
        })
    }
}
