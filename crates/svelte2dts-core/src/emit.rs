//! Conflict-safe emission of generated declarations
//!
//! Emission runs in two passes. [`WritePlanner`] validates every candidate
//! (containment, pre-existing files, duplicates within the batch) and either
//! rejects the whole batch or returns a [`WritePlan`]. [`WriteExecutor`] then
//! performs the writes, or only reports them in dry-run mode.

mod executor;
mod plan;
mod reporting;


use std::path::PathBuf;

pub use executor::WriteExecutor;
pub use plan::{WritePlan, WritePlanner};
pub use reporting::EmitReporter;

/// A validated write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedWrite {
    /// Component the declaration was generated from
    pub source: Option<PathBuf>,
    /// Absolute, normalized destination inside the output directory
    pub dest: PathBuf,
    /// Declaration text
    pub content: String,
}

/// A candidate the generator produced no content for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationFailure {
    /// Component the declaration was generated from
    pub source: Option<PathBuf>,
    /// Destination that was reserved for it
    pub dest: PathBuf,
}

/// Outcome of an emission run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Writes performed (or that would be performed in dry-run mode)
    pub writes: Vec<PlannedWrite>,
    /// Candidates without content
    pub failures: Vec<GenerationFailure>,
    /// Whether the filesystem was left untouched
    pub dry_run: bool,
}

impl WriteReport {
    /// True when nothing was written and nothing failed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.failures.is_empty()
    }
}
