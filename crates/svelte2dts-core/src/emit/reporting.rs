//! Operator-facing output for an emission run

use std::path::{Path, PathBuf};

use super::WriteReport;
use crate::paths::display_relative;

/// Renders [`WriteReport`] entries relative to the working directory
pub struct EmitReporter {
    cwd: PathBuf,
}

impl EmitReporter {
    /// Create a reporter rendering paths relative to `cwd`
    #[must_use]
    pub const fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }

    /// One line per write, in plan order
    ///
    /// `Writing "<dest>"`, or with the originating component when known:
    /// `Writing "<src>" -> "<dest>"`. Dry runs append ` (dry run)`.
    #[must_use]
    pub fn write_lines(&self, report: &WriteReport) -> Vec<String> {
        let suffix = if report.dry_run { " (dry run)" } else { "" };

        report
            .writes
            .iter()
            .map(|write| {
                format!(
                    "Writing {}{suffix}",
                    self.describe(write.source.as_deref(), &write.dest)
                )
            })
            .collect()
    }

    /// One line per candidate the generator produced no content for
    #[must_use]
    pub fn failure_lines(&self, report: &WriteReport) -> Vec<String> {
        report
            .failures
            .iter()
            .map(|failure| {
                format!(
                    "Failed to generate d.ts file {}",
                    display_relative(&self.cwd, &failure.dest)
                )
            })
            .collect()
    }

    /// Closing summary line
    #[must_use]
    pub fn summary(&self, report: &WriteReport) -> String {
        let writes = report.writes.len();
        let noun = if writes == 1 { "file" } else { "files" };
        let verb = if report.dry_run { "would be written" } else { "written" };

        let mut line = format!("{writes} declaration {noun} {verb}");
        if !report.failures.is_empty() {
            line.push_str(&format!(", {} failed", report.failures.len()));
        }
        line
    }

    fn describe(&self, source: Option<&Path>, dest: &Path) -> String {
        let dest = display_relative(&self.cwd, dest);
        match source {
            Some(source) => format!("{} -> {dest}", display_relative(&self.cwd, source)),
            None => dest,
        }
    }
}
