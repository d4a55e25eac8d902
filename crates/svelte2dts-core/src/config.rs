//! Project configuration resolution
//!
//! This module handles:
//! - Discovery of the nearest `tsconfig.json`
//! - JSON-with-comments parsing
//! - `extends` chains (relative files and `node_modules` packages)
//! - Compiler option validation with structured diagnostics
//! - Resolution of `declarationDir` against the declaring file

mod diagnostics;
mod discovery;
mod jsonc;
mod loader;
mod options;

#[cfg(test)]
mod integration_tests;

use std::path::{Path, PathBuf};

pub use diagnostics::{Diagnostic, DiagnosticCategory};
pub use discovery::{CONFIG_FILE_NAME, find_nearest_config, find_up};
pub use options::CompilerOptions;

use crate::error::ConfigError;
use crate::paths;
use loader::ConfigLoader;

/// Resolved project configuration for one run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigurationSnapshot {
    /// Configuration file the snapshot was read from, if any
    pub config_path: Option<PathBuf>,
    /// Effective compiler options
    pub options: CompilerOptions,
    /// Absolute `declarationDir`, if configured
    pub declaration_dir: Option<PathBuf>,
    /// Effective `include` list
    pub include: Option<Vec<String>>,
    /// Effective `exclude` list
    pub exclude: Option<Vec<String>>,
    /// Effective `files` list
    pub files: Option<Vec<String>>,
    /// Style-only diagnostics that were tolerated
    pub suppressed: Vec<Diagnostic>,
}

impl ConfigurationSnapshot {
    /// Snapshot used when no configuration file exists
    #[must_use]
    pub fn defaults(base_options: CompilerOptions) -> Self {
        Self {
            options: base_options,
            ..Self::default()
        }
    }

    /// Find the nearest configuration from `start_dir` and parse it
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the discovered file or any file it
    /// extends is unreadable, malformed or invalid.
    pub fn resolve(start_dir: &Path) -> Result<Self, ConfigError> {
        match find_nearest_config(start_dir) {
            Some(path) => parse_config(&path, &CompilerOptions::default()),
            None => {
                tracing::debug!(start = %start_dir.display(), "no tsconfig.json found, using defaults");
                Ok(Self::defaults(CompilerOptions::default()))
            }
        }
    }

    /// `strict` from the effective options
    #[must_use]
    pub fn strict(&self) -> Option<bool> {
        self.options.strict()
    }
}

/// Parse the configuration at `path` on top of `base_options`
///
/// # Errors
///
/// Returns a [`ConfigError`] carrying every blocking diagnostic. Diagnostics
/// flagged as `reports_unnecessary` never cause failure; they are kept in
/// [`ConfigurationSnapshot::suppressed`].
pub fn parse_config(
    path: &Path,
    base_options: &CompilerOptions,
) -> Result<ConfigurationSnapshot, ConfigError> {
    let path = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let config_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();

    let mut loader = ConfigLoader::new(&path);
    let loaded = loader.load(&path);
    let (suppressed, blocking): (Vec<_>, Vec<_>) = loader
        .into_diagnostics()
        .into_iter()
        .partition(|diagnostic| diagnostic.reports_unnecessary);

    let loaded = match loaded {
        Some(loaded) if blocking.is_empty() => loaded,
        _ => {
            return Err(ConfigError {
                path,
                diagnostics: blocking,
            });
        }
    };

    for diagnostic in &suppressed {
        tracing::debug!(%diagnostic, "suppressed configuration diagnostic");
    }

    let mut options = base_options.clone();
    options.overlay(loaded.options);

    let declaration_dir = options
        .declaration_dir()
        .map(|dir| paths::absolutize(&config_dir, &dir));

    tracing::debug!(
        config = %path.display(),
        declaration_dir = ?declaration_dir,
        options = options.len(),
        "resolved project configuration"
    );

    Ok(ConfigurationSnapshot {
        config_path: Some(path),
        options,
        declaration_dir,
        include: loaded.include,
        exclude: loaded.exclude,
        files: loaded.files,
        suppressed,
    })
}

impl ConfigError {
    /// Rewrite every path in the error relative to `cwd`
    #[must_use]
    pub fn relative_to(mut self, cwd: &Path) -> Self {
        self.path = paths::relative_to(cwd, &self.path);
        for diagnostic in &mut self.diagnostics {
            if let Some(file) = diagnostic.file.take() {
                diagnostic.file = Some(paths::relative_to(cwd, &file));
            }
        }
        self
    }
}
