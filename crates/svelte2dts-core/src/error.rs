//! Error taxonomy for the declaration pipeline

use std::fmt;
use std::path::PathBuf;

use crate::config::Diagnostic;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a pipeline run
///
/// Paths carried by the user-facing variants are already rendered relative to
/// the working directory of the run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Project configuration could not be read, parsed or resolved
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A declared source root does not exist
    #[error("srcDir: {path:?} does not exist!")]
    DirectoryNotFound {
        /// The missing root, as given
        path: PathBuf,
    },

    /// A declared source root exists but is not a directory
    #[error("srcDir: {path:?} is not a directory!")]
    NotADirectory {
        /// The offending root, as given
        path: PathBuf,
    },

    /// A generated artifact would land outside the output directory
    #[error("Attempt to create typing file outside of declarationDir! {path:?} is not inside {out_dir:?}")]
    PathEscape {
        /// Offending destination
        path: PathBuf,
        /// Declared output directory
        out_dir: PathBuf,
    },

    /// A destination already exists on disk or is claimed twice in one batch
    #[error("Typing file {path:?} already exists! (consider enabling '--overwrite')")]
    AlreadyExists {
        /// Conflicting destination
        path: PathBuf,
    },

    /// No output directory was given and the project configuration has no
    /// `declarationDir`
    #[error("No output directory: pass --out-dir or set compilerOptions.declarationDir")]
    MissingOutDir,

    /// Directory traversal failed (permissions, symlink loops)
    #[error("Failed to walk {root:?}: {source}")]
    Walk {
        /// Root being traversed
        root: PathBuf,
        /// Underlying walkdir error
        #[source]
        source: walkdir::Error,
    },

    /// Invalid exclude pattern
    #[error("Invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        /// Pattern as written
        pattern: String,
        /// Underlying matcher error
        #[source]
        source: ignore::Error,
    },

    /// Tool settings file is unreadable or invalid
    #[error("Invalid settings file {path:?}: {message}")]
    Settings {
        /// Settings file path
        path: PathBuf,
        /// What is wrong with it
        message: String,
    },

    /// Filesystem operation failed while writing declarations
    #[error("Failed to {action} {path:?}: {source}")]
    Io {
        /// What was being attempted (e.g. "write", "create directory")
        action: &'static str,
        /// Path involved
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Project configuration failure carrying the diagnostics that caused it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    /// Configuration file that was being resolved
    pub path: PathBuf,
    /// Diagnostics that were not tolerable
    pub diagnostics: Vec<Diagnostic>,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to parse tsconfig file {:?}", self.path)?;
        for diagnostic in &self.diagnostics {
            write!(f, "\n  {diagnostic}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}
