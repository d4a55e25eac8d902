//! One discovery-then-write pass
//!
//! [`Pipeline::run`] checks the source roots, walks them, hands the selected
//! targets to a [`DeclarationGenerator`], validates the whole candidate batch
//! and only then writes. Everything it needs arrives through [`Options`] and
//! the [`ConfigurationSnapshot`]; nothing is read from ambient process state.

use std::path::{Path, PathBuf};

use crate::config::ConfigurationSnapshot;
use crate::emit::{WriteExecutor, WritePlanner, WriteReport};
use crate::error::{Error, Result};
use crate::generator::{DeclarationGenerator, GenerationRequest};
use crate::paths;
use crate::scanner::{ExcludeMatcher, Scanner, TargetSet};

/// Dialect extensions used when none are configured
pub const DEFAULT_SVELTE_EXTENSIONS: [&str; 1] = [".svelte"];

/// Invocation options for one run
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Directory relative paths resolve against
    pub cwd: PathBuf,
    /// Source roots, walked in this order
    pub src_dirs: Vec<PathBuf>,
    /// Output root; falls back to the configuration's `declarationDir`
    pub out_dir: Option<PathBuf>,
    /// Dialect extensions driving classification
    pub svelte_extensions: Vec<String>,
    /// Validate and report, but write nothing
    pub dry_run: bool,
    /// Allow replacing existing or duplicate destinations
    pub overwrite: bool,
    /// Synthesize declarations for targets without hand-authored ones
    pub auto_generate: bool,
    /// Also select `.ts`/`.tsx` files
    pub run_on_ts: bool,
    /// Also select `.js`/`.jsx` files
    pub run_on_js: bool,
    /// Strict typing; falls back to the configuration's `strict`
    pub strict: Option<bool>,
    /// Gitignore-style patterns removing files from selection
    pub exclude: Vec<String>,
    /// Follow symbolic links while walking
    pub follow_symlinks: bool,
}

impl Options {
    /// Defaults for a run rooted at `cwd`
    #[must_use]
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            cwd: cwd.into(),
            src_dirs: Vec::new(),
            out_dir: None,
            svelte_extensions: DEFAULT_SVELTE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
            dry_run: false,
            overwrite: false,
            auto_generate: false,
            run_on_ts: false,
            run_on_js: false,
            strict: None,
            exclude: Vec::new(),
            follow_symlinks: false,
        }
    }

    /// Absolute source roots
    #[must_use]
    pub fn src_dirs(&self) -> Vec<PathBuf> {
        self.src_dirs
            .iter()
            .map(|dir| paths::absolutize(&self.cwd, dir))
            .collect()
    }

    /// Fail for the first source root that does not exist
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] naming the root relative to `cwd`.
    pub fn check_src_dirs(&self) -> Result<()> {
        Scanner::check_roots(&self.src_dirs()).map_err(|err| relative_error(&self.cwd, err))
    }
}

/// Discovery, generation and conflict-safe writing for one invocation
pub struct Pipeline<'a> {
    options: Options,
    config: &'a ConfigurationSnapshot,
    generator: &'a dyn DeclarationGenerator,
}

impl<'a> Pipeline<'a> {
    /// Assemble a run from its options, resolved configuration and generator
    #[must_use]
    pub fn new(
        options: Options,
        config: &'a ConfigurationSnapshot,
        generator: &'a dyn DeclarationGenerator,
    ) -> Self {
        Self {
            options,
            config,
            generator,
        }
    }

    /// Options in effect
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// Absolute output directory
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingOutDir`] when neither the options nor the
    /// configuration name one.
    pub fn out_dir(&self) -> Result<PathBuf> {
        self.options
            .out_dir
            .as_deref()
            .or(self.config.declaration_dir.as_deref())
            .map(|dir| paths::absolutize(&self.options.cwd, dir))
            .ok_or(Error::MissingOutDir)
    }

    /// Effective strictness
    #[must_use]
    pub fn strict(&self) -> bool {
        self.options
            .strict
            .or_else(|| self.config.strict())
            .unwrap_or(false)
    }

    /// Run the pass
    ///
    /// # Errors
    ///
    /// - [`Error::DirectoryNotFound`] if a source root is missing, before any
    ///   traversal happens
    /// - [`Error::MissingOutDir`] if no output directory is known
    /// - [`Error::Walk`] or [`Error::Pattern`] from discovery
    /// - [`Error::PathEscape`] or [`Error::AlreadyExists`] from validation,
    ///   in which case nothing is written
    /// - [`Error::Io`] if a write fails
    pub fn run(&self) -> Result<WriteReport> {
        let options = &self.options;
        let roots = options.src_dirs();

        options.check_src_dirs()?;
        let out_dir = self.out_dir()?;
        let strict = self.strict();

        let scanner = Scanner::new(
            TargetSet::new(&options.svelte_extensions, options.run_on_ts, options.run_on_js),
            ExcludeMatcher::with_patterns(&options.exclude)?,
            options.follow_symlinks,
        );
        tracing::debug!(
            roots = roots.len(),
            out_dir = %out_dir.display(),
            extensions = ?scanner.targets().extensions(),
            "scanning source roots"
        );
        let targets = scanner
            .scan(&roots)
            .map_err(|err| relative_error(&options.cwd, err))?;

        let auto_generate = options.auto_generate;
        let predicate = |path: &Path| auto_generate && scanner.is_target(path);
        let request = GenerationRequest {
            targets: &targets,
            dialect_extensions: &options.svelte_extensions,
            src_dirs: &roots,
            out_dir: &out_dir,
            strict,
            auto_generate: &predicate,
        };
        let output = self.generator.generate(&request);
        tracing::debug!(
            targets = targets.len(),
            candidates = output.extra_files.len(),
            "generator finished"
        );

        let plan = WritePlanner::new(options.cwd.clone(), out_dir, options.overwrite)
            .plan(output.extra_files)?;

        WriteExecutor::new(options.dry_run).apply(plan)
    }
}

fn relative_error(cwd: &Path, err: Error) -> Error {
    match err {
        Error::DirectoryNotFound { path } => Error::DirectoryNotFound {
            path: paths::relative_to(cwd, &path),
        },
        Error::NotADirectory { path } => Error::NotADirectory {
            path: paths::relative_to(cwd, &path),
        },
        Error::Walk { root, source } => Error::Walk {
            root: paths::relative_to(cwd, &root),
            source,
        },
        other => other,
    }
}
