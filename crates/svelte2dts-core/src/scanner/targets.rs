//! Target selection: which walked files are handed to the generator

use std::path::Path;

use ignore::gitignore::{Gitignore, GitignoreBuilder};

use crate::error::{Error, Result};

/// Typed-script suffixes added by `run_on_ts`
pub const TS_EXTENSIONS: [&str; 2] = [".ts", ".tsx"];
/// Script suffixes added by `run_on_js`
pub const JS_EXTENSIONS: [&str; 2] = [".js", ".jsx"];

/// Active target suffixes for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSet {
    extensions: Vec<String>,
}

impl TargetSet {
    /// Dialect extensions, optionally widened with script suffixes
    #[must_use]
    pub fn new<S: AsRef<str>>(dialect_extensions: &[S], run_on_ts: bool, run_on_js: bool) -> Self {
        let mut extensions: Vec<String> = dialect_extensions
            .iter()
            .map(|ext| ext.as_ref().to_string())
            .collect();
        if run_on_ts {
            extensions.extend(TS_EXTENSIONS.iter().map(ToString::to_string));
        }
        if run_on_js {
            extensions.extend(JS_EXTENSIONS.iter().map(ToString::to_string));
        }
        Self { extensions }
    }

    /// Suffixes in the order they were added
    #[must_use]
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Plain suffix match against the whole path
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.to_str() else {
            return false;
        };
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

/// Filter `paths` down to the ones matching `targets`, keeping input order
pub fn select_targets<'a, I, P>(paths: I, targets: &'a TargetSet) -> impl Iterator<Item = P> + 'a
where
    I: IntoIterator<Item = P>,
    I::IntoIter: 'a,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .filter(move |path| targets.matches(path.as_ref()))
}

/// Gitignore-style exclusion, matched against paths relative to their root
pub struct ExcludeMatcher {
    gitignore: Option<Gitignore>,
}

impl ExcludeMatcher {
    /// Matcher that excludes nothing
    #[must_use]
    pub const fn none() -> Self {
        Self { gitignore: None }
    }

    /// Build a matcher from exclude patterns
    ///
    /// # Errors
    ///
    /// Returns [`Error::Pattern`] if a pattern is invalid.
    pub fn with_patterns(patterns: &[String]) -> Result<Self> {
        if patterns.is_empty() {
            return Ok(Self::none());
        }

        let mut builder = GitignoreBuilder::new("");
        for pattern in patterns {
            builder
                .add_line(None, pattern)
                .map_err(|source| Error::Pattern {
                    pattern: pattern.clone(),
                    source,
                })?;
        }

        let gitignore = builder.build().map_err(|source| Error::Pattern {
            pattern: patterns.join(", "),
            source,
        })?;

        Ok(Self {
            gitignore: Some(gitignore),
        })
    }

    /// Whether `path` (below `root`) is excluded
    #[must_use]
    pub fn is_excluded(&self, root: &Path, path: &Path) -> bool {
        let Some(gitignore) = &self.gitignore else {
            return false;
        };
        let Ok(relative) = path.strip_prefix(root) else {
            return false;
        };
        gitignore
            .matched_path_or_any_parents(relative, false)
            .is_ignore()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_target_set_default_is_dialect_only() {
        let targets = TargetSet::new(&[".svelte"], false, false);

        assert!(targets.matches(Path::new("/p/Button.svelte")));
        assert!(!targets.matches(Path::new("/p/index.ts")));
        assert!(!targets.matches(Path::new("/p/index.js")));
    }

    #[test]
    fn test_target_set_toggles_are_independent() {
        let ts_only = TargetSet::new(&[".svelte"], true, false);
        assert!(ts_only.matches(Path::new("a.ts")));
        assert!(ts_only.matches(Path::new("a.tsx")));
        assert!(!ts_only.matches(Path::new("a.js")));

        let js_only = TargetSet::new(&[".svelte"], false, true);
        assert!(js_only.matches(Path::new("a.jsx")));
        assert!(!js_only.matches(Path::new("a.ts")));

        assert_eq!(
            TargetSet::new(&[".svelte"], true, true).extensions(),
            &[".svelte", ".ts", ".tsx", ".js", ".jsx"]
        );
    }

    #[test]
    fn test_suffix_match_not_extension_parsing() {
        // Suffix matching: `.d.ts` is selected by `.ts`
        let targets = TargetSet::new(&[".svelte"], true, false);
        assert!(targets.matches(Path::new("Button.svelte.d.ts")));
        // and a bare name ending in the suffix text also qualifies
        assert!(TargetSet::new(&["svelte"], false, false).matches(Path::new("notsvelte")));
    }

    #[test]
    fn test_select_targets_preserves_order() {
        let targets = TargetSet::new(&[".svelte"], false, false);
        let paths = vec![
            PathBuf::from("z/B.svelte"),
            PathBuf::from("README.md"),
            PathBuf::from("a/A.svelte"),
        ];

        let selected: Vec<_> = select_targets(paths, &targets).collect();

        assert_eq!(
            selected,
            vec![PathBuf::from("z/B.svelte"), PathBuf::from("a/A.svelte")]
        );
    }

    #[test]
    fn test_exclude_matcher() {
        let matcher =
            ExcludeMatcher::with_patterns(&["node_modules".to_string(), "**/*.test.svelte".to_string()])
                .unwrap();
        let root = Path::new("/repo/src");

        assert!(matcher.is_excluded(root, Path::new("/repo/src/node_modules/pkg/A.svelte")));
        assert!(matcher.is_excluded(root, Path::new("/repo/src/lib/A.test.svelte")));
        assert!(!matcher.is_excluded(root, Path::new("/repo/src/lib/A.svelte")));
    }

    #[test]
    fn test_no_patterns_excludes_nothing() {
        let matcher = ExcludeMatcher::with_patterns(&[]).unwrap();
        assert!(!matcher.is_excluded(Path::new("/r"), Path::new("/r/node_modules/x.svelte")));
    }
}
