//! Tool settings file
//!
//! An optional `.svelte2dts.toml` stores invocation defaults so a project
//! does not have to repeat its flags:
//!
//! ```toml
//! src_dirs = ["src/lib"]
//! out_dir = "types"
//! auto_generate = true
//! exclude = ["**/*.test.svelte"]
//! ```
//!
//! Relative paths in the file resolve against the directory containing it.

mod merge;
mod validation;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use merge::SettingsMerger;
pub use validation::SettingsValidator;

use crate::config::find_up;
use crate::error::{Error, Result};
use crate::paths;

/// Settings file name, looked up from the working directory upwards
pub const SETTINGS_FILE_NAME: &str = ".svelte2dts.toml";

/// Contents of a settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// Source roots
    #[serde(default)]
    pub src_dirs: Vec<PathBuf>,

    /// Output root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,

    /// Dialect extensions
    #[serde(default)]
    pub svelte_extensions: Vec<String>,

    /// Also select `.ts`/`.tsx` files
    #[serde(default)]
    pub run_on_ts: bool,

    /// Also select `.js`/`.jsx` files
    #[serde(default)]
    pub run_on_js: bool,

    /// Synthesize missing declarations
    #[serde(default)]
    pub auto_generate: bool,

    /// Allow replacing existing declarations
    #[serde(default)]
    pub overwrite: bool,

    /// Strict typing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict: Option<bool>,

    /// Gitignore-style exclude patterns
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Follow symbolic links while walking
    #[serde(default)]
    pub follow_symlinks: bool,
}

impl Settings {
    /// Nearest settings file from `start_dir` upwards
    #[must_use]
    pub fn discover(start_dir: &Path) -> Option<PathBuf> {
        find_up(start_dir, SETTINGS_FILE_NAME)
    }

    /// Read, parse and validate the settings file at `path`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Settings`] if the file cannot be read, is not valid
    /// TOML, has unknown keys or fails validation.
    pub fn load(path: &Path) -> Result<Self> {
        let invalid = |message: String| Error::Settings {
            path: path.to_path_buf(),
            message,
        };

        let content = fs::read_to_string(path).map_err(|err| invalid(err.to_string()))?;
        let mut settings: Self = toml::from_str(&content).map_err(|err| invalid(err.to_string()))?;
        SettingsValidator::validate(&settings).map_err(invalid)?;

        let base = path.parent().unwrap_or_else(|| Path::new(""));
        settings.src_dirs = settings
            .src_dirs
            .iter()
            .map(|dir| paths::absolutize(base, dir))
            .collect();
        settings.out_dir = settings.out_dir.map(|dir| paths::absolutize(base, &dir));

        tracing::debug!(path = %path.display(), "loaded settings file");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_resolves_paths_against_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SETTINGS_FILE_NAME);
        fs::write(
            &path,
            r#"
src_dirs = ["src/lib", "/abs/components"]
out_dir = "types"
auto_generate = true
strict = false
exclude = ["**/*.stories.svelte"]
"#,
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();

        assert_eq!(
            settings.src_dirs,
            vec![tmp.path().join("src/lib"), PathBuf::from("/abs/components")]
        );
        assert_eq!(settings.out_dir, Some(tmp.path().join("types")));
        assert!(settings.auto_generate);
        assert!(!settings.run_on_ts);
        assert_eq!(settings.strict, Some(false));
        assert_eq!(settings.exclude, vec!["**/*.stories.svelte"]);
    }

    #[test]
    fn test_discover_from_nested_dir() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(tmp.path().join(SETTINGS_FILE_NAME), "").unwrap();

        assert_eq!(
            Settings::discover(&nested),
            Some(tmp.path().join(SETTINGS_FILE_NAME))
        );
    }

    #[test]
    fn test_empty_file_is_default() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "").unwrap();

        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "outdir = \"types\"\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
    }

    #[test]
    fn test_invalid_extension_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(SETTINGS_FILE_NAME);
        fs::write(&path, "svelte_extensions = [\"svelte\"]\n").unwrap();

        let err = Settings::load(&path).unwrap_err();
        assert!(err.to_string().contains("must start with '.'"));
    }

    #[test]
    fn test_missing_file() {
        let tmp = TempDir::new().unwrap();

        let err = Settings::load(&tmp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
    }
}
