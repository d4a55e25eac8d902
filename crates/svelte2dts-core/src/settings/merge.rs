//! Layering settings beneath invocation options
//!
//! # Merging Semantics
//!
//! - **Paths and extension lists**: the settings value is used only when the
//!   invocation left the field unset
//! - **Exclude patterns**: additive, settings patterns first
//! - **Booleans**: OR semantics, a flag enabled in either place is enabled
//! - **strict**: the invocation value wins when present

use super::Settings;
use crate::pipeline::Options;

/// Settings merger
pub struct SettingsMerger;

impl SettingsMerger {
    /// Fill `options` from `settings`
    ///
    /// `options` holds what the invocation gave explicitly; dialect
    /// extensions count as unset when empty.
    pub fn merge_into(options: &mut Options, settings: &Settings) {
        if options.src_dirs.is_empty() {
            options.src_dirs.clone_from(&settings.src_dirs);
        }
        if options.out_dir.is_none() {
            options.out_dir.clone_from(&settings.out_dir);
        }
        if options.svelte_extensions.is_empty() {
            options
                .svelte_extensions
                .clone_from(&settings.svelte_extensions);
        }

        let mut exclude = settings.exclude.clone();
        exclude.append(&mut options.exclude);
        options.exclude = exclude;

        options.run_on_ts |= settings.run_on_ts;
        options.run_on_js |= settings.run_on_js;
        options.auto_generate |= settings.auto_generate;
        options.overwrite |= settings.overwrite;
        options.follow_symlinks |= settings.follow_symlinks;
        options.strict = options.strict.or(settings.strict);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn explicit() -> Options {
        let mut options = Options::new("/work");
        options.svelte_extensions.clear();
        options
    }

    #[test]
    fn test_settings_fill_unset_fields() {
        let settings = Settings {
            src_dirs: vec![PathBuf::from("/work/src")],
            out_dir: Some(PathBuf::from("/work/types")),
            svelte_extensions: vec![".svx".into()],
            auto_generate: true,
            strict: Some(true),
            ..Settings::default()
        };
        let mut options = explicit();

        SettingsMerger::merge_into(&mut options, &settings);

        assert_eq!(options.src_dirs, vec![PathBuf::from("/work/src")]);
        assert_eq!(options.out_dir, Some(PathBuf::from("/work/types")));
        assert_eq!(options.svelte_extensions, vec![".svx"]);
        assert!(options.auto_generate);
        assert_eq!(options.strict, Some(true));
    }

    #[test]
    fn test_invocation_wins() {
        let settings = Settings {
            src_dirs: vec![PathBuf::from("/work/src")],
            out_dir: Some(PathBuf::from("/work/types")),
            strict: Some(true),
            ..Settings::default()
        };
        let mut options = explicit();
        options.src_dirs = vec![PathBuf::from("lib")];
        options.out_dir = Some(PathBuf::from("dist"));
        options.strict = Some(false);

        SettingsMerger::merge_into(&mut options, &settings);

        assert_eq!(options.src_dirs, vec![PathBuf::from("lib")]);
        assert_eq!(options.out_dir, Some(PathBuf::from("dist")));
        assert_eq!(options.strict, Some(false));
    }

    #[test]
    fn test_booleans_or_and_exclude_additive() {
        let settings = Settings {
            run_on_ts: true,
            exclude: vec!["a".into()],
            ..Settings::default()
        };
        let mut options = explicit();
        options.run_on_js = true;
        options.exclude = vec!["b".into()];

        SettingsMerger::merge_into(&mut options, &settings);

        assert!(options.run_on_ts);
        assert!(options.run_on_js);
        assert!(!options.overwrite);
        assert_eq!(options.exclude, vec!["a", "b"]);
    }
}
