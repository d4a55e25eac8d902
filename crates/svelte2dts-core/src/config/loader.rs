//! Loading a configuration file together with its `extends` chain

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::diagnostics::{
    CANNOT_READ_FILE, Diagnostic, DiagnosticCategory, EXTENDS_CYCLE, EXTENDS_NOT_FOUND,
    MALFORMED_JSON, REDUNDANT_OPTION, ROOT_NOT_OBJECT, WRONG_OPTION_TYPE,
};
use super::jsonc;
use super::options::CompilerOptions;
use crate::paths;

/// A configuration file merged with everything it extends
#[derive(Debug, Clone, Default)]
pub(crate) struct LoadedConfig {
    pub options: CompilerOptions,
    pub include: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub files: Option<Vec<String>>,
}

impl LoadedConfig {
    /// Overlay `child` on top of `self`; lists are replaced wholesale
    fn merge(&mut self, child: Self) {
        self.options.overlay(child.options);
        if child.include.is_some() {
            self.include = child.include;
        }
        if child.exclude.is_some() {
            self.exclude = child.exclude;
        }
        if child.files.is_some() {
            self.files = child.files;
        }
    }
}

/// Recursive loader that accumulates diagnostics instead of failing early
pub(crate) struct ConfigLoader {
    /// Directory of the top-level file, substituted for `${configDir}`
    config_dir: PathBuf,
    /// Canonical paths currently being loaded, for cycle detection
    stack: Vec<PathBuf>,
    diagnostics: Vec<Diagnostic>,
}

impl ConfigLoader {
    pub fn new(top_level: &Path) -> Self {
        Self {
            config_dir: top_level.parent().map(Path::to_path_buf).unwrap_or_default(),
            stack: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Load `path` and its bases; `None` when the file itself is unusable
    pub fn load(&mut self, path: &Path) -> Option<LoadedConfig> {
        let canonical = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        if self.stack.contains(&canonical) {
            self.diagnostics.push(Diagnostic::error(
                EXTENDS_CYCLE,
                path,
                format!(
                    "Circularity detected while resolving configuration: {}",
                    self.cycle_description(&canonical)
                ),
            ));
            return None;
        }

        let mut root = self.read_object(path)?;

        self.stack.push(canonical);
        let extends = self.take_extends(&mut root, path);
        let mut merged = LoadedConfig::default();
        for spec in &extends {
            match resolve_extends(path, spec) {
                Some(base_path) => {
                    tracing::debug!(from = %path.display(), base = %base_path.display(), "following extends");
                    if let Some(base) = self.load(&base_path) {
                        merged.merge(base);
                    }
                }
                None => self.diagnostics.push(Diagnostic::error(
                    EXTENDS_NOT_FOUND,
                    path,
                    format!("File '{spec}' not found."),
                )),
            }
        }
        self.stack.pop();

        let options = match root.remove("compilerOptions") {
            Some(Value::Object(raw)) => {
                CompilerOptions::from_raw(raw, path, &self.config_dir, &mut self.diagnostics)
            }
            Some(Value::Null) | None => CompilerOptions::default(),
            Some(_) => {
                self.diagnostics.push(Diagnostic::error(
                    WRONG_OPTION_TYPE,
                    path,
                    "Compiler option 'compilerOptions' requires a value of type object.",
                ));
                CompilerOptions::default()
            }
        };

        if !extends.is_empty() {
            self.report_redundant(&merged.options, &options, path);
        }

        let child = LoadedConfig {
            options,
            include: self.take_string_list(&mut root, "include", path),
            exclude: self.take_string_list(&mut root, "exclude", path),
            files: self.take_string_list(&mut root, "files", path),
        };
        merged.merge(child);

        Some(merged)
    }

    fn read_object(&mut self, path: &Path) -> Option<Map<String, Value>> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) => {
                self.diagnostics.push(Diagnostic::error(
                    CANNOT_READ_FILE,
                    path,
                    format!("Cannot read file '{}': {err}.", path.display()),
                ));
                return None;
            }
        };

        match serde_json::from_str::<Value>(&jsonc::to_strict_json(&source)) {
            Ok(Value::Object(root)) => Some(root),
            Ok(_) => {
                self.diagnostics.push(Diagnostic::error(
                    ROOT_NOT_OBJECT,
                    path,
                    "The root value of a 'tsconfig.json' file must be an object.",
                ));
                None
            }
            Err(err) => {
                self.diagnostics.push(Diagnostic::error(
                    MALFORMED_JSON,
                    path,
                    format!("Invalid JSON: {err}"),
                ));
                None
            }
        }
    }

    fn take_extends(&mut self, root: &mut Map<String, Value>, path: &Path) -> Vec<String> {
        match root.remove("extends") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::String(spec)) => vec![spec],
            Some(Value::Array(items)) if items.iter().all(Value::is_string) => items
                .into_iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect(),
            Some(_) => {
                self.diagnostics.push(Diagnostic::error(
                    WRONG_OPTION_TYPE,
                    path,
                    "Compiler option 'extends' requires a value of type string or Array.",
                ));
                Vec::new()
            }
        }
    }

    fn take_string_list(
        &mut self,
        root: &mut Map<String, Value>,
        key: &str,
        path: &Path,
    ) -> Option<Vec<String>> {
        match root.remove(key)? {
            Value::Array(items) if items.iter().all(Value::is_string) => Some(
                items
                    .into_iter()
                    .filter_map(|item| item.as_str().map(str::to_owned))
                    .collect(),
            ),
            _ => {
                self.diagnostics.push(Diagnostic::error(
                    WRONG_OPTION_TYPE,
                    path,
                    format!("Compiler option '{key}' requires a value of type Array."),
                ));
                None
            }
        }
    }

    fn report_redundant(&mut self, base: &CompilerOptions, child: &CompilerOptions, path: &Path) {
        for (name, value) in child.iter() {
            if base.get(name) == Some(value) {
                self.diagnostics.push(
                    Diagnostic::new(
                        REDUNDANT_OPTION,
                        DiagnosticCategory::Suggestion,
                        format!("Option '{name}' repeats the value inherited from its base configuration."),
                    )
                    .in_file(path)
                    .unnecessary(),
                );
            }
        }
    }

    fn cycle_description(&self, repeated: &Path) -> String {
        self.stack
            .iter()
            .skip_while(|p| p.as_path() != repeated)
            .map(|p| p.display().to_string())
            .chain(std::iter::once(repeated.display().to_string()))
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

/// Resolve an `extends` specifier relative to the file that declares it
pub(crate) fn resolve_extends(from: &Path, spec: &str) -> Option<PathBuf> {
    let dir = from.parent().unwrap_or_else(|| Path::new(""));
    let spec_path = Path::new(spec);

    let is_relative = spec.starts_with("./")
        || spec.starts_with("../")
        || spec.starts_with(".\\")
        || spec.starts_with("..\\")
        || spec == "."
        || spec == "..";

    if is_relative || spec_path.is_absolute() {
        let candidate = paths::absolutize(dir, spec_path);
        return first_file([candidate.clone(), with_json_suffix(&candidate)]);
    }

    dir.ancestors().find_map(|ancestor| {
        let candidate = ancestor.join("node_modules").join(spec_path);
        first_file([
            candidate.clone(),
            with_json_suffix(&candidate),
            candidate.join("tsconfig.json"),
        ])
    })
}

fn with_json_suffix(path: &Path) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(".json");
    PathBuf::from(raw)
}

fn first_file<const N: usize>(candidates: [PathBuf; N]) -> Option<PathBuf> {
    candidates.into_iter().find(|candidate| candidate.is_file())
}
