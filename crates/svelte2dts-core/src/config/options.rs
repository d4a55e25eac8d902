//! Compiler options: the known option table, value validation and
//! path resolution relative to the declaring configuration file

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::diagnostics::{Diagnostic, UNKNOWN_OPTION, WRONG_OPTION_TYPE};
use crate::paths;

/// Placeholder expanded to the directory of the top-level configuration
const CONFIG_DIR_TEMPLATE: &str = "${configDir}";

/// Expected JSON shape of a compiler option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKind {
    Bool,
    String,
    Number,
    /// Single path, resolved against the declaring file
    Path,
    /// List of paths, each resolved against the declaring file
    PathList,
    StringList,
    Object,
    /// Free-form (e.g. `plugins`)
    Any,
}

impl OptionKind {
    const fn type_name(self) -> &'static str {
        match self {
            Self::Bool => "boolean",
            Self::String | Self::Path => "string",
            Self::Number => "number",
            Self::PathList | Self::StringList => "Array",
            Self::Object => "object",
            Self::Any => "any",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::Bool => value.is_boolean(),
            Self::String | Self::Path => value.is_string(),
            Self::Number => value.is_number(),
            Self::PathList | Self::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Self::Object => value.is_object(),
            Self::Any => true,
        }
    }
}

const BOOL_OPTIONS: &[&str] = &[
    "allowArbitraryExtensions",
    "allowImportingTsExtensions",
    "allowJs",
    "allowSyntheticDefaultImports",
    "allowUmdGlobalAccess",
    "allowUnreachableCode",
    "allowUnusedLabels",
    "alwaysStrict",
    "assumeChangesOnlyAffectDirectDependencies",
    "checkJs",
    "composite",
    "declaration",
    "declarationMap",
    "diagnostics",
    "disableReferencedProjectLoad",
    "disableSizeLimit",
    "disableSolutionSearching",
    "disableSourceOfProjectReferenceRedirect",
    "downlevelIteration",
    "emitBOM",
    "emitDeclarationOnly",
    "emitDecoratorMetadata",
    "erasableSyntaxOnly",
    "esModuleInterop",
    "exactOptionalPropertyTypes",
    "experimentalDecorators",
    "explainFiles",
    "extendedDiagnostics",
    "forceConsistentCasingInFileNames",
    "importHelpers",
    "incremental",
    "inlineSourceMap",
    "inlineSources",
    "isolatedDeclarations",
    "isolatedModules",
    "keyofStringsOnly",
    "libReplacement",
    "listEmittedFiles",
    "listFiles",
    "noCheck",
    "noEmit",
    "noEmitHelpers",
    "noEmitOnError",
    "noErrorTruncation",
    "noFallthroughCasesInSwitch",
    "noImplicitAny",
    "noImplicitOverride",
    "noImplicitReturns",
    "noImplicitThis",
    "noImplicitUseStrict",
    "noLib",
    "noPropertyAccessFromIndexSignature",
    "noResolve",
    "noStrictGenericChecks",
    "noUncheckedIndexedAccess",
    "noUncheckedSideEffectImports",
    "noUnusedLocals",
    "noUnusedParameters",
    "preserveConstEnums",
    "preserveSymlinks",
    "preserveValueImports",
    "pretty",
    "removeComments",
    "resolveJsonModule",
    "resolvePackageJsonExports",
    "resolvePackageJsonImports",
    "rewriteRelativeImportExtensions",
    "skipDefaultLibCheck",
    "skipLibCheck",
    "sourceMap",
    "strict",
    "strictBindCallApply",
    "strictBuiltinIteratorReturn",
    "strictFunctionTypes",
    "strictNullChecks",
    "strictPropertyInitialization",
    "stripInternal",
    "suppressExcessPropertyErrors",
    "suppressImplicitAnyIndexErrors",
    "traceResolution",
    "useDefineForClassFields",
    "useUnknownInCatchVariables",
    "verbatimModuleSyntax",
];

const STRING_OPTIONS: &[&str] = &[
    "charset",
    "ignoreDeprecations",
    "importsNotUsedAsValues",
    "jsx",
    "jsxFactory",
    "jsxFragmentFactory",
    "jsxImportSource",
    "mapRoot",
    "module",
    "moduleDetection",
    "moduleResolution",
    "newLine",
    "reactNamespace",
    "sourceRoot",
    "target",
];

const PATH_OPTIONS: &[&str] = &[
    "baseUrl",
    "declarationDir",
    "generateCpuProfile",
    "generateTrace",
    "out",
    "outDir",
    "outFile",
    "rootDir",
    "tsBuildInfoFile",
];

const PATH_LIST_OPTIONS: &[&str] = &["rootDirs", "typeRoots"];

const STRING_LIST_OPTIONS: &[&str] = &["customConditions", "lib", "moduleSuffixes", "types"];

fn option_kind(name: &str) -> Option<OptionKind> {
    let tables: [(&[&str], OptionKind); 5] = [
        (BOOL_OPTIONS, OptionKind::Bool),
        (STRING_OPTIONS, OptionKind::String),
        (PATH_OPTIONS, OptionKind::Path),
        (PATH_LIST_OPTIONS, OptionKind::PathList),
        (STRING_LIST_OPTIONS, OptionKind::StringList),
    ];

    if let Some((_, kind)) = tables.iter().find(|(names, _)| names.contains(&name)) {
        return Some(*kind);
    }

    match name {
        "maxNodeModuleJsDepth" => Some(OptionKind::Number),
        "paths" => Some(OptionKind::Object),
        "plugins" => Some(OptionKind::Any),
        _ => None,
    }
}

/// Effective compiler options, keyed by their `tsconfig.json` names
///
/// Path-valued options are stored already resolved to absolute paths.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompilerOptions {
    values: BTreeMap<String, Value>,
}

impl CompilerOptions {
    /// Empty option set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Raw value of an option
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Boolean option
    #[must_use]
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// String option
    #[must_use]
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Path option
    #[must_use]
    pub fn get_path(&self, name: &str) -> Option<PathBuf> {
        self.get_str(name).map(PathBuf::from)
    }

    /// `strict`
    #[must_use]
    pub fn strict(&self) -> Option<bool> {
        self.get_bool("strict")
    }

    /// `declarationDir` as stored
    #[must_use]
    pub fn declaration_dir(&self) -> Option<PathBuf> {
        self.get_path("declarationDir")
    }

    /// Iterate over all options in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of options set
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no option is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Overlay `child` on top of `self`; `null` in the child unsets an option
    pub(crate) fn overlay(&mut self, child: Self) {
        for (name, value) in child.values {
            if value.is_null() {
                self.values.remove(&name);
            } else {
                self.values.insert(name, value);
            }
        }
    }

    /// Validate a raw `compilerOptions` object from `file`
    ///
    /// Unknown names and mistyped values become diagnostics and are dropped.
    /// Path options are resolved against `file`'s directory, with
    /// `${configDir}` expanded to `config_dir`.
    pub(crate) fn from_raw(
        raw: Map<String, Value>,
        file: &Path,
        config_dir: &Path,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Self {
        let base_dir = file.parent().unwrap_or_else(|| Path::new(""));
        let mut values = BTreeMap::new();

        for (name, value) in raw {
            let Some(kind) = option_kind(&name) else {
                diagnostics.push(Diagnostic::error(
                    UNKNOWN_OPTION,
                    file,
                    format!("Unknown compiler option '{name}'."),
                ));
                continue;
            };

            if value.is_null() {
                values.insert(name, Value::Null);
                continue;
            }

            if !kind.accepts(&value) {
                diagnostics.push(Diagnostic::error(
                    WRONG_OPTION_TYPE,
                    file,
                    format!(
                        "Compiler option '{name}' requires a value of type {}.",
                        kind.type_name()
                    ),
                ));
                continue;
            }

            let value = match kind {
                OptionKind::Path => resolve_path_value(&value, base_dir, config_dir),
                OptionKind::PathList => Value::Array(
                    value
                        .as_array()
                        .map(|items| {
                            items
                                .iter()
                                .map(|item| resolve_path_value(item, base_dir, config_dir))
                                .collect()
                        })
                        .unwrap_or_default(),
                ),
                _ => value,
            };
            values.insert(name, value);
        }

        Self { values }
    }
}

fn resolve_path_value(value: &Value, base_dir: &Path, config_dir: &Path) -> Value {
    let Some(raw) = value.as_str() else {
        return value.clone();
    };

    let resolved = match raw.strip_prefix(CONFIG_DIR_TEMPLATE) {
        Some(rest) => paths::absolutize(config_dir, Path::new(rest.trim_start_matches(['/', '\\']))),
        None => paths::absolutize(base_dir, Path::new(raw)),
    };
    Value::String(resolved.to_string_lossy().into_owned())
}
