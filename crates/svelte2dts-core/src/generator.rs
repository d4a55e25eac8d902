//! Declaration generator interface
//!
//! The pipeline never synthesizes declaration content itself. It hands the
//! selected targets to a [`DeclarationGenerator`] and receives candidate
//! artifacts back. Generators are pure: they must not touch the filesystem.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::extension::{ExtType, classify};

/// Everything a generator gets to see for one run
pub struct GenerationRequest<'a> {
    /// Selected target files, in discovery order
    pub targets: &'a [PathBuf],
    /// Dialect extensions (e.g. `.svelte`)
    pub dialect_extensions: &'a [String],
    /// Absolute source roots, in the order given
    pub src_dirs: &'a [PathBuf],
    /// Absolute output directory
    pub out_dir: &'a Path,
    /// Strict typing requested
    pub strict: bool,
    /// Whether a component's declaration should be synthesized rather than
    /// left to a hand-authored counterpart
    pub auto_generate: &'a dyn Fn(&Path) -> bool,
}

/// One candidate artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDeclaration {
    /// Intended destination, before containment validation
    pub virtual_source_path: PathBuf,
    /// Declaration text; `None` when generation failed for this target
    pub code: Option<String>,
    /// Component the artifact was generated from, if known
    pub source: Option<PathBuf>,
}

/// Generator result
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationOutput {
    /// Candidate artifacts
    pub extra_files: Vec<GeneratedDeclaration>,
}

/// External collaborator that turns targets into declaration artifacts
pub trait DeclarationGenerator {
    /// Produce candidate artifacts for `request`
    fn generate(&self, request: &GenerationRequest<'_>) -> GenerationOutput;
}

impl<F> DeclarationGenerator for F
where
    F: Fn(&GenerationRequest<'_>) -> GenerationOutput,
{
    fn generate(&self, request: &GenerationRequest<'_>) -> GenerationOutput {
        self(request)
    }
}

/// Built-in generator emitting permissive component declarations
///
/// For every dialect component that the auto-generate predicate accepts and
/// that has no hand-authored `<component>.d.ts` among the targets, it emits
/// `<out_dir>/<path below its source root>.d.ts` declaring a component class
/// whose props, events and slots are open records. Script targets are left
/// alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShimGenerator;

impl ShimGenerator {
    /// Create the generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn declaration_for(
        request: &GenerationRequest<'_>,
        component: &Path,
        ext: &str,
    ) -> GeneratedDeclaration {
        let relative = request
            .src_dirs
            .iter()
            .filter_map(|dir| component.strip_prefix(dir).ok())
            .min_by_key(|rel| rel.components().count())
            .map_or_else(
                || PathBuf::from(component.file_name().unwrap_or_default()),
                Path::to_path_buf,
            );

        let code = component
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.strip_suffix(ext))
            .map(to_pascal_case)
            .filter(|name| !name.is_empty())
            .map(|name| render_component(&name, request.strict));

        GeneratedDeclaration {
            virtual_source_path: request.out_dir.join(with_suffix(&relative, ".d.ts")),
            code,
            source: Some(component.to_path_buf()),
        }
    }
}

impl DeclarationGenerator for ShimGenerator {
    fn generate(&self, request: &GenerationRequest<'_>) -> GenerationOutput {
        let mut extra_files = Vec::new();
        let hand_authored: HashSet<&PathBuf> = request
            .targets
            .iter()
            .filter(|target| {
                classify(target, request.dialect_extensions) == ExtType::DialectDts
            })
            .collect();

        for target in request.targets {
            let Some(name) = target.to_str() else {
                continue;
            };
            let Some(ext) = request
                .dialect_extensions
                .iter()
                .find(|ext| name.ends_with(ext.as_str()))
            else {
                continue;
            };

            if hand_authored.contains(&with_suffix(target, ".d.ts")) {
                tracing::debug!(component = %target.display(), "hand-authored declaration present");
                continue;
            }

            if !(request.auto_generate)(target) {
                continue;
            }

            extra_files.push(Self::declaration_for(request, target, ext));
        }

        GenerationOutput { extra_files }
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

/// Convert a file stem to a PascalCase identifier (e.g. "date-picker" -> "DatePicker")
fn to_pascal_case(stem: &str) -> String {
    let mut name: String = stem
        .split(|c: char| !c.is_alphanumeric())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().chain(chars).collect(),
            }
        })
        .collect();

    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}

fn render_component(name: &str, strict: bool) -> String {
    let open = if strict { "unknown" } else { "any" };
    format!(
        "import {{ SvelteComponentTyped }} from 'svelte';\n\
         \n\
         export type {name}Props = Record<string, {open}>;\n\
         export type {name}Events = Record<string, {open}>;\n\
         export type {name}Slots = Record<string, {open}>;\n\
         \n\
         export default class {name} extends SvelteComponentTyped<{name}Props, {name}Events, {name}Slots> {{}}\n"
    )
}
