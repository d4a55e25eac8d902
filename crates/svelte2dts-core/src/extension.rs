//! Extension classification
//!
//! Maps a file path onto an [`ExtType`] given the configured dialect
//! extensions (e.g. `.svelte`). Dialect-qualified compound suffixes such as
//! `Button.svelte.d.ts` are checked before the plain script suffixes, and
//! within each group the order is `.d.ts`, `.ts`, `.tsx`, `.js`, `.jsx`.

use std::path::Path;

use bitflags::bitflags;

bitflags! {
    /// Composable categories carried by an [`ExtType`]
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ExtFlags: u8 {
        /// No known suffix matched
        const UNKNOWN = 1 << 0;
        /// Suffix is qualified by a dialect extension (`.svelte.ts`)
        const DIALECT = 1 << 1;
        /// Script module (`.js`, `.ts`, ...)
        const SCRIPT = 1 << 2;
        /// Typed script (`.ts`, `.tsx`, `.d.ts`)
        const TYPED = 1 << 3;
        /// JSX flavour (`.jsx`, `.tsx`)
        const JSX = 1 << 4;
        /// Declaration file (`.d.ts`)
        const DECLARATION = 1 << 5;
    }
}

/// Discrete classification of a file path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtType {
    /// No recognised suffix
    Unknown,
    /// `<dialect>.js`
    DialectJs,
    /// `<dialect>.ts`
    DialectTs,
    /// `<dialect>.tsx`
    DialectTsx,
    /// `<dialect>.d.ts`
    DialectDts,
    /// `<dialect>.jsx`
    DialectJsx,
    /// `.js`
    Js,
    /// `.ts`
    Ts,
    /// `.tsx`
    Tsx,
    /// `.d.ts`
    Dts,
    /// `.jsx`
    Jsx,
}

/// Plain suffixes in priority order, paired with their plain and dialect tags
const SUFFIXES: [(&str, ExtType, ExtType); 5] = [
    (".d.ts", ExtType::Dts, ExtType::DialectDts),
    (".ts", ExtType::Ts, ExtType::DialectTs),
    (".tsx", ExtType::Tsx, ExtType::DialectTsx),
    (".js", ExtType::Js, ExtType::DialectJs),
    (".jsx", ExtType::Jsx, ExtType::DialectJsx),
];

impl ExtType {
    /// Categories this tag belongs to
    #[must_use]
    pub const fn flags(self) -> ExtFlags {
        let dialect = ExtFlags::DIALECT.bits();
        let script = ExtFlags::SCRIPT.bits();
        let typed = ExtFlags::TYPED.bits() | script;
        let jsx = ExtFlags::JSX.bits();
        let dts = ExtFlags::DECLARATION.bits() | typed;

        let bits = match self {
            Self::Unknown => ExtFlags::UNKNOWN.bits(),
            Self::DialectJs => dialect | script,
            Self::DialectTs => dialect | typed,
            Self::DialectTsx => dialect | typed | jsx,
            Self::DialectDts => dialect | dts,
            Self::DialectJsx => dialect | script | jsx,
            Self::Js => script,
            Self::Ts => typed,
            Self::Tsx => typed | jsx,
            Self::Dts => dts,
            Self::Jsx => script | jsx,
        };
        ExtFlags::from_bits_truncate(bits)
    }

    /// Whether this tag carries every category in `required`
    #[must_use]
    pub const fn has_flags(self, required: ExtFlags) -> bool {
        has_flags(self, required)
    }

    /// Whether this is any kind of declaration file
    #[must_use]
    pub const fn is_declaration(self) -> bool {
        self.has_flags(ExtFlags::DECLARATION)
    }
}

/// Classify `path` against the configured dialect extensions
///
/// The first dialect extension (in configured order) with a matching
/// compound suffix wins. Without a dialect match the plain suffixes are
/// tried, and [`ExtType::Unknown`] is returned if none applies.
#[must_use]
pub fn classify<S: AsRef<str>>(path: &Path, dialect_extensions: &[S]) -> ExtType {
    let Some(name) = path.to_str() else {
        return ExtType::Unknown;
    };

    for ext in dialect_extensions {
        let ext = ext.as_ref();
        for (suffix, _, dialect_tag) in SUFFIXES {
            if ends_with_compound(name, ext, suffix) {
                return dialect_tag;
            }
        }
    }

    SUFFIXES
        .iter()
        .find(|(suffix, _, _)| name.ends_with(suffix))
        .map_or(ExtType::Unknown, |(_, plain_tag, _)| *plain_tag)
}

/// Whether `tag` carries every bit of `required` (`tag & required == required`)
#[must_use]
pub const fn has_flags(tag: ExtType, required: ExtFlags) -> bool {
    tag.flags().contains(required)
}

fn ends_with_compound(name: &str, ext: &str, suffix: &str) -> bool {
    name.strip_suffix(suffix)
        .is_some_and(|stem| stem.ends_with(ext))
}
