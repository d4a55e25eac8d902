//! # svelte2dts-core
//!
//! Core library for generating TypeScript declaration files for Svelte
//! components.
//!
//! The pipeline discovers component sources under a set of root
//! directories, resolves the nearest `tsconfig.json` (following `extends`),
//! hands the selected targets to a [`DeclarationGenerator`], and writes the
//! resulting `.d.ts` artifacts into the declared output directory without
//! touching anything outside of it.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;

/// Extension classification for dialect and script files
pub mod extension;

/// Project configuration (`tsconfig.json`) discovery and parsing
pub mod config;

/// Source tree walking and target selection
pub mod scanner;

/// Declaration generator interface and the built-in shim generator
pub mod generator;

/// Conflict-safe writing of generated declarations
pub mod emit;

/// Single-pass orchestration of discovery, generation and writing
pub mod pipeline;

/// Tool settings file (`.svelte2dts.toml`)
pub mod settings;

/// Lexical path helpers
pub mod paths;

pub use config::{ConfigurationSnapshot, Diagnostic, DiagnosticCategory};
pub use emit::{WriteReport, WriteExecutor, WritePlanner};
pub use error::{ConfigError, Error, Result};
pub use extension::{ExtFlags, ExtType};
pub use generator::{
    DeclarationGenerator, GeneratedDeclaration, GenerationOutput, GenerationRequest,
    ShimGenerator,
};
pub use pipeline::{Options, Pipeline};
pub use settings::Settings;
