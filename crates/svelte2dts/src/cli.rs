use clap::Parser;
use std::path::PathBuf;

/// Svelte component declaration generator
///
/// Walks the source directories for Svelte components and writes a `.d.ts`
/// declaration for each of them into the output directory. Existing files are
/// never replaced unless --overwrite is given, and nothing is ever written
/// outside the output directory.
#[derive(Parser, Debug)]
#[command(name = "svelte2dts")]
#[command(about, long_about = None, version)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Source directory to scan (repeatable, scanned in the order given)
    #[arg(short = 's', long = "src-dir", value_name = "DIR")]
    pub src_dirs: Vec<PathBuf>,

    /// Output directory (default: compilerOptions.declarationDir)
    #[arg(short, long, value_name = "DIR", env = "SVELTE2DTS_OUT_DIR")]
    pub out_dir: Option<PathBuf>,

    /// Component file extension (repeatable, default: .svelte)
    #[arg(long = "svelte-extension", value_name = "EXT")]
    pub svelte_extensions: Vec<String>,

    /// Preview writes without touching the filesystem
    #[arg(long, env = "SVELTE2DTS_DRY_RUN")]
    pub dry_run: bool,

    /// Replace existing declaration files
    #[arg(long, env = "SVELTE2DTS_OVERWRITE")]
    pub overwrite: bool,

    /// Generate declarations for components without a hand-written one
    #[arg(long, env = "SVELTE2DTS_AUTO_GENERATE")]
    pub auto_generate: bool,

    /// Also select .ts and .tsx files
    #[arg(long, env = "SVELTE2DTS_RUN_ON_TS")]
    pub run_on_ts: bool,

    /// Also select .js and .jsx files
    #[arg(long, env = "SVELTE2DTS_RUN_ON_JS")]
    pub run_on_js: bool,

    /// Emit strict declarations; `--strict=false` overrides a strict tsconfig
    /// (default: compilerOptions.strict)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        env = "SVELTE2DTS_STRICT"
    )]
    pub strict: Option<bool>,

    /// Gitignore-style pattern excluding source files (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub exclude: Vec<String>,

    /// Follow symbolic links while scanning
    #[arg(long, env = "SVELTE2DTS_FOLLOW_SYMLINKS")]
    pub follow_symlinks: bool,

    /// Use this tsconfig.json instead of the nearest one
    #[arg(short, long, value_name = "PATH", env = "SVELTE2DTS_PROJECT")]
    pub project: Option<PathBuf>,

    /// Use specific settings file
    #[arg(
        long,
        value_name = "PATH",
        env = "SVELTE2DTS_SETTINGS",
        conflicts_with = "no_settings"
    )]
    pub settings: Option<PathBuf>,

    /// Ignore .svelte2dts.toml settings files
    #[arg(long, conflicts_with = "settings")]
    pub no_settings: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
