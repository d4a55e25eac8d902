use std::path::Path;

use anyhow::Context;
use clap::CommandFactory;
use clap::error::ErrorKind;
use svelte2dts_core::config::{CompilerOptions, parse_config};
use svelte2dts_core::emit::EmitReporter;
use svelte2dts_core::paths;
use svelte2dts_core::pipeline::DEFAULT_SVELTE_EXTENSIONS;
use svelte2dts_core::settings::{SettingsMerger, SettingsValidator};
use svelte2dts_core::{ConfigurationSnapshot, Options, Pipeline, Settings, ShimGenerator};

use crate::cli::Cli;

pub struct Generate;

impl Generate {
    pub fn execute(cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir().context("Failed to determine working directory")?;

        if let Err(message) = SettingsValidator::validate_extensions(&cli.svelte_extensions) {
            usage_error(ErrorKind::InvalidValue, &message);
        }

        let mut options = Self::options_from_flags(cli, &cwd);
        if let Some(settings) = Self::load_settings(cli, &cwd)? {
            SettingsMerger::merge_into(&mut options, &settings);
        }
        if options.svelte_extensions.is_empty() {
            options.svelte_extensions = DEFAULT_SVELTE_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect();
        }
        if options.src_dirs.is_empty() {
            usage_error(
                ErrorKind::MissingRequiredArgument,
                "at least one --src-dir is required (or src_dirs in .svelte2dts.toml)",
            );
        }

        if cli.verbose {
            println!("Source directories: {:?}", options.src_dirs);
            println!("Extensions: {:?}", options.svelte_extensions);
            println!("Dry run: {}", options.dry_run);
        }

        options.check_src_dirs()?;
        let config = Self::load_config(cli, &cwd)?;

        let generator = ShimGenerator::new();
        let pipeline = Pipeline::new(options, &config, &generator);
        if pipeline.out_dir().is_err() {
            usage_error(
                ErrorKind::MissingRequiredArgument,
                "no output directory: pass --out-dir or set compilerOptions.declarationDir",
            );
        }

        let report = pipeline.run()?;

        let reporter = EmitReporter::new(cwd);
        for line in reporter.write_lines(&report) {
            println!("{line}");
        }
        for line in reporter.failure_lines(&report) {
            eprintln!("{line}");
        }
        if cli.verbose {
            println!("{}", reporter.summary(&report));
        }

        Ok(())
    }

    fn options_from_flags(cli: &Cli, cwd: &Path) -> Options {
        let mut options = Options::new(cwd);
        options.src_dirs.clone_from(&cli.src_dirs);
        options.out_dir.clone_from(&cli.out_dir);
        options.svelte_extensions.clone_from(&cli.svelte_extensions);
        options.dry_run = cli.dry_run;
        options.overwrite = cli.overwrite;
        options.auto_generate = cli.auto_generate;
        options.run_on_ts = cli.run_on_ts;
        options.run_on_js = cli.run_on_js;
        options.strict = cli.strict;
        options.exclude.clone_from(&cli.exclude);
        options.follow_symlinks = cli.follow_symlinks;
        options
    }

    fn load_settings(cli: &Cli, cwd: &Path) -> anyhow::Result<Option<Settings>> {
        if cli.no_settings {
            return Ok(None);
        }

        let path = match &cli.settings {
            Some(path) => Some(paths::absolutize(cwd, path)),
            None => Settings::discover(cwd),
        };

        path.map(|path| Settings::load(&path).map_err(|err| relative_settings_error(cwd, err)))
            .transpose()
            .context("Failed to load settings")
    }

    fn load_config(cli: &Cli, cwd: &Path) -> anyhow::Result<ConfigurationSnapshot> {
        let snapshot = match &cli.project {
            Some(path) => parse_config(&paths::absolutize(cwd, path), &CompilerOptions::default()),
            None => ConfigurationSnapshot::resolve(cwd),
        };
        let snapshot = snapshot.map_err(|err| err.relative_to(cwd))?;

        if cli.verbose {
            match &snapshot.config_path {
                Some(path) => println!(
                    "Project configuration: {}",
                    paths::relative_to(cwd, path).display()
                ),
                None => println!("Project configuration: none"),
            }
        }
        Ok(snapshot)
    }
}

fn relative_settings_error(cwd: &Path, err: svelte2dts_core::Error) -> svelte2dts_core::Error {
    match err {
        svelte2dts_core::Error::Settings { path, message } => svelte2dts_core::Error::Settings {
            path: paths::relative_to(cwd, &path),
            message,
        },
        other => other,
    }
}

fn usage_error(kind: ErrorKind, message: &str) -> ! {
    Cli::command().error(kind, message).exit()
}
