//! Integration tests for configuration resolution

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::diagnostics::{
    CANNOT_READ_FILE, EXTENDS_CYCLE, EXTENDS_NOT_FOUND, MALFORMED_JSON, REDUNDANT_OPTION,
    UNKNOWN_OPTION,
};
use super::{CompilerOptions, ConfigurationSnapshot, parse_config};

fn write(dir: &Path, rel_path: &str, content: &str) -> PathBuf {
    let path = dir.join(rel_path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_declaration_dir_relative_to_config_file() {
    let tmp = TempDir::new().unwrap();
    let config = write(
        tmp.path(),
        "app/tsconfig.json",
        r#"{
  // generated declarations
  "compilerOptions": {
    "declaration": true,
    "declarationDir": "./types",
  },
}"#,
    );

    let snapshot = parse_config(&config, &CompilerOptions::default()).unwrap();

    assert_eq!(snapshot.config_path, Some(config));
    assert_eq!(
        snapshot.declaration_dir,
        Some(tmp.path().join("app").join("types"))
    );
    assert_eq!(snapshot.options.get_bool("declaration"), Some(true));
}

#[test]
fn test_resolve_without_config_uses_defaults() {
    let tmp = TempDir::new().unwrap();
    let snapshot = ConfigurationSnapshot::resolve(tmp.path());

    // An ancestor of the temp dir could carry a tsconfig.json; only assert
    // on the no-config shape when nothing was found.
    if let Ok(snapshot) = snapshot {
        if snapshot.config_path.is_none() {
            assert!(snapshot.options.is_empty());
            assert!(snapshot.declaration_dir.is_none());
        }
    }
}

#[test]
fn test_resolve_finds_nearest_config() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "tsconfig.json",
        r#"{"compilerOptions": {"declarationDir": "out"}}"#,
    );
    let nested = tmp.path().join("src").join("lib");
    fs::create_dir_all(&nested).unwrap();

    let snapshot = ConfigurationSnapshot::resolve(&nested).unwrap();

    assert_eq!(snapshot.declaration_dir, Some(tmp.path().join("out")));
}

#[test]
fn test_extends_chain_child_overrides_base() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "configs/base.json",
        r#"{
  "compilerOptions": {"strict": false, "target": "es2017", "declarationDir": "../dist/types"},
  "include": ["src/**/*"]
}"#,
    );
    let config = write(
        tmp.path(),
        "tsconfig.json",
        r#"{"extends": "./configs/base", "compilerOptions": {"strict": true}}"#,
    );

    let snapshot = parse_config(&config, &CompilerOptions::default()).unwrap();

    assert_eq!(snapshot.strict(), Some(true));
    assert_eq!(snapshot.options.get_str("target"), Some("es2017"));
    // Inherited path options stay relative to the base file
    assert_eq!(
        snapshot.declaration_dir,
        Some(tmp.path().join("dist").join("types"))
    );
    assert_eq!(snapshot.include, Some(vec!["src/**/*".to_string()]));
}

#[test]
fn test_extends_array_later_entries_win() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.json", r#"{"compilerOptions": {"target": "es5", "strict": true}}"#);
    write(tmp.path(), "b.json", r#"{"compilerOptions": {"target": "esnext"}}"#);
    let config = write(
        tmp.path(),
        "tsconfig.json",
        r#"{"extends": ["./a.json", "./b.json"]}"#,
    );

    let snapshot = parse_config(&config, &CompilerOptions::default()).unwrap();

    assert_eq!(snapshot.options.get_str("target"), Some("esnext"));
    assert_eq!(snapshot.strict(), Some(true));
}

#[test]
fn test_extends_package_from_node_modules() {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "node_modules/@tsconfig/svelte/tsconfig.json",
        r#"{"compilerOptions": {"verbatimModuleSyntax": true}}"#,
    );
    let config = write(
        tmp.path(),
        "tsconfig.json",
        r#"{"extends": "@tsconfig/svelte/tsconfig.json"}"#,
    );

    let snapshot = parse_config(&config, &CompilerOptions::default()).unwrap();

    assert_eq!(snapshot.options.get_bool("verbatimModuleSyntax"), Some(true));
}

#[test]
fn test_base_options_sit_beneath_file_options() {
    let tmp = TempDir::new().unwrap();
    let config = write(
        tmp.path(),
        "tsconfig.json",
        r#"{"compilerOptions": {"strict": true}}"#,
    );
    let base = CompilerOptions::new()
        .with("strict", false)
        .with("target", "es2020");

    let snapshot = parse_config(&config, &base).unwrap();

    assert_eq!(snapshot.strict(), Some(true));
    assert_eq!(snapshot.options.get_str("target"), Some("es2020"));
}

#[test]
fn test_missing_extends_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let config = write(tmp.path(), "tsconfig.json", r#"{"extends": "./nope.json"}"#);

    let err = parse_config(&config, &CompilerOptions::default()).unwrap_err();

    assert_eq!(err.diagnostics.len(), 1);
    assert_eq!(err.diagnostics[0].code, EXTENDS_NOT_FOUND);
    assert!(err.to_string().contains("./nope.json"));
}

#[test]
fn test_extends_cycle_is_an_error() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "a.json", r#"{"extends": "./b.json"}"#);
    write(tmp.path(), "b.json", r#"{"extends": "./a.json"}"#);
    let config = write(tmp.path(), "tsconfig.json", r#"{"extends": "./a.json"}"#);

    let err = parse_config(&config, &CompilerOptions::default()).unwrap_err();

    assert!(err.diagnostics.iter().any(|d| d.code == EXTENDS_CYCLE));
}

#[test]
fn test_malformed_json_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let config = write(tmp.path(), "tsconfig.json", r#"{"compilerOptions": {"#);

    let err = parse_config(&config, &CompilerOptions::default()).unwrap_err();

    assert_eq!(err.diagnostics[0].code, MALFORMED_JSON);
}

#[test]
fn test_unreadable_config_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let config = tmp.path().join("tsconfig.json");

    let err = parse_config(&config, &CompilerOptions::default()).unwrap_err();

    assert_eq!(err.diagnostics[0].code, CANNOT_READ_FILE);
}

#[test]
fn test_unknown_option_in_base_aborts() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "base.json", r#"{"compilerOptions": {"declarationDirectory": "x"}}"#);
    let config = write(tmp.path(), "tsconfig.json", r#"{"extends": "./base.json"}"#);

    let err = parse_config(&config, &CompilerOptions::default()).unwrap_err();

    assert_eq!(err.diagnostics[0].code, UNKNOWN_OPTION);
    assert_eq!(err.diagnostics[0].file, Some(tmp.path().join("base.json")));
}

#[test]
fn test_redundant_option_is_tolerated() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "base.json", r#"{"compilerOptions": {"strict": true}}"#);
    let config = write(
        tmp.path(),
        "tsconfig.json",
        r#"{"extends": "./base.json", "compilerOptions": {"strict": true}}"#,
    );

    let snapshot = parse_config(&config, &CompilerOptions::default()).unwrap();

    assert_eq!(snapshot.strict(), Some(true));
    assert_eq!(snapshot.suppressed.len(), 1);
    assert_eq!(snapshot.suppressed[0].code, REDUNDANT_OPTION);
    assert!(snapshot.suppressed[0].reports_unnecessary);
}

#[test]
fn test_null_in_child_unsets_inherited_option() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "base.json", r#"{"compilerOptions": {"declarationDir": "types"}}"#);
    let config = write(
        tmp.path(),
        "tsconfig.json",
        r#"{"extends": "./base.json", "compilerOptions": {"declarationDir": null}}"#,
    );

    let snapshot = parse_config(&config, &CompilerOptions::default()).unwrap();

    assert_eq!(snapshot.declaration_dir, None);
}

#[test]
fn test_error_paths_render_relative() {
    let tmp = TempDir::new().unwrap();
    let config = write(tmp.path(), "app/tsconfig.json", r#"{"extends": "./gone.json"}"#);

    let err = parse_config(&config, &CompilerOptions::default())
        .unwrap_err()
        .relative_to(tmp.path());

    assert_eq!(err.path, PathBuf::from("app/tsconfig.json"));
    assert_eq!(
        err.diagnostics[0].file,
        Some(PathBuf::from("app/tsconfig.json"))
    );
}

#[test]
fn test_config_with_byte_order_mark() {
    let tmp = TempDir::new().unwrap();
    let config = write(
        tmp.path(),
        "tsconfig.json",
        "\u{feff}{\"compilerOptions\":{\"declarationDir\":\"types\"}}",
    );

    let snapshot = parse_config(&config, &CompilerOptions::default()).unwrap();

    assert_eq!(snapshot.declaration_dir, Some(tmp.path().join("types")));
}
