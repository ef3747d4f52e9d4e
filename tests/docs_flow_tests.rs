//! Integration tests for the docs flow.

use apexbuild::services::docs::build_docs_command;
use apexbuild::services::validation::validate_docs;
use apexbuild::{DocsConfig, OutputFormat, ToolError};
use camino::Utf8PathBuf;
use std::fs;
use tempfile::TempDir;

fn docs_setup() -> (TempDir, DocsConfig) {
    let temp_dir = TempDir::new().unwrap();
    let base = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    for sub in ["home", "src/app", "src/db", "src/db/gen", "out", "project"] {
        fs::create_dir_all(base.join(sub)).unwrap();
    }
    let config = DocsConfig {
        natural_docs_home: base.join("home").to_string(),
        input_directories: vec![
            base.join("src/app").to_string(),
            base.join("src/db").to_string(),
        ],
        output_format: "framedhtml".to_string(),
        output_directory: base.join("out").to_string(),
        project_directory: base.join("project").to_string(),
        excluded_directories: vec![base.join("src/db/gen").to_string()],
        quiet: true,
        ..DocsConfig::default()
    };
    (temp_dir, config)
}

#[test]
fn test_two_inputs_one_exclusion_quiet() {
    let (_guard, config) = docs_setup();
    let format = validate_docs(&config).unwrap();
    assert_eq!(format, OutputFormat::FramedHtml);

    let spec = build_docs_command(&config, format);
    let count = |flag: &str| spec.args.iter().filter(|a| *a == flag).count();

    assert_eq!(count("-i"), 2);
    assert_eq!(count("-xi"), 1);
    assert_eq!(spec.args.last().map(String::as_str), Some("-q"));
    for flag in ["-r", "-ro", "-do", "-oft", "-nag"] {
        assert_eq!(count(flag), 0, "unexpected {flag}");
    }

    // Working directory is the Natural Docs home.
    assert_eq!(
        spec.current_dir.as_deref().map(|d| d.as_str()),
        Some(config.natural_docs_home.as_str())
    );
}

#[test]
fn test_validation_rejects_missing_output_directory() {
    let (_guard, mut config) = docs_setup();
    fs::remove_dir(&config.output_directory).unwrap();

    let err = validate_docs(&config).unwrap_err();
    assert!(matches!(
        err,
        ToolError::NotADirectory {
            field: "outputDirectory",
            ..
        }
    ));

    // First failure wins even though later fields are also checkable.
    config.output_format = "pdf".to_string();
    let err = validate_docs(&config).unwrap_err();
    assert!(matches!(err, ToolError::UnknownOutputFormat(_)));
}
