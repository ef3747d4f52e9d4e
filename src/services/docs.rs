//! The Natural Docs generation flow.
//!
//! No script generation here: validation, then a straight argument-list
//! assembly, then one `perl NaturalDocs ...` invocation with the working
//! directory set to the Natural Docs home.

use crate::models::{DocsConfig, OutputFormat};
use crate::services::runner::{run_command, CommandSpec};
use crate::services::validation::validate_docs;
use crate::services::ToolError;
use camino::Utf8PathBuf;

/// Build the Natural Docs invocation.
///
/// Argument order matches what Natural Docs documents: `-i` per input
/// directory, `-o <format> <output dir>`, `-p <project dir>`, `-xi` per
/// excluded directory, then the boolean switches in a fixed order.
pub fn build_docs_command(config: &DocsConfig, format: OutputFormat) -> CommandSpec {
    let executable = if cfg!(target_os = "windows") {
        "NaturalDocs.bat"
    } else {
        "NaturalDocs"
    };

    let mut spec = CommandSpec::new("perl");
    spec.current_dir = Some(Utf8PathBuf::from(&config.natural_docs_home));
    spec.args.push(executable.to_string());

    for dir in &config.input_directories {
        spec.args.push("-i".to_string());
        spec.args.push(dir.clone());
    }
    spec.args.push("-o".to_string());
    spec.args.push(format.as_arg().to_string());
    spec.args.push(config.output_directory.clone());
    spec.args.push("-p".to_string());
    spec.args.push(config.project_directory.clone());

    for dir in &config.excluded_directories {
        spec.args.push("-xi".to_string());
        spec.args.push(dir.clone());
    }
    for (flag, enabled) in [
        ("-r", config.rebuild),
        ("-ro", config.rebuild_output),
        ("-do", config.documented_only),
        ("-oft", config.only_file_titles),
        ("-nag", config.no_auto_group),
        ("-q", config.quiet),
    ] {
        if enabled {
            spec.args.push(flag.to_string());
        }
    }

    spec
}

/// Run the docs flow end to end.
pub async fn run_docs(config: &DocsConfig) -> Result<(), ToolError> {
    let format = validate_docs(config)?;
    tracing::info!(
        "Running Natural Docs from {} ({} input directories)",
        config.natural_docs_home,
        config.input_directories.len()
    );

    let spec = build_docs_command(config, format);
    run_command(&spec, |line| tracing::info!("{}", line)).await?;
    tracing::info!("Documentation generated in {}", config.output_directory);
    Ok(())
}
