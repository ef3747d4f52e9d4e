//! Parameter and filesystem precondition checks.
//!
//! Both flows validate their full configuration here before any script is
//! written or process is spawned. Validation fails fast: the first violation
//! wins and is returned as a field-named [`ToolError`], never an aggregate.

use crate::models::{DocsConfig, ImportConfig, OutputFormat};
use crate::services::ToolError;
use camino::{Utf8Path, Utf8PathBuf};
use std::fs::File;

/// Recognized extension for export files, matched case-insensitively.
pub const SQL_EXTENSION: &str = "sql";

/// Validate the import configuration and enumerate the export files.
///
/// Checks required settings, then the export location, then lists the `.sql`
/// files beneath it. The returned set is sorted lexicographically by file name
/// so the generated master script is deterministic across platforms.
///
/// # Errors
///
/// - [`ToolError::MissingSetting`] for an empty required setting
/// - [`ToolError::NotADirectory`] when the export location is invalid
/// - [`ToolError::NoScriptsFound`] when no `.sql` file matches
/// - [`ToolError::UnreadableFile`] when a matched file cannot be opened
pub fn validate_import(config: &ImportConfig) -> Result<Vec<Utf8PathBuf>, ToolError> {
    require(&config.connection_string, "connectionString")?;
    require(&config.username, "username")?;
    require(&config.password, "password")?;
    require(&config.export_location, "appExportLocation")?;

    let location = Utf8Path::new(&config.export_location);
    if !location.is_dir() {
        return Err(ToolError::NotADirectory {
            field: "appExportLocation",
            path: config.export_location.clone(),
        });
    }

    let files = list_export_files(location)?;
    if files.is_empty() {
        return Err(ToolError::NoScriptsFound(config.export_location.clone()));
    }

    for file in &files {
        // Probe readability now so SQL*Plus never sees a half-runnable set.
        if File::open(file).is_err() {
            return Err(ToolError::UnreadableFile(file.to_string()));
        }
    }

    tracing::debug!(
        "Found {} export file(s) in {}",
        files.len(),
        config.export_location
    );

    Ok(files)
}

/// Validate the Natural Docs configuration.
///
/// Mirrors the checks Natural Docs itself would fail on, but with
/// field-named errors before the process is launched.
pub fn validate_docs(config: &DocsConfig) -> Result<OutputFormat, ToolError> {
    require(&config.natural_docs_home, "naturalDocsHome")?;
    require_dir(&config.natural_docs_home, "naturalDocsHome")?;

    if config.input_directories.is_empty() {
        return Err(ToolError::MissingSetting("inputSourceDirectories"));
    }
    for dir in &config.input_directories {
        require_dir(dir, "inputSourceDirectory")?;
    }

    let format: OutputFormat = config
        .output_format
        .parse()
        .map_err(|_| ToolError::UnknownOutputFormat(config.output_format.clone()))?;

    require(&config.output_directory, "outputDirectory")?;
    require_dir(&config.output_directory, "outputDirectory")?;
    require(&config.project_directory, "projectDirectory")?;
    require_dir(&config.project_directory, "projectDirectory")?;

    for dir in &config.excluded_directories {
        require_dir(dir, "excludedSubdirectory")?;
    }

    Ok(format)
}

fn require(value: &str, field: &'static str) -> Result<(), ToolError> {
    if value.trim().is_empty() {
        return Err(ToolError::MissingSetting(field));
    }
    Ok(())
}

fn require_dir(path: &str, field: &'static str) -> Result<(), ToolError> {
    if !Utf8Path::new(path).is_dir() {
        return Err(ToolError::NotADirectory {
            field,
            path: path.to_string(),
        });
    }
    Ok(())
}

/// List the `.sql` files directly under a directory, sorted by file name.
///
/// The extension match is case-insensitive (`Export.SQL` counts). Directory
/// listing order is platform-dependent, so the result is always sorted.
fn list_export_files(location: &Utf8Path) -> Result<Vec<Utf8PathBuf>, ToolError> {
    let entries = location.read_dir_utf8().map_err(|_| ToolError::NotADirectory {
        field: "appExportLocation",
        path: location.to_string(),
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|_| ToolError::NotADirectory {
            field: "appExportLocation",
            path: location.to_string(),
        })?;
        let path = entry.into_path();
        let is_sql = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case(SQL_EXTENSION))
            .unwrap_or(false);
        if is_sql && path.is_file() {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
