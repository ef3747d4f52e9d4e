//! Generated SQL script composition for the import flow.
//!
//! Two scripts are produced per run: an attribute block that primes
//! `apex_application_install` with the target-specific application attributes,
//! and a master script that chains the attribute block and every export file.
//! Rendering is pure (`String` in, `String` out); writing goes through
//! `tempfile` so the scripts are created securely and removed best-effort when
//! the run ends.

use crate::models::ImportConfig;
use crate::services::ToolError;
use camino::{Utf8Path, Utf8PathBuf};
use std::io::{self, Write};
use tempfile::{Builder, TempPath};

/// A transient SQL script on disk.
///
/// The file lives as long as this value; dropping it removes the file
/// (best-effort, nothing is guaranteed on a crash). Keep it alive until
/// SQL*Plus has finished running.
#[derive(Debug)]
pub struct GeneratedScript {
    path: Utf8PathBuf,
    _guard: TempPath,
}

impl GeneratedScript {
    /// The on-disk path, usable in an `@` include directive.
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Write `contents` to a fresh temporary `.sql` file.
    fn write(prefix: &str, contents: &str) -> Result<Self, ToolError> {
        let mut file = Builder::new()
            .prefix(prefix)
            .suffix(".sql")
            .tempfile()
            .map_err(ToolError::Composition)?;
        file.write_all(contents.as_bytes())
            .map_err(ToolError::Composition)?;
        file.flush().map_err(ToolError::Composition)?;

        let guard = file.into_temp_path();
        let path = Utf8PathBuf::try_from(guard.to_path_buf())
            .map_err(|e| ToolError::Composition(io::Error::new(io::ErrorKind::InvalidData, e)))?;

        tracing::debug!("Wrote generated script: {}", path);
        Ok(Self { path, _guard: guard })
    }
}

/// One optional setter statement for the attribute block.
///
/// Rules are pure functions of the configuration and run in this fixed,
/// declared order, so the block's statement order never depends on how the
/// configuration was assembled.
type SetterRule = fn(&ImportConfig) -> Option<String>;

const SETTER_RULES: &[SetterRule] = &[
    |c| {
        c.app_id
            .map(|id| format!("  apex_application_install.set_application_id({id});"))
    },
    |c| {
        c.alias
            .as_ref()
            .map(|v| format!("  apex_application_install.set_application_alias('{v}');"))
    },
    |c| {
        c.app_name
            .as_ref()
            .map(|v| format!("  apex_application_install.set_application_name('{v}');"))
    },
    |c| {
        c.parsing_schema
            .as_ref()
            .map(|v| format!("  apex_application_install.set_schema('{v}');"))
    },
    |c| {
        c.image_prefix
            .as_ref()
            .map(|v| format!("  apex_application_install.set_image_prefix('{v}');"))
    },
    |c| {
        c.proxy
            .as_ref()
            .map(|v| format!("  apex_application_install.set_proxy('{v}');"))
    },
    |c| {
        c.offset
            .map(|v| format!("  apex_application_install.set_offset({v});"))
    },
];

/// Render the PL/SQL attribute block for an import configuration.
///
/// When a workspace is configured the block resolves its id from
/// `apex_workspaces` first; a failed lookup raises an error naming the
/// workspace. Setter statements follow in the fixed [`SETTER_RULES`] order,
/// each emitted only when its setting is present. Without an explicit offset
/// the block falls back to `generate_offset`.
pub fn render_attribute_block(config: &ImportConfig) -> String {
    let mut lines: Vec<String> = vec!["declare".to_string()];

    if config.workspace.is_some() {
        lines.push("  l_workspace_id apex_workspaces.workspace_id%type;".to_string());
    }
    lines.push("begin".to_string());

    if let Some(workspace) = &config.workspace {
        lines.push("  select workspace_id".to_string());
        lines.push("  into l_workspace_id".to_string());
        lines.push("  from apex_workspaces".to_string());
        lines.push(format!("  where upper(workspace) = upper('{workspace}');"));
        lines.push(String::new());
        lines.push("  apex_application_install.set_workspace_id(l_workspace_id);".to_string());
    }

    for rule in SETTER_RULES {
        if let Some(statement) = rule(config) {
            lines.push(statement);
        }
    }

    if config.offset.is_none() {
        lines.push("  apex_application_install.generate_offset;".to_string());
    }

    lines.push("exception".to_string());
    if let Some(workspace) = &config.workspace {
        lines.push("  when no_data_found then".to_string());
        lines.push(format!(
            "    raise_application_error(-20001, 'Workspace {workspace} was not found.');"
        ));
    }
    lines.push("  when others then".to_string());
    lines.push(
        "    raise_application_error(-20002, 'Import setup failed: ' || sqlerrm);".to_string(),
    );
    lines.push("end;".to_string());
    lines.push("/".to_string());

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// Render the master script that SQL*Plus is launched with.
///
/// The error-exit directive comes first so a failure in any included file
/// aborts the whole run with a non-zero status. Echo is on for the attribute
/// block only, then every export file is included in the given order, and an
/// explicit `exit` ends the session.
pub fn render_master_script(attribute_block: &Utf8Path, export_files: &[Utf8PathBuf]) -> String {
    let mut lines: Vec<String> = vec![
        "whenever sqlerror exit sql.sqlcode".to_string(),
        "set echo on".to_string(),
        format!("@{}", friendly_path(attribute_block.as_str())),
        "set echo off".to_string(),
    ];
    for file in export_files {
        tracing::debug!("Including export file: {}", file);
        lines.push(format!("@{}", friendly_path(file.as_str())));
    }
    lines.push("exit".to_string());

    let mut script = lines.join("\n");
    script.push('\n');
    script
}

/// Rewrite a path into a form SQL*Plus can parse.
///
/// SQL*Plus mishandles spaces in `@` arguments on Windows, and "Program
/// Files" is by far the common offender, so it is replaced with the 8.3 short
/// name. String transform only; the file itself is never renamed. Idempotent.
pub fn friendly_path(path: &str) -> String {
    path.replace("Program Files (x86)", "PROGRA~2")
        .replace("Program Files", "PROGRA~1")
}

/// Write the attribute block and the master script for one run.
///
/// Returns the scripts in (attribute block, master) order; both must stay
/// alive until the SQL*Plus process has exited.
pub fn compose_scripts(
    config: &ImportConfig,
    export_files: &[Utf8PathBuf],
) -> Result<(GeneratedScript, GeneratedScript), ToolError> {
    let attribute_block = GeneratedScript::write("setApexEnv", &render_attribute_block(config))?;
    let master = GeneratedScript::write(
        "scriptsToRun",
        &render_master_script(attribute_block.path(), export_files),
    )?;
    Ok((attribute_block, master))
}
