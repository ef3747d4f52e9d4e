//! Business logic services for apexbuild.
//!
//! This module contains the core services, all framework-agnostic:
//! - [`validation`]: Parameter and filesystem precondition checks
//! - [`script`]: Generated SQL script composition for the import flow
//! - [`runner`]: Child process execution and exit-code interpretation
//! - [`import`]: The APEX application import flow
//! - [`docs`]: The Natural Docs generation flow

pub mod docs;
pub mod import;
pub mod runner;
pub mod script;
pub mod validation;

pub use docs::run_docs;
pub use import::run_import;
pub use runner::{run_command, CommandSpec};

use std::io;
use thiserror::Error;

/// Errors a build step can fail with.
///
/// Every variant carries enough context to name the offending setting, path or
/// exit code; the CLI surfaces these verbatim and aborts the step.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Missing required setting: {0}")]
    MissingSetting(&'static str),

    #[error("Unknown output format: {0}. Valid formats are HTML and FramedHTML.")]
    UnknownOutputFormat(String),

    #[error("The specified {field} is not a folder: {path}")]
    NotADirectory { field: &'static str, path: String },

    #[error("No .sql scripts found in export location: {0}")]
    NoScriptsFound(String),

    #[error("Permission denied reading export file: {0}")]
    UnreadableFile(String),

    #[error("Failed to write generated script: {0}")]
    Composition(#[source] io::Error),

    #[error("Failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with code {code}")]
    CommandFailed { program: String, code: i32 },
}
