// apexbuild - build-step runner for Oracle APEX projects
//
// This is the library crate containing the flows and their building blocks.
// The binary crate (main.rs) provides the CLI entry point.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::{ConfigManager, ToolConfig};
pub use models::{DocsConfig, ImportConfig, OutputFormat};
pub use services::{run_docs, run_import, CommandSpec, ToolError};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
