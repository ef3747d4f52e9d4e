//! apexbuild - build-step runner for Oracle APEX projects
//!
//! CLI entry point. Two subcommands, one build step each:
//!
//! - `apexbuild import` — import an APEX application export via SQL*Plus
//! - `apexbuild docs`   — generate project documentation via Natural Docs
//!
//! All settings come from apexbuild.yaml (see [`apexbuild::ToolConfig`]);
//! the CLI only picks the flow, the config file and the log verbosity. A
//! failed step exits non-zero so the invoking build tool aborts.

use anyhow::{bail, Result};
use apexbuild::{ConfigManager, APP_NAME, VERSION};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "apexbuild", version, about = "Build-step runner for Oracle APEX projects")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "apexbuild.yaml", global = true)]
    config: String,

    /// Log at debug level (rendered command lines, environment dumps)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import an APEX application export via SQL*Plus
    Import,
    /// Generate project documentation via Natural Docs
    Docs,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines get flushed on exit.
    let _guard = apexbuild::logging::setup_logging("logs", "apexbuild", cli.debug)?;
    tracing::debug!("Starting {} v{}", APP_NAME, VERSION);

    let config = ConfigManager::new(&cli.config).load()?;

    let result = match cli.command {
        Command::Import => {
            let Some(import) = config.import else {
                bail!("No Import section in {}", cli.config);
            };
            apexbuild::run_import(&import).await
        }
        Command::Docs => {
            let Some(docs) = config.docs else {
                bail!("No NaturalDocs section in {}", cli.config);
            };
            apexbuild::run_docs(&docs).await
        }
    };

    result.map_err(|e| {
        tracing::error!("{}", e);
        anyhow::Error::from(e)
    })
}
