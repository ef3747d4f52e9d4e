use crate::models::{DocsConfig, ImportConfig};
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

/// Environment variable that overrides the import password, so credentials
/// can stay out of the config file on CI machines.
pub const PASSWORD_ENV_VAR: &str = "APEXBUILD_PASSWORD";

/// The apexbuild.yaml file layout. Either section may be absent; a flow
/// simply requires its own section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolConfig {
    #[serde(rename = "Import", default)]
    pub import: Option<ImportConfig>,

    #[serde(rename = "NaturalDocs", default)]
    pub docs: Option<DocsConfig>,
}

/// Loads apexbuild.yaml and applies environment overrides.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    pub fn new<P: AsRef<Utf8Path>>(config_path: P) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Load the configuration file.
    ///
    /// The file must exist; a build step with no configuration is always a
    /// mistake. When `APEXBUILD_PASSWORD` is set it replaces the import
    /// password from the file.
    pub fn load(&self) -> Result<ToolConfig> {
        let file_contents = fs::read_to_string(&self.config_path)
            .with_context(|| format!("Failed to read config file: {}", self.config_path))?;

        let mut config: ToolConfig = serde_yaml_ng::from_str(&file_contents)
            .with_context(|| format!("Failed to parse config file: {}", self.config_path))?;

        if let Some(import) = config.import.as_mut() {
            if let Ok(password) = env::var(PASSWORD_ENV_VAR) {
                tracing::debug!("Using import password from {}", PASSWORD_ENV_VAR);
                import.password = password;
            }
        }

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(config)
    }

    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
