use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Import settings from the `Import:` section of apexbuild.yaml
///
/// Holds everything needed to push an APEX application export into a target
/// instance via SQL*Plus. Connection string, username, password and the export
/// location are required; the application attributes are optional and, when
/// absent, the export's original values are preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    #[serde(rename = "connectionString", default)]
    pub connection_string: String,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// The command used to start the SQL*Plus executable.
    #[serde(rename = "sqlplusCmd", default = "default_sqlplus_cmd")]
    pub sqlplus_cmd: String,

    /// Value for the ORACLE_HOME environment variable.
    #[serde(rename = "oracleHome", default)]
    pub oracle_home: Option<String>,

    /// Value for the TNS_ADMIN environment variable (tnsnames.ora location).
    #[serde(rename = "tnsAdmin", default)]
    pub tns_admin: Option<String>,

    /// Library search path, applied to the platform-specific variables
    /// (LD_LIBRARY_PATH, DYLD_LIBRARY_PATH, LIBPATH, SHLIB_PATH).
    #[serde(rename = "libraryPath", default)]
    pub library_path: Option<String>,

    /// Folder containing the application export files.
    #[serde(rename = "appExportLocation", default)]
    pub export_location: String,

    /// The target APEX workspace. When set, the generated attribute block
    /// resolves it to a workspace id before the export files run.
    #[serde(rename = "workspaceName", default)]
    pub workspace: Option<String>,

    #[serde(rename = "appId", default)]
    pub app_id: Option<u32>,

    #[serde(rename = "appAlias", default)]
    pub alias: Option<String>,

    #[serde(rename = "appName", default)]
    pub app_name: Option<String>,

    #[serde(rename = "parsingSchema", default)]
    pub parsing_schema: Option<String>,

    #[serde(rename = "imagePrefix", default)]
    pub image_prefix: Option<String>,

    #[serde(default)]
    pub proxy: Option<String>,

    /// Explicit workspace id offset. When absent the attribute block asks the
    /// target instance to generate one.
    #[serde(default)]
    pub offset: Option<i64>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            connection_string: String::new(),
            username: String::new(),
            password: String::new(),
            sqlplus_cmd: default_sqlplus_cmd(),
            oracle_home: None,
            tns_admin: None,
            library_path: None,
            export_location: String::new(),
            workspace: None,
            app_id: None,
            alias: None,
            app_name: None,
            parsing_schema: None,
            image_prefix: None,
            proxy: None,
            offset: None,
        }
    }
}

fn default_sqlplus_cmd() -> String {
    "sqlplus".to_string()
}

/// Natural Docs settings from the `NaturalDocs:` section of apexbuild.yaml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Folder containing the Natural Docs executable.
    #[serde(rename = "naturalDocsHome", default)]
    pub natural_docs_home: String,

    /// Source directories scanned recursively for documentation.
    #[serde(rename = "inputSourceDirectories", default)]
    pub input_directories: Vec<String>,

    /// Output format name; parsed case-insensitively into [`OutputFormat`]
    /// during validation.
    #[serde(rename = "outputFormat", default)]
    pub output_format: String,

    #[serde(rename = "outputDirectory", default)]
    pub output_directory: String,

    /// Where Natural Docs keeps the project's configuration and data files.
    #[serde(rename = "projectDirectory", default)]
    pub project_directory: String,

    /// Subdirectories excluded from scanning.
    #[serde(rename = "excludedSubdirectories", default)]
    pub excluded_directories: Vec<String>,

    /// Rescan all source files and rebuild all output from scratch.
    #[serde(default)]
    pub rebuild: bool,

    /// Rebuild all output files from scratch.
    #[serde(rename = "rebuildOutput", default)]
    pub rebuild_output: bool,

    /// Only include explicitly documented items in the output.
    #[serde(rename = "documentedOnly", default)]
    pub documented_only: bool,

    /// Use only the file name for menu and page titles.
    #[serde(rename = "onlyFileTitles", default)]
    pub only_file_titles: bool,

    /// Don't automatically create group topics.
    #[serde(rename = "noAutoGroup", default)]
    pub no_auto_group: bool,

    /// Suppress all non-error output.
    #[serde(default)]
    pub quiet: bool,
    // unsupported Natural Docs options: --images / --style / --tab-length / --highlight
}

/// The output formats Natural Docs supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    FramedHtml,
}

impl OutputFormat {
    /// The spelling Natural Docs expects after `-o`.
    pub fn as_arg(self) -> &'static str {
        match self {
            OutputFormat::Html => "HTML",
            OutputFormat::FramedHtml => "FramedHTML",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "framedhtml" => Ok(OutputFormat::FramedHtml),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_config_defaults() {
        let config = ImportConfig::default();
        assert_eq!(config.sqlplus_cmd, "sqlplus");
        assert!(config.workspace.is_none());
        assert!(config.offset.is_none());
    }

    #[test]
    fn test_output_format_parse_case_insensitive() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("html".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!(
            "FramedHTML".parse::<OutputFormat>(),
            Ok(OutputFormat::FramedHtml)
        );
        assert_eq!(
            "framedhtml".parse::<OutputFormat>(),
            Ok(OutputFormat::FramedHtml)
        );
        assert!("pdf".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_as_arg() {
        assert_eq!(OutputFormat::Html.as_arg(), "HTML");
        assert_eq!(OutputFormat::FramedHtml.as_arg(), "FramedHTML");
    }

    #[test]
    fn test_import_config_from_yaml() {
        let yaml = r#"
connectionString: "localhost:1521/XEPDB1"
username: scott
password: tiger
appExportLocation: "target/export"
workspaceName: DEMO
appId: 118
"#;
        let config: ImportConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.connection_string, "localhost:1521/XEPDB1");
        assert_eq!(config.sqlplus_cmd, "sqlplus");
        assert_eq!(config.workspace.as_deref(), Some("DEMO"));
        assert_eq!(config.app_id, Some(118));
        assert!(config.alias.is_none());
    }
}
