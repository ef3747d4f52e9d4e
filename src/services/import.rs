//! The APEX application import flow.
//!
//! Validate → compose scripts → run SQL*Plus. The generated scripts stay
//! alive for the whole run and are removed best-effort afterwards.

use crate::models::ImportConfig;
use crate::services::runner::{run_command, CommandSpec};
use crate::services::script::{compose_scripts, friendly_path};
use crate::services::validation::validate_import;
use crate::services::ToolError;

// Library search path variables, per platform convention:
// Linux, macOS, AIX, HP-UX.
const LIBRARY_PATH_VARS: &[&str] = &[
    "LD_LIBRARY_PATH",
    "DYLD_LIBRARY_PATH",
    "LIBPATH",
    "SHLIB_PATH",
];

/// The `-L` login argument: `user/password@"connection"`.
///
/// The quotes around the connection string are part of the argument itself;
/// SQL*Plus needs them when the connect identifier contains special
/// characters.
fn login_argument(config: &ImportConfig) -> String {
    format!(
        "{}/{}@\"{}\"",
        config.username, config.password, config.connection_string
    )
}

/// Build the SQL*Plus invocation for an already-composed master script.
pub fn build_import_command(config: &ImportConfig, master_script: &str) -> CommandSpec {
    let mut spec = CommandSpec::new(config.sqlplus_cmd.clone());
    spec.args = vec![
        "-L".to_string(),
        login_argument(config),
        format!("@{}", friendly_path(master_script)),
    ];

    if let Some(oracle_home) = &config.oracle_home {
        spec.env.push(("ORACLE_HOME".to_string(), oracle_home.clone()));
    }
    if let Some(tns_admin) = &config.tns_admin {
        spec.env.push(("TNS_ADMIN".to_string(), tns_admin.clone()));
    }
    if let Some(library_path) = &config.library_path {
        for var in LIBRARY_PATH_VARS {
            spec.env.push((var.to_string(), library_path.clone()));
        }
    }

    spec
}

/// Run the import flow end to end.
///
/// Fails before anything is written or spawned when validation rejects the
/// configuration. SQL*Plus output is surfaced line by line at info level; any
/// non-zero exit code aborts the step with the code in the error.
pub async fn run_import(config: &ImportConfig) -> Result<(), ToolError> {
    let export_files = validate_import(config)?;
    tracing::info!(
        "Importing {} export file(s) from {}",
        export_files.len(),
        config.export_location
    );

    let (_attribute_block, master) = compose_scripts(config, &export_files)?;
    let spec = build_import_command(config, master.path().as_str());

    run_command(&spec, |line| tracing::info!("{}", line)).await?;
    tracing::info!("Import completed successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ImportConfig {
        ImportConfig {
            connection_string: "localhost:1521/XEPDB1".to_string(),
            username: "scott".to_string(),
            password: "tiger".to_string(),
            export_location: "export".to_string(),
            ..ImportConfig::default()
        }
    }

    #[test]
    fn test_login_argument_quotes_connection() {
        assert_eq!(
            login_argument(&config()),
            "scott/tiger@\"localhost:1521/XEPDB1\""
        );
    }

    #[test]
    fn test_import_command_shape() {
        let spec = build_import_command(&config(), "/tmp/scriptsToRun1.sql");
        assert_eq!(spec.program, "sqlplus");
        assert_eq!(
            spec.args,
            vec![
                "-L".to_string(),
                "scott/tiger@\"localhost:1521/XEPDB1\"".to_string(),
                "@/tmp/scriptsToRun1.sql".to_string(),
            ]
        );
        assert!(spec.env.is_empty());
        assert!(spec.current_dir.is_none());
    }

    #[test]
    fn test_import_command_env_overrides() {
        let mut cfg = config();
        cfg.oracle_home = Some("/opt/oracle".to_string());
        cfg.tns_admin = Some("/etc/oracle".to_string());
        cfg.library_path = Some("/opt/oracle/lib".to_string());

        let spec = build_import_command(&cfg, "/tmp/run.sql");
        let env: Vec<(&str, &str)> = spec
            .env
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            env,
            vec![
                ("ORACLE_HOME", "/opt/oracle"),
                ("TNS_ADMIN", "/etc/oracle"),
                ("LD_LIBRARY_PATH", "/opt/oracle/lib"),
                ("DYLD_LIBRARY_PATH", "/opt/oracle/lib"),
                ("LIBPATH", "/opt/oracle/lib"),
                ("SHLIB_PATH", "/opt/oracle/lib"),
            ]
        );
    }

    #[test]
    fn test_absent_env_values_not_set() {
        let spec = build_import_command(&config(), "/tmp/run.sql");
        assert!(spec.env.iter().all(|(k, _)| k != "ORACLE_HOME"));
    }

    #[test]
    fn test_master_path_rendered_friendly() {
        let spec = build_import_command(&config(), "C:\\Program Files\\tmp\\run.sql");
        assert_eq!(spec.args[2], "@C:\\PROGRA~1\\tmp\\run.sql");
    }

    #[tokio::test]
    async fn test_invalid_location_fails_before_composition() {
        let mut cfg = config();
        cfg.export_location = "/no/such/place".to_string();
        let err = run_import(&cfg).await.unwrap_err();
        assert!(matches!(err, ToolError::NotADirectory { .. }));
    }
}
