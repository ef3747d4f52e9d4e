//! Child process execution.
//!
//! A [`CommandSpec`] is pure data describing one invocation, so the flows can
//! be tested right up to the spawn boundary without starting a process.
//! [`run_command`] does the actual spawn: stdout and stderr are piped and
//! drained concurrently (draining them one after the other can deadlock once
//! an OS pipe buffer fills), every line is handed to the caller in the order
//! it was produced, and only exit code 0 counts as success.

use crate::services::ToolError;
use camino::Utf8PathBuf;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// One external command invocation: program, arguments, working directory and
/// environment overrides. Built once per run, discarded after the exit code
/// has been interpreted.
#[derive(Debug, Clone, Default)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub current_dir: Option<Utf8PathBuf>,
    /// Extra environment variables, applied on top of the inherited
    /// environment. Only configured values appear here; anything absent
    /// leaves the inherited environment untouched.
    pub env: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// The command line as a single string, for debug logging only.
    pub fn rendered(&self) -> String {
        let mut rendered = self.program.clone();
        for arg in &self.args {
            rendered.push(' ');
            rendered.push_str(arg);
        }
        rendered
    }
}

/// Run one command to completion and interpret its exit code.
///
/// Blocks (asynchronously) until the child has closed both streams and
/// exited. Every output line is passed to `on_line` in production order;
/// interleaving between the two streams follows arrival order.
///
/// # Errors
///
/// - [`ToolError::Launch`] when the process cannot be started at all
///   (missing executable, permission denied)
/// - [`ToolError::CommandFailed`] with the numeric exit code when the child
///   ran but returned non-zero
pub async fn run_command(
    spec: &CommandSpec,
    mut on_line: impl FnMut(&str),
) -> Result<i32, ToolError> {
    tracing::debug!("Executing: {}", spec.rendered());
    for (key, value) in &spec.env {
        tracing::debug!("  with {}={}", key, value);
    }

    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null());
    if let Some(dir) = &spec.current_dir {
        command.current_dir(dir);
    }
    for (key, value) in &spec.env {
        command.env(key, value);
    }

    let mut child = command.spawn().map_err(|source| ToolError::Launch {
        program: spec.program.clone(),
        source,
    })?;

    // Both streams feed one channel; the readers run concurrently so a full
    // pipe buffer on either side never stalls the child.
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let stdout_task = tokio::spawn(forward_lines(stdout, tx.clone()));
    let stderr_task = tokio::spawn(forward_lines(stderr, tx));

    while let Some(line) = rx.recv().await {
        on_line(&line);
    }

    // Reader tasks finish once the child closes its streams.
    let _ = stdout_task.await;
    let _ = stderr_task.await;

    let status = child.wait().await.map_err(|source| ToolError::Launch {
        program: spec.program.clone(),
        source,
    })?;
    let exit_code = status.code().unwrap_or(-1);
    tracing::debug!("Process exit value: {}", exit_code);

    if exit_code != 0 {
        return Err(ToolError::CommandFailed {
            program: spec.program.clone(),
            code: exit_code,
        });
    }
    Ok(exit_code)
}

async fn forward_lines<R>(reader: Option<R>, tx: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin,
{
    let Some(reader) = reader else {
        return;
    };
    let mut lines = BufReader::new(reader).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if tx.send(line).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandSpec {
        let mut spec = CommandSpec::new("sh");
        spec.args = vec!["-c".to_string(), script.to_string()];
        spec
    }

    #[tokio::test]
    async fn test_zero_exit_is_success() {
        let code = run_command(&sh("exit 0"), |_| {}).await.unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_nonzero_exit_is_failure() {
        let err = run_command(&sh("exit 3"), |_| {}).await.unwrap_err();
        match err {
            ToolError::CommandFailed { code, .. } => assert_eq!(code, 3),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_exit_code_one_is_failure() {
        let err = run_command(&sh("exit 1"), |_| {}).await.unwrap_err();
        assert!(err.to_string().contains("exited with code 1"));
    }

    #[tokio::test]
    async fn test_output_lines_surfaced_in_order() {
        let mut lines = Vec::new();
        run_command(&sh("echo one; echo two; echo three"), |l| {
            lines.push(l.to_string())
        })
        .await
        .unwrap();
        assert_eq!(lines, vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_stderr_merged_into_output() {
        let mut lines = Vec::new();
        run_command(&sh("echo err >&2"), |l| lines.push(l.to_string()))
            .await
            .unwrap();
        assert_eq!(lines, vec!["err"]);
    }

    #[tokio::test]
    async fn test_missing_executable_is_launch_error() {
        let spec = CommandSpec::new("definitely-not-a-real-binary");
        let err = run_command(&spec, |_| {}).await.unwrap_err();
        assert!(matches!(err, ToolError::Launch { .. }));
    }

    #[tokio::test]
    async fn test_large_output_does_not_deadlock() {
        // Enough output to overflow an OS pipe buffer several times over.
        let mut count = 0usize;
        run_command(&sh("i=0; while [ $i -lt 20000 ]; do echo line-$i; i=$((i+1)); done"), |_| {
            count += 1
        })
        .await
        .unwrap();
        assert_eq!(count, 20000);
    }

    #[tokio::test]
    async fn test_env_override_visible_to_child() {
        let mut spec = sh("echo $APEXBUILD_TEST_VAR");
        spec.env
            .push(("APEXBUILD_TEST_VAR".to_string(), "hello".to_string()));
        let mut lines = Vec::new();
        run_command(&spec, |l| lines.push(l.to_string()))
            .await
            .unwrap();
        assert_eq!(lines, vec!["hello"]);
    }

    #[tokio::test]
    async fn test_current_dir_applied() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let mut spec = sh("pwd");
        spec.current_dir =
            Some(Utf8PathBuf::try_from(temp_dir.path().canonicalize().unwrap()).unwrap());
        let mut lines = Vec::new();
        run_command(&spec, |l| lines.push(l.to_string()))
            .await
            .unwrap();
        assert_eq!(lines, vec![spec.current_dir.unwrap().to_string()]);
    }

    #[test]
    fn test_rendered_command_line() {
        let mut spec = CommandSpec::new("sqlplus");
        spec.args = vec!["-L".to_string(), "@run.sql".to_string()];
        assert_eq!(spec.rendered(), "sqlplus -L @run.sql");
    }
}
