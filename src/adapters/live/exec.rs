//! Async subprocess execution shared by the live adapters.

use std::path::Path;

use tokio::process::Command;

use crate::ports::PortError;

/// The captured output of a finished subprocess.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// The process exit code, `-1` when terminated by a signal.
    pub exit_code: i32,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
}

impl CommandOutput {
    /// Whether the process exited with code zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs `program` with `args`, optionally in `cwd`, capturing output.
///
/// # Errors
///
/// Returns an error if the process cannot be spawned (e.g. the binary
/// does not exist). A non-zero exit is not an error here; callers decide.
pub async fn run(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<CommandOutput, PortError> {
    let mut command = Command::new(program);
    command.args(args);
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }
    let output = command
        .output()
        .await
        .map_err(|err| -> PortError { format!("failed to run {program}: {err}").into() })?;

    Ok(CommandOutput {
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Runs `program` with `args` and returns stdout, failing on non-zero exit.
///
/// # Errors
///
/// Returns an error if the process cannot be spawned or exits non-zero;
/// the error message carries a stderr excerpt.
pub async fn run_checked(
    program: &str,
    args: &[&str],
    cwd: Option<&Path>,
) -> Result<String, PortError> {
    let output = run(program, args, cwd).await?;
    if output.success() {
        Ok(output.stdout)
    } else {
        let stderr = output.stderr.trim();
        Err(format!("{program} exited with status {}: {stderr}", output.exit_code).into())
    }
}
