//! Process execution utilities
//!
//! Runs external commands either with captured output (for git queries) or
//! with inherited stdio (for the translation client, whose progress the
//! operator should see). Commands run strictly one at a time; nothing here
//! retries or times out.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tracing::debug;

/// Result of a command execution
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Whether the command succeeded (exit code 0)
    pub success: bool,
    /// Exit code of the command, `-1` if killed by a signal
    pub exit_code: i32,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
}

impl CommandResult {
    /// Create from `std::process::Output`
    #[must_use]
    pub fn from_output(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Render a command line for logs and error messages
#[must_use]
pub fn display_command<S: AsRef<str>>(program: &str, args: &[S]) -> String {
    std::iter::once(program)
        .chain(args.iter().map(AsRef::as_ref))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run a command in a specific directory and capture its output
pub fn run_command_in_dir<S: AsRef<str>>(
    program: &str,
    args: &[S],
    dir: &Path,
) -> Result<CommandResult> {
    debug!(command = %display_command(program, args), dir = %dir.display(), "running");

    let output = Command::new(program)
        .args(args.iter().map(AsRef::as_ref))
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| spawn_error(program, e))?;

    let result = CommandResult::from_output(output);
    debug!(exit_code = result.exit_code, "finished");
    Ok(result)
}

/// Run a command in a specific directory, streaming output to the terminal
///
/// Returns the exit code; `-1` means the process was killed by a signal.
pub fn run_command_streaming_in_dir<S: AsRef<str>>(
    program: &str,
    args: &[S],
    dir: &Path,
) -> Result<i32> {
    debug!(command = %display_command(program, args), dir = %dir.display(), "running (streaming)");

    let status = Command::new(program)
        .args(args.iter().map(AsRef::as_ref))
        .current_dir(dir)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(program, e))?;

    let code = status.code().unwrap_or(-1);
    debug!(exit_code = code, "finished");
    Ok(code)
}

/// Like [`run_command_streaming_in_dir`], but the child's stdout goes to our
/// stderr so our own stdout stays machine-readable
pub fn run_command_streaming_to_stderr_in_dir<S: AsRef<str>>(
    program: &str,
    args: &[S],
    dir: &Path,
) -> Result<i32> {
    debug!(command = %display_command(program, args), dir = %dir.display(), "running (stdout to stderr)");

    let status = Command::new(program)
        .args(args.iter().map(AsRef::as_ref))
        .current_dir(dir)
        .stdout(Stdio::from(std::io::stderr()))
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| spawn_error(program, e))?;

    let code = status.code().unwrap_or(-1);
    debug!(exit_code = code, "finished");
    Ok(code)
}

/// Get the path to a command
#[must_use]
pub fn which_command(program: &str) -> Option<PathBuf> {
    which::which(program).ok()
}

fn spawn_error(program: &str, err: std::io::Error) -> Error {
    if err.kind() == std::io::ErrorKind::NotFound {
        Error::command_not_found(program).with_source(err)
    } else {
        Error::process(format!("Failed to execute {program}: {err}")).with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_which_command_finds_sh() {
        assert!(which_command("sh").is_some());
    }

    #[test]
    fn test_which_command_nonexistent() {
        assert!(which_command("nonexistent_command_12345").is_none());
    }

    #[test]
    fn test_run_command_in_dir_captures_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_command_in_dir("sh", &["-c", "echo hello; pwd"], dir.path()).unwrap();
        assert!(result.success);
        assert!(result.stdout.contains("hello"));
    }

    #[test]
    fn test_run_command_in_dir_reports_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let result = run_command_in_dir("sh", &["-c", "echo oops >&2; exit 3"], dir.path()).unwrap();
        assert!(!result.success);
        assert_eq!(result.exit_code, 3);
        assert!(result.stderr.contains("oops"));
    }

    #[test]
    fn test_streaming_returns_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let code = run_command_streaming_in_dir("sh", &["-c", "exit 4"], dir.path()).unwrap();
        assert_eq!(code, 4);
    }

    #[test]
    fn test_streaming_to_stderr_returns_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let code =
            run_command_streaming_to_stderr_in_dir("sh", &["-c", "echo moved; exit 5"], dir.path())
                .unwrap();
        assert_eq!(code, 5);
    }

    #[test]
    fn test_missing_program_is_command_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_command_in_dir("nonexistent_command_12345", &[] as &[&str], dir.path())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CommandNotFound);
    }

    #[test]
    fn test_display_command() {
        assert_eq!(display_command("tx", &["pull", "--all"]), "tx pull --all");
        assert_eq!(display_command("git", &[] as &[String]), "git");
    }
}
