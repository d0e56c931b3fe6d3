//! Boundary for external scripts and binaries.
//!
//! Every command line goes through a [`ProcessRunner`] and comes back as a
//! [`ProcessOutput`], so a failing script is at least observable.

use std::{cell::RefCell, io, process::Command};

use anyhow::Result;
use log::{debug, warn};

use crate::FibError;

/// Captured result of an external command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// Exit code, `None` when the process was killed by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    fn describe_status(&self) -> String {
        match self.status {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        }
    }
}

pub trait ProcessRunner {
    /// Run `command_line` through the platform shell.
    fn run_shell(&self, command_line: &str) -> io::Result<ProcessOutput>;
}

/// Runs commands with `sh -c` (`cmd /C` on Windows).
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellRunner;

impl ProcessRunner for ShellRunner {
    fn run_shell(&self, command_line: &str) -> io::Result<ProcessOutput> {
        debug!("$ {command_line}");
        let output = if cfg!(windows) {
            Command::new("cmd").args(["/C", command_line]).output()?
        } else {
            Command::new("sh").args(["-c", command_line]).output()?
        };
        Ok(ProcessOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Records command lines instead of running them.
///
/// Backs `--dry-run`, and lets tests inspect what would have been executed.
#[derive(Debug, Default)]
pub struct DryRunRunner {
    commands: RefCell<Vec<String>>,
    status: i32,
    echo: bool,
}

impl DryRunRunner {
    /// A runner that prints every command line to stdout.
    pub fn echoing() -> Self {
        Self { echo: true, ..Self::default() }
    }

    /// A silent runner reporting `status` for every command.
    pub fn with_status(status: i32) -> Self {
        Self { status, ..Self::default() }
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.borrow().clone()
    }
}

impl ProcessRunner for DryRunRunner {
    fn run_shell(&self, command_line: &str) -> io::Result<ProcessOutput> {
        if self.echo {
            println!("{command_line}");
        }
        self.commands.borrow_mut().push(command_line.to_string());
        Ok(ProcessOutput { status: Some(self.status), ..ProcessOutput::default() })
    }
}

/// Run `command_line` and decide what a failure means.
///
/// Returns `Ok(true)` on success. A failure is logged and returns `Ok(false)`,
/// unless `strict` is set, in which case it becomes [`FibError::ExternalFailure`].
pub fn run_checked(runner: &dyn ProcessRunner, command_line: &str, strict: bool) -> Result<bool> {
    let status = match runner.run_shell(command_line) {
        Ok(output) if output.success() => return Ok(true),
        Ok(output) => {
            if !output.stderr.trim().is_empty() {
                debug!("stderr: {}", output.stderr.trim());
            }
            output.describe_status()
        }
        Err(e) => format!("could not start: {e}"),
    };

    if strict {
        return Err(FibError::ExternalFailure { command: command_line.to_string(), status }.into());
    }
    warn!("External command failed ({status}): {command_line}");
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dry_run_records_in_order() {
        let runner = DryRunRunner::default();
        assert!(run_checked(&runner, "first", false).unwrap());
        assert!(run_checked(&runner, "second", true).unwrap());
        assert_eq!(runner.commands(), vec!["first", "second"]);
    }

    #[test]
    fn test_failure_is_lenient_by_default() {
        let runner = DryRunRunner::with_status(2);
        assert!(!run_checked(&runner, "fontforge -script missing.pe", false).unwrap());
    }

    #[test]
    fn test_failure_is_an_error_when_strict() {
        let runner = DryRunRunner::with_status(2);
        let err = run_checked(&runner, "fontforge -script missing.pe", true).unwrap_err();
        match err.downcast_ref::<FibError>() {
            Some(FibError::ExternalFailure { status, .. }) => assert_eq!(status, "exit code 2"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_runner_captures_output() {
        let output = ShellRunner.run_shell("echo hello; echo oops >&2; exit 3").unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout.trim(), "hello");
        assert_eq!(output.stderr.trim(), "oops");
        assert!(!output.success());
    }
}
