use std::path::PathBuf;

use thiserror::Error;

/// Outcomes callers may want to tell apart from ordinary failures.
#[derive(Error, Debug)]
pub enum FibError {
    #[error("'{0}' is not implemented yet")]
    NotImplemented(&'static str),

    #[error("aborted: {0}")]
    Aborted(String),

    #[error("external command failed ({status}): {command}")]
    ExternalFailure { command: String, status: String },

    #[error("invalid font package {}: {problems} problem(s) found", path.display())]
    InvalidPackage { path: PathBuf, problems: usize },
}
