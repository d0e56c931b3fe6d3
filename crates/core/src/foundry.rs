//! Foundry workflow: build a whole family from a configuration file.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::FibError;

/// Generate every font described by `config_file` from `sources`.
pub fn generate(_config_file: Option<&Path>, _sources: &[PathBuf]) -> Result<()> {
    Err(FibError::NotImplemented("foundry generate").into())
}

/// Write a starter foundry configuration.
pub fn init() -> Result<()> {
    Err(FibError::NotImplemented("foundry init").into())
}
