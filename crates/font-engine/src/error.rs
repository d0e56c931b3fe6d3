use std::{io, path::PathBuf, result};

use read_fonts::ReadError;
use thiserror::Error;

use crate::OutputFormat;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("font engine '{engine}' is not available: {reason}")]
    Unavailable { engine: &'static str, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read font: {0}")]
    Read(#[from] ReadError),

    #[error("failed to inspect {}: {message}", path.display())]
    Inspect { path: PathBuf, message: String },

    #[error("failed to write {}: {message}", path.display())]
    Generate { path: PathBuf, message: String },

    #[error("engine '{engine}' cannot produce {format} output")]
    Unsupported { engine: &'static str, format: OutputFormat },

    #[error("malformed engine output: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = result::Result<T, EngineError>;
