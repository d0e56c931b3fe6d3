use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use fib_font_engine::OutputFormat;
use glob::{Pattern, glob};
use log::{debug, error};

use super::{PACKAGE_EXTENSION, metadata::PackageMetadata};

/// Problems found in a package. Empty means valid.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub resources: Vec<PathBuf>,
    pub problems: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Font files (or UFO directories) at the top level of `dir`.
pub fn find_resources(dir: &Path) -> Result<Vec<PathBuf>> {
    let base = Pattern::escape(&dir.to_string_lossy());
    let mut resources = Vec::new();
    for format in OutputFormat::ALL {
        let pattern = format!("{base}/*.{}", format.extension());
        let matches = glob(&pattern).with_context(|| format!("Failed to glob pattern: {pattern}"))?;
        resources.extend(matches.filter_map(Result::ok));
    }
    resources.sort();
    Ok(resources)
}

/// Check that `dir` holds a well-formed metadata document and one resource
/// per record.
pub fn validate_package(dir: &Path) -> Result<ValidationReport> {
    if !dir.is_dir() {
        bail!("{} is not a directory", dir.display());
    }

    let metadata = PackageMetadata::read(dir).inspect_err(|e| {
        error!("Invalid package metadata in {}: {e:#}", dir.display());
    })?;

    let mut report = ValidationReport { resources: find_resources(dir)?, ..Default::default() };
    debug!("Found {} resource(s) in {}", report.resources.len(), dir.display());

    match metadata.family_name.as_deref().filter(|name| !name.is_empty()) {
        None => report.problems.push("family_name is missing".to_string()),
        Some(family) => {
            let expected = format!("{family}.{PACKAGE_EXTENSION}");
            let resolved = dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf());
            let actual = resolved.file_name().unwrap_or_default().to_string_lossy();
            if actual != expected {
                report.problems.push(format!("directory is named '{actual}', expected '{expected}'"));
            }
        }
    }

    if metadata.resources.is_empty() {
        report.problems.push("resources list is empty".to_string());
    }
    for (i, record) in metadata.resources.iter().enumerate() {
        if record.postscript_name.as_deref().is_none_or(str::is_empty) {
            report.problems.push(format!("resource {} has no postscript_name", i + 1));
        }
    }

    if report.resources.len() != metadata.resources.len() {
        report.problems.push(format!(
            "{} resource record(s) but {} font resource(s) on disk",
            metadata.resources.len(),
            report.resources.len()
        ));
    }

    Ok(report)
}
