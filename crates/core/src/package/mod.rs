//! Font packages: a `<family>.fontpkg` directory with converted resources,
//! `fontpackage.json`, a `README` and an optional `FONTLOG`.

mod create;
pub mod metadata;
mod validate;

use std::path::Path;

use anyhow::Result;

pub use create::{PackageOptions, create_package, package_dir};
pub use metadata::{METADATA_FILE, PackageMetadata, ResourceRecord};
pub use validate::{ValidationReport, find_resources, validate_package};

use crate::FibError;

pub const PACKAGE_EXTENSION: &str = "fontpkg";
pub const README_FILE: &str = "README";
pub const FONTLOG_FILE: &str = "FONTLOG";

/// README contents when the font carries no comment.
pub const README_PLACEHOLDER: &str =
    "This font package has no README yet. Describe the family, its intended use and its license here.\n";

/// Reconcile an existing package with updated font files.
pub fn sync_package(_package_dir: &Path) -> Result<()> {
    Err(FibError::NotImplemented("pkg sync").into())
}
