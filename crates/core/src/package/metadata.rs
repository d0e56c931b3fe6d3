//! `fontpackage.json` document.

use std::{
    fs::{read_to_string, write},
    path::Path,
};

use anyhow::{Context, Result};
use fib_font_engine::FontInfo;
use serde::{Deserialize, Serialize};

use crate::resolver::Attribute;

/// Metadata file written at the root of every package.
pub const METADATA_FILE: &str = "fontpackage.json";

/// One converted font inside a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub postscript_name: Option<String>,
    pub full_name: Option<String>,
    pub weight: Option<String>,
    pub style: Option<String>,
    pub version: Option<String>,
    pub italic: bool,
}

impl ResourceRecord {
    pub fn from_info(info: &FontInfo) -> Self {
        Self {
            postscript_name: info.font_name.clone(),
            full_name: info.full_name.clone(),
            weight: info.weight.clone(),
            style: Attribute::name_table("SubFamily").read(info),
            version: info.version.clone(),
            italic: info.is_italic(),
        }
    }
}

/// Field order is the serialized order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageMetadata {
    pub family_name: Option<String>,
    pub copyright: Option<String>,
    pub designer: Option<String>,
    pub designer_url: Option<String>,
    pub manufacturer: Option<String>,
    pub vendor_url: Option<String>,
    pub trademark: Option<String>,
    pub license: Option<String>,
    pub license_url: Option<String>,
    pub resources: Vec<ResourceRecord>,
}

impl PackageMetadata {
    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn write(&self, package_dir: &Path) -> Result<()> {
        let path = package_dir.join(METADATA_FILE);
        write(&path, self.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    pub fn read(package_dir: &Path) -> Result<Self> {
        let path = package_dir.join(METADATA_FILE);
        let contents = read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}
