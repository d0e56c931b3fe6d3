//! Attribute resolution across several fonts.
//!
//! A family is usually delivered as several files that should agree on
//! attributes such as the family name. When they do not, the user picks one.

use std::{fmt, path::Path};

use anyhow::{Context, Result};
use fib_font_engine::{FontEngine, FontHandle, FontInfo};
use indexmap::IndexSet;
use log::debug;

use crate::prompt::Prompt;

/// Label shown for a font that lacks the attribute.
const ABSENT_LABEL: &str = "(empty)";

/// An attribute read from every font of a set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    FamilyName,
    FullName,
    FontName,
    Weight,
    Version,
    Copyright,
    Comment,
    ChangeLog,
    /// Name-table entry, looked up by case-insensitive key.
    Name(String),
}

impl Attribute {
    pub fn name_table(key: impl Into<String>) -> Self {
        Attribute::Name(key.into())
    }

    pub fn read(&self, info: &FontInfo) -> Option<String> {
        match self {
            Attribute::FamilyName => info.family_name.clone(),
            Attribute::FullName => info.full_name.clone(),
            Attribute::FontName => info.font_name.clone(),
            Attribute::Weight => info.weight.clone(),
            Attribute::Version => info.version.clone(),
            Attribute::Copyright => info.copyright.clone(),
            Attribute::Comment => info.comment.clone(),
            Attribute::ChangeLog => info.change_log.clone(),
            Attribute::Name(key) => info.lookup_name(key).map(str::to_string),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::FamilyName => f.write_str("family name"),
            Attribute::FullName => f.write_str("full name"),
            Attribute::FontName => f.write_str("PostScript name"),
            Attribute::Weight => f.write_str("weight"),
            Attribute::Version => f.write_str("version"),
            Attribute::Copyright => f.write_str("copyright"),
            Attribute::Comment => f.write_str("comment"),
            Attribute::ChangeLog => f.write_str("FONTLOG"),
            Attribute::Name(key) => write!(f, "'{key}' name entry"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// All fonts agree, or the user picked a value.
    Single(Option<String>),
    /// Fonts disagree and nobody was asked. Holds the raw per-font values.
    Conflicting(Vec<Option<String>>),
}

impl Resolution {
    /// The resolved value, or the first font's value when conflicting.
    pub fn into_first(self) -> Option<String> {
        match self {
            Resolution::Single(value) => value,
            Resolution::Conflicting(values) => values.into_iter().next().flatten(),
        }
    }

    pub fn is_conflicting(&self) -> bool {
        matches!(self, Resolution::Conflicting(_))
    }
}

/// Distinct values in first-seen order.
pub fn distinct_values(values: &[Option<String>]) -> Vec<Option<String>> {
    values.iter().cloned().collect::<IndexSet<_>>().into_iter().collect()
}

/// Resolve `attribute` over already opened fonts.
pub fn resolve(
    attribute: &Attribute,
    fonts: &[Box<dyn FontHandle>],
    prompt: &mut dyn Prompt,
) -> Result<Resolution> {
    let values: Vec<Option<String>> = fonts.iter().map(|font| attribute.read(font.info())).collect();
    let distinct = distinct_values(&values);

    if distinct.len() <= 1 {
        return Ok(Resolution::Single(distinct.into_iter().next().flatten()));
    }

    debug!("{} distinct values for {attribute}", distinct.len());
    if !prompt.interactive() {
        return Ok(Resolution::Conflicting(values));
    }

    let labels: Vec<String> = distinct
        .iter()
        .map(|value| value.clone().unwrap_or_else(|| ABSENT_LABEL.to_string()))
        .collect();
    let message = format!("The fonts disagree on the {attribute}. Which one should be used?");
    let index = prompt.choose(&message, &labels)?;
    Ok(Resolution::Single(distinct[index].clone()))
}

/// Open every file and resolve `attribute` over them.
///
/// A file that cannot be opened aborts the resolution.
pub fn resolve_files(
    engine: &dyn FontEngine,
    attribute: &Attribute,
    files: &[impl AsRef<Path>],
    prompt: &mut dyn Prompt,
) -> Result<Resolution> {
    let fonts = open_all(engine, files)?;
    resolve(attribute, &fonts, prompt)
}

/// Open every file through `engine`, in order.
pub fn open_all(
    engine: &dyn FontEngine,
    files: &[impl AsRef<Path>],
) -> Result<Vec<Box<dyn FontHandle>>> {
    files
        .iter()
        .map(|file| {
            let path = file.as_ref();
            engine.open(path).with_context(|| format!("Failed to open font: {}", path.display()))
        })
        .collect()
}
