//! Read-only adapter for TrueType/OpenType files built on `read-fonts`.

use std::{
    fs::{copy, read},
    path::{Path, PathBuf},
};

use log::debug;
use read_fonts::{FontRef, TableProvider};

use crate::{EngineError, FontEngine, FontHandle, FontInfo, NameEntry, OutputFormat, Result};

const ENGINE_NAME: &str = "sfnt";

const SFNT_VERSION_TRUETYPE: u32 = 0x0001_0000;
const SFNT_VERSION_CFF: u32 = 0x4F54_544F;

const PLATFORM_UNICODE: u16 = 0;
const PLATFORM_MAC: u16 = 1;
const PLATFORM_WINDOWS: u16 = 3;
const LANGUAGE_WINDOWS_EN_US: u16 = 0x0409;
const LANGUAGE_MAC_ENGLISH: u16 = 0;

/// Name IDs and the English keys FontForge uses for them.
const NAME_KEYS: &[(u16, &str)] = &[
    (0, "Copyright"),
    (1, "Family"),
    (2, "SubFamily"),
    (3, "UniqueID"),
    (4, "Fullname"),
    (5, "Version"),
    (6, "PostScriptName"),
    (7, "Trademark"),
    (8, "Manufacturer"),
    (9, "Designer"),
    (10, "Descriptor"),
    (11, "Vendor URL"),
    (12, "Designer URL"),
    (13, "License"),
    (14, "License URL"),
    (16, "Preferred Family"),
    (17, "Preferred Styles"),
    (18, "Compatible Full"),
    (19, "Sample Text"),
    (21, "WWS Family"),
    (22, "WWS Subfamily"),
];

/// Engine that inspects sfnt binaries without any external program.
#[derive(Debug, Clone, Copy, Default)]
pub struct SfntEngine;

impl FontEngine for SfntEngine {
    fn name(&self) -> &'static str {
        ENGINE_NAME
    }

    fn probe(&self) -> Result<()> {
        Ok(())
    }

    fn open(&self, path: &Path) -> Result<Box<dyn FontHandle>> {
        let data = read(path)?;
        let font = FontRef::new(&data)?;
        let flavour = match font.table_directory.sfnt_version() {
            SFNT_VERSION_CFF => OutputFormat::Otf,
            SFNT_VERSION_TRUETYPE => OutputFormat::Ttf,
            other => {
                return Err(EngineError::Inspect {
                    path: path.to_path_buf(),
                    message: format!("unsupported sfnt version {other:#010x}"),
                });
            }
        };
        let info = inspect(&font);
        debug!("Opened {} as {flavour}", path.display());
        Ok(Box::new(SfntFont { path: path.to_path_buf(), flavour, info }))
    }
}

fn inspect(font: &FontRef) -> FontInfo {
    let names = english_names(font);
    let lookup = |key: &str| {
        names.iter().find(|entry| entry.key == key).map(|entry| entry.value.clone())
    };

    let weight = font.os2().ok().map(|os2| weight_name(os2.us_weight_class()).to_string());
    let italic_angle = font.post().map(|post| post.italic_angle().to_f64()).unwrap_or(0.0);
    let version = lookup("Version").map(|v| match v.strip_prefix("Version ") {
        Some(stripped) => stripped.to_string(),
        None => v,
    });

    FontInfo {
        family_name: lookup("Preferred Family").or_else(|| lookup("Family")),
        full_name: lookup("Fullname"),
        font_name: lookup("PostScriptName"),
        weight,
        version,
        italic_angle,
        copyright: lookup("Copyright"),
        comment: None,
        change_log: None,
        names,
    }
}

/// English name records, one per key, Windows records first.
fn english_names(font: &FontRef) -> Vec<NameEntry> {
    let Ok(name) = font.name() else {
        return Vec::new();
    };

    let mut records: Vec<_> = name
        .name_record()
        .iter()
        .filter_map(|record| {
            let rank = match (record.platform_id(), record.language_id()) {
                (PLATFORM_WINDOWS, LANGUAGE_WINDOWS_EN_US) => 0,
                (PLATFORM_MAC, LANGUAGE_MAC_ENGLISH) => 1,
                (PLATFORM_UNICODE, _) => 2,
                _ => return None,
            };
            let name_id = record.name_id().to_u16();
            let key = NAME_KEYS.iter().find(|(id, _)| *id == name_id)?.1;
            let value = record.string(name.string_data()).ok()?.chars().collect::<String>();
            Some((rank, name_id, key, value))
        })
        .collect();
    records.sort_by_key(|(rank, name_id, ..)| (*name_id, *rank));
    records.dedup_by_key(|(_, name_id, ..)| *name_id);

    records.into_iter().map(|(_, _, key, value)| NameEntry::new("English (US)", key, value)).collect()
}

fn weight_name(weight_class: u16) -> &'static str {
    match weight_class {
        0..=149 => "Thin",
        150..=249 => "ExtraLight",
        250..=349 => "Light",
        350..=449 => "Regular",
        450..=549 => "Medium",
        550..=649 => "SemiBold",
        650..=749 => "Bold",
        750..=849 => "ExtraBold",
        _ => "Black",
    }
}

struct SfntFont {
    path: PathBuf,
    flavour: OutputFormat,
    info: FontInfo,
}

impl FontHandle for SfntFont {
    fn path(&self) -> &Path {
        &self.path
    }

    fn info(&self) -> &FontInfo {
        &self.info
    }

    fn generate(&self, output: &Path, format: OutputFormat) -> Result<()> {
        if format != self.flavour {
            return Err(EngineError::Unsupported { engine: ENGINE_NAME, format });
        }
        if output != self.path {
            copy(&self.path, output)?;
        }
        Ok(())
    }

    fn save(&self, _output: &Path) -> Result<()> {
        Err(EngineError::Unsupported { engine: ENGINE_NAME, format: OutputFormat::Sfd })
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_weight_names() {
        assert_eq!(weight_name(100), "Thin");
        assert_eq!(weight_name(400), "Regular");
        assert_eq!(weight_name(700), "Bold");
        assert_eq!(weight_name(950), "Black");
    }

    #[test]
    fn test_open_rejects_non_font() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("NotAFont.ttf");
        write(&path, b"definitely not a font").unwrap();

        assert!(SfntEngine.open(&path).is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let err = SfntEngine.open(Path::new("/nonexistent/Missing.ttf")).err().unwrap();
        assert!(matches!(err, EngineError::Io(_)));
    }

    #[test]
    fn test_same_flavour_copy_and_unsupported_targets() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Vazirmatn.ttf");
        write(&path, font_test_data::VAZIRMATN_VAR).unwrap();

        let font = SfntEngine.open(&path).unwrap();
        let copied = dir.path().join("Copy.ttf");
        font.generate(&copied, OutputFormat::Ttf).unwrap();
        assert_eq!(read(&copied).unwrap(), font_test_data::VAZIRMATN_VAR);

        let err = font.generate(&dir.path().join("Copy.ufo"), OutputFormat::Ufo).unwrap_err();
        assert!(matches!(err, EngineError::Unsupported { format: OutputFormat::Ufo, .. }));
        assert!(font.save(&dir.path().join("Copy.sfd")).is_err());
    }

    #[test]
    fn test_name_keys_are_unique() {
        for (i, (id, key)) in NAME_KEYS.iter().enumerate() {
            assert!(NAME_KEYS[i + 1..].iter().all(|(other_id, other_key)| other_id != id
                && other_key != key));
        }
    }
}
