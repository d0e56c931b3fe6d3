//! In-memory font engine for exercising conversion and packaging without
//! an external program.

#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fs::{create_dir_all, read, read_dir, write},
    path::{Path, PathBuf},
    rc::Rc,
};

use fib_font_engine::{EngineError, FontEngine, FontHandle, FontInfo, OutputFormat, Result};

#[derive(Default, Clone)]
pub struct FakeEngine {
    fonts: HashMap<PathBuf, FontInfo>,
    generated: Rc<RefCell<Vec<(PathBuf, OutputFormat)>>>,
}

impl FakeEngine {
    pub fn with_font(mut self, path: impl Into<PathBuf>, info: FontInfo) -> Self {
        self.fonts.insert(path.into(), info);
        self
    }

    /// Every `generate`/`save` call so far.
    pub fn generated(&self) -> Vec<(PathBuf, OutputFormat)> {
        self.generated.borrow().clone()
    }
}

impl FontEngine for FakeEngine {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn probe(&self) -> Result<()> {
        Ok(())
    }

    fn open(&self, path: &Path) -> Result<Box<dyn FontHandle>> {
        let info = self.fonts.get(path).cloned().ok_or_else(|| EngineError::Inspect {
            path: path.to_path_buf(),
            message: "no such font".to_string(),
        })?;
        Ok(Box::new(FakeFont {
            path: path.to_path_buf(),
            info,
            generated: Rc::clone(&self.generated),
        }))
    }
}

struct FakeFont {
    path: PathBuf,
    info: FontInfo,
    generated: Rc<RefCell<Vec<(PathBuf, OutputFormat)>>>,
}

impl FakeFont {
    fn emit(&self, output: &Path, format: OutputFormat) -> Result<()> {
        self.generated.borrow_mut().push((output.to_path_buf(), format));
        let body = format!("{format} built from {}\n", self.info.font_name.as_deref().unwrap_or("?"));
        if format.is_directory() {
            create_dir_all(output)?;
            write(output.join("fontinfo.plist"), body)?;
        } else {
            write(output, body)?;
        }
        Ok(())
    }
}

impl FontHandle for FakeFont {
    fn path(&self) -> &Path {
        &self.path
    }

    fn info(&self) -> &FontInfo {
        &self.info
    }

    fn generate(&self, output: &Path, format: OutputFormat) -> Result<()> {
        self.emit(output, format)
    }

    fn save(&self, output: &Path) -> Result<()> {
        self.emit(output, OutputFormat::Sfd)
    }
}

pub fn font_info(family: &str, style: &str) -> FontInfo {
    FontInfo {
        family_name: Some(family.to_string()),
        full_name: Some(format!("{family} {style}")),
        font_name: Some(format!("{}-{style}", family.replace(' ', ""))),
        weight: Some(style.to_string()),
        version: Some("1.000".to_string()),
        copyright: Some(format!("Copyright 2024 The {family} Project Authors")),
        ..FontInfo::default()
    }
    .with_name("SubFamily", style)
    .with_name("Designer", "Ana Lima")
    .with_name("License", "SIL Open Font License, Version 1.1")
    .with_name("License URL", "https://openfontlicense.org")
}

/// Relative path -> contents of every file below `dir`.
pub fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    fn walk(root: &Path, dir: &Path, out: &mut BTreeMap<PathBuf, Vec<u8>>) {
        for entry in read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                walk(root, &path, out);
            } else {
                out.insert(path.strip_prefix(root).unwrap().to_path_buf(), read(&path).unwrap());
            }
        }
    }

    let mut out = BTreeMap::new();
    walk(dir, dir, &mut out);
    out
}
