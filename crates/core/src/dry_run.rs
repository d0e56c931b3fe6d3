//! Engine wrapper for `--dry-run`: fonts are still opened and inspected, but
//! nothing is written.

use std::path::Path;

use fib_font_engine::{FontEngine, FontHandle, FontInfo, OutputFormat, Result};

pub struct DryRunEngine {
    inner: Box<dyn FontEngine>,
}

impl DryRunEngine {
    pub fn new(inner: Box<dyn FontEngine>) -> Self {
        Self { inner }
    }
}

impl FontEngine for DryRunEngine {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    fn probe(&self) -> Result<()> {
        self.inner.probe()
    }

    fn open(&self, path: &Path) -> Result<Box<dyn FontHandle>> {
        Ok(Box::new(DryRunFont { inner: self.inner.open(path)? }))
    }
}

struct DryRunFont {
    inner: Box<dyn FontHandle>,
}

impl FontHandle for DryRunFont {
    fn path(&self) -> &Path {
        self.inner.path()
    }

    fn info(&self) -> &FontInfo {
        self.inner.info()
    }

    fn generate(&self, output: &Path, format: OutputFormat) -> Result<()> {
        println!("generate {format}: {} -> {}", self.path().display(), output.display());
        Ok(())
    }

    fn save(&self, output: &Path) -> Result<()> {
        println!("save: {} -> {}", self.path().display(), output.display());
        Ok(())
    }
}
