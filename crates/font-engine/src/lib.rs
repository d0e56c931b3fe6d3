//! Font engine capability interface.
//!
//! Every format conversion and attribute lookup goes through a [`FontEngine`].
//! Two adapters are provided:
//!
//! - [`FontForgeEngine`] drives the `fontforge` executable through inline
//!   Python scripts and supports every [`OutputFormat`].
//! - [`SfntEngine`] reads TrueType/OpenType files directly with `read-fonts`.
//!   It is read-only and can only re-emit a font in its own flavour.

mod error;
mod fontforge;
mod format;
mod info;
mod sfnt;

use std::path::Path;

pub use error::{EngineError, Result};
pub use fontforge::FontForgeEngine;
pub use format::OutputFormat;
pub use info::{FontInfo, NameEntry};
pub use sfnt::SfntEngine;

/// A font opened through an engine.
pub trait FontHandle {
    /// Path the font was opened from.
    fn path(&self) -> &Path;

    fn info(&self) -> &FontInfo;

    /// Write the font to `output` in `format`.
    fn generate(&self, output: &Path, format: OutputFormat) -> Result<()>;

    /// Write the font in the engine's native source format.
    fn save(&self, output: &Path) -> Result<()>;
}

pub trait FontEngine {
    fn name(&self) -> &'static str;

    /// Check that the engine can be used at all.
    fn probe(&self) -> Result<()>;

    fn open(&self, path: &Path) -> Result<Box<dyn FontHandle>>;
}
