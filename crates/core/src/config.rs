//! Runtime settings for external programs and scripts.
//!
//! Settings are layered: built-in defaults, then a JSON settings file, then
//! whatever the command line overrides.

use std::{
    fmt,
    fs::read_to_string,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::{Context, Result};
use fib_font_engine::{FontEngine, FontForgeEngine, SfntEngine};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::dry_run::DryRunEngine;

/// Settings file name inside the user configuration directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Directory holding the effect scripts when nothing else is configured.
const DEFAULT_SCRIPTS_DIR: &str = "fffilters";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    FontForge,
    Sfnt,
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EngineKind::FontForge => "fontforge",
            EngineKind::Sfnt => "sfnt",
        })
    }
}

impl FromStr for EngineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fontforge" => Ok(EngineKind::FontForge),
            "sfnt" => Ok(EngineKind::Sfnt),
            _ => Err(format!("unknown engine '{s}' (expected 'fontforge' or 'sfnt')")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineKind,
    /// FontForge executable, used by the engine and to run effect scripts.
    pub fontforge: String,
    /// TTF to EOT converter executable.
    pub ttf2eot: String,
    /// Directory containing `fffshadow.pe`, `fffoutline.pe` and `fffinline.pe`.
    pub scripts_dir: PathBuf,
    /// Treat a failing external command as an error instead of a warning.
    pub strict: bool,
    /// Print external commands instead of running them.
    pub dry_run: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineKind::default(),
            fontforge: "fontforge".to_string(),
            ttf2eot: "ttf2eot".to_string(),
            scripts_dir: default_scripts_dir(),
            strict: false,
            dry_run: false,
        }
    }
}

fn default_scripts_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("fib").join(DEFAULT_SCRIPTS_DIR))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCRIPTS_DIR))
}

impl Settings {
    /// `<config_dir>/fib/settings.json`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("fib").join(SETTINGS_FILE))
    }

    /// Load settings from `explicit`, or from the default location if present.
    ///
    /// An explicit file must be readable and valid. A broken default file is
    /// reported and ignored.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            debug!("No settings file found, using defaults");
            return Ok(Self::default());
        };

        match Self::from_file(&path) {
            Ok(settings) => Ok(settings),
            Err(e) => {
                warn!("Ignoring settings file {}: {e:#}", path.display());
                Ok(Self::default())
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn script_path(&self, script: &str) -> PathBuf {
        self.scripts_dir.join(script)
    }

    /// The configured engine. Under `dry_run` its write operations only print.
    pub fn build_engine(&self) -> Box<dyn FontEngine> {
        let engine: Box<dyn FontEngine> = match self.engine {
            EngineKind::FontForge => Box::new(FontForgeEngine::new(self.fontforge.clone())),
            EngineKind::Sfnt => Box::new(SfntEngine),
        };
        if self.dry_run { Box::new(DryRunEngine::new(engine)) } else { engine }
    }
}
