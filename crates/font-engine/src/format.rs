//! Output formats understood by the engines.

use std::{fmt, path::Path, str::FromStr};

/// A font file format that can be produced from an opened font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Woff,
    Ttf,
    Otf,
    Svg,
    Ufo,
    Sfd,
    Eot,
}

impl OutputFormat {
    /// Every format, in the order `convert` processes them.
    pub const ALL: [OutputFormat; 7] = [
        OutputFormat::Woff,
        OutputFormat::Otf,
        OutputFormat::Ttf,
        OutputFormat::Svg,
        OutputFormat::Ufo,
        OutputFormat::Sfd,
        OutputFormat::Eot,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Woff => "woff",
            OutputFormat::Ttf => "ttf",
            OutputFormat::Otf => "otf",
            OutputFormat::Svg => "svg",
            OutputFormat::Ufo => "ufo",
            OutputFormat::Sfd => "sfd",
            OutputFormat::Eot => "eot",
        }
    }

    /// UFO sources are directories rather than single files.
    pub fn is_directory(self) -> bool {
        matches!(self, OutputFormat::Ufo)
    }

    /// Guess the format of an existing file from its extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        ext.parse().ok()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.extension() == lower)
            .ok_or_else(|| format!("unknown font format '{s}'"))
    }
}
