//! Format conversion through the engine and the external EOT converter.

use std::{
    fs::remove_file,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fib_font_engine::{FontHandle, OutputFormat};
use log::{debug, info};

use crate::{
    config::Settings,
    process::{ProcessRunner, run_checked},
};

/// Marker for the TTF intermediate when `<stem>.ttf` is already taken.
const INTERMEDIATE_SUFFIX: &str = "fib-intermediate";

/// `<input-stem>.<extension>` in `output_dir`, or next to the input.
pub fn output_path(input: &Path, format: OutputFormat, output_dir: Option<&Path>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = format!("{stem}.{}", format.extension());
    match output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

fn is_truetype(path: &Path) -> bool {
    OutputFormat::from_path(path) == Some(OutputFormat::Ttf)
}

pub struct Converter<'a> {
    settings: &'a Settings,
    runner: &'a dyn ProcessRunner,
}

impl<'a> Converter<'a> {
    pub fn new(settings: &'a Settings, runner: &'a dyn ProcessRunner) -> Self {
        Self { settings, runner }
    }

    /// Convert `font` to `format` and return the output path.
    pub fn convert(
        &self,
        font: &dyn FontHandle,
        format: OutputFormat,
        output_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        let output = output_path(font.path(), format, output_dir);
        match format {
            OutputFormat::Sfd => font
                .save(&output)
                .with_context(|| format!("Failed to save {}", output.display()))?,
            OutputFormat::Eot if is_truetype(font.path()) => {
                self.ttf_to_eot(font.path(), &output)?;
            }
            OutputFormat::Eot => self.eot_via_intermediate(font, &output)?,
            _ => font
                .generate(&output, format)
                .with_context(|| format!("Failed to generate {}", output.display()))?,
        }
        info!("{} -> {}", font.path().display(), output.display());
        Ok(output)
    }

    /// Convert `font` to every format in `formats`, in [`OutputFormat::ALL`] order.
    ///
    /// A TTF produced in the same run is reused for EOT output and kept.
    pub fn convert_all(
        &self,
        font: &dyn FontHandle,
        formats: &[OutputFormat],
        output_dir: Option<&Path>,
    ) -> Result<Vec<PathBuf>> {
        let mut outputs = Vec::new();
        let mut generated_ttf: Option<PathBuf> = None;

        for format in OutputFormat::ALL.into_iter().filter(|f| formats.contains(f)) {
            let output = match (format, &generated_ttf) {
                (OutputFormat::Eot, Some(ttf)) => {
                    let eot = output_path(font.path(), OutputFormat::Eot, output_dir);
                    self.ttf_to_eot(ttf, &eot)?;
                    eot
                }
                _ => self.convert(font, format, output_dir)?,
            };
            if format == OutputFormat::Ttf {
                generated_ttf = Some(output.clone());
            }
            outputs.push(output);
        }
        Ok(outputs)
    }

    fn eot_via_intermediate(&self, font: &dyn FontHandle, eot: &Path) -> Result<()> {
        let mut ttf = eot.with_extension(OutputFormat::Ttf.extension());
        if ttf.exists() {
            ttf = eot.with_extension(format!("{INTERMEDIATE_SUFFIX}.ttf"));
        }

        debug!("Generating intermediate {}", ttf.display());
        font.generate(&ttf, OutputFormat::Ttf)
            .with_context(|| format!("Failed to generate {}", ttf.display()))?;

        let converted = self.ttf_to_eot(&ttf, eot);
        if ttf.exists() {
            remove_file(&ttf)
                .with_context(|| format!("Failed to remove intermediate {}", ttf.display()))?;
        }
        converted
    }

    /// Paths are interpolated verbatim; shell metacharacters in file names are
    /// not escaped.
    fn ttf_to_eot(&self, ttf: &Path, eot: &Path) -> Result<()> {
        let command = format!("{} {} {}", self.settings.ttf2eot, ttf.display(), eot.display());
        run_checked(self.runner, &command, self.settings.strict)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_input() {
        let path = output_path(Path::new("fonts/Foo-Bold.ttf"), OutputFormat::Otf, None);
        assert_eq!(path, PathBuf::from("fonts/Foo-Bold.otf"));

        let bare = output_path(Path::new("Foo-Bold.ttf"), OutputFormat::Otf, None);
        assert_eq!(bare, PathBuf::from("Foo-Bold.otf"));
    }

    #[test]
    fn test_output_path_in_output_dir() {
        let path = output_path(Path::new("src/Foo.sfd"), OutputFormat::Ufo, Some(Path::new("out")));
        assert_eq!(path, PathBuf::from("out/Foo.ufo"));
    }

    #[test]
    fn test_output_path_keeps_inner_dots() {
        let path = output_path(Path::new("Foo.v2.sfd"), OutputFormat::Woff, None);
        assert_eq!(path, PathBuf::from("Foo.v2.woff"));
    }

    #[test]
    fn test_is_truetype() {
        assert!(is_truetype(Path::new("a/Foo.TTF")));
        assert!(!is_truetype(Path::new("a/Foo.otf")));
    }
}
