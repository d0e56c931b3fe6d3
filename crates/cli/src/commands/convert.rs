use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use fib_core::{Converter, FontEngine, OutputFormat, ProcessRunner, Settings};

/// Convert every file to every selected format, one file at a time.
pub fn convert(
    settings: &Settings,
    engine: &dyn FontEngine,
    runner: &dyn ProcessRunner,
    formats: &[OutputFormat],
    output_dir: Option<&Path>,
    files: &[PathBuf],
) -> Result<()> {
    if formats.is_empty() {
        println!("No output format selected, nothing to do");
        return Ok(());
    }

    if let Some(dir) = output_dir.filter(|_| !settings.dry_run) {
        create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    let converter = Converter::new(settings, runner);
    for file in files {
        let font = engine
            .open(file)
            .with_context(|| format!("Failed to open font: {}", file.display()))?;
        println!("Converting {}", file.display());
        for output in converter.convert_all(font.as_ref(), formats, output_dir)? {
            println!("  {}", output.display());
        }
    }
    Ok(())
}
