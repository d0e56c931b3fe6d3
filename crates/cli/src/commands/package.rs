use std::path::{Path, PathBuf};

use anyhow::Result;
use fib_core::{
    AssumeDefaults, Converter, FibError, FontEngine, ProcessRunner, Prompt, Settings,
    TerminalPrompt, package::{self, PackageOptions},
};

use crate::console::EditorConsole;

pub fn create_package(
    settings: &Settings,
    engine: &dyn FontEngine,
    runner: &dyn ProcessRunner,
    assume_yes: bool,
    options: &PackageOptions,
    files: &[PathBuf],
) -> Result<()> {
    let converter = Converter::new(settings, runner);
    let mut defaults = AssumeDefaults;
    let mut terminal;
    let prompt: &mut dyn Prompt = if assume_yes {
        &mut defaults
    } else {
        terminal = TerminalPrompt::new(EditorConsole::new()?);
        &mut terminal
    };

    package::create_package(engine, &converter, prompt, files, options)?;
    Ok(())
}

pub fn validate_package(dir: &Path) -> Result<()> {
    let report = package::validate_package(dir)?;
    if report.is_valid() {
        println!("{}: valid ({} resources)", dir.display(), report.resources.len());
        return Ok(());
    }

    for problem in &report.problems {
        println!("{}: {problem}", dir.display());
    }
    Err(FibError::InvalidPackage { path: dir.to_path_buf(), problems: report.problems.len() }
        .into())
}

pub fn sync_package(dir: &Path) -> Result<()> {
    package::sync_package(dir)
}
