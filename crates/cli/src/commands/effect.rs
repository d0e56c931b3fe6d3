use std::path::PathBuf;

use anyhow::Result;
use fib_core::{Effect, EffectInvoker, ProcessRunner, Settings};

/// Apply `effect` to every file. Script failures only fail the command in
/// strict mode.
pub fn apply_effect(
    settings: &Settings,
    runner: &dyn ProcessRunner,
    effect: &Effect,
    files: &[PathBuf],
) -> Result<()> {
    let result = EffectInvoker::new(settings, runner).apply_all(effect, files);
    if settings.strict {
        result.ok_or_bail(&format!("{} effect", effect.name()))?;
    }
    Ok(())
}
