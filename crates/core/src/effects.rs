//! Decorative effects applied by external FontForge scripts.

use std::path::{Path, PathBuf};

use anyhow::Result;
use log::info;

use crate::{
    batch::{BatchResult, run_batch},
    config::Settings,
    process::{ProcessRunner, run_checked},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    Shadow { angle: i32, outline_width: i32, shadow_width: i32 },
    Outline { outline_width: i32 },
    Inline { outline_width: i32, gap: i32 },
}

impl Effect {
    pub const DEFAULT_SHADOW: Effect =
        Effect::Shadow { angle: 45, outline_width: 5, shadow_width: 30 };
    pub const DEFAULT_OUTLINE: Effect = Effect::Outline { outline_width: 20 };
    pub const DEFAULT_INLINE: Effect = Effect::Inline { outline_width: 20, gap: 25 };

    pub fn name(&self) -> &'static str {
        match self {
            Effect::Shadow { .. } => "shadow",
            Effect::Outline { .. } => "outline",
            Effect::Inline { .. } => "inline",
        }
    }

    /// Suffix appended to the output file stem.
    pub fn suffix(&self) -> &'static str {
        match self {
            Effect::Shadow { .. } => "-Shadow",
            Effect::Outline { .. } => "-Outline",
            Effect::Inline { .. } => "-Inline",
        }
    }

    /// Script file name inside the scripts directory.
    pub fn script(&self) -> &'static str {
        match self {
            Effect::Shadow { .. } => "fffshadow.pe",
            Effect::Outline { .. } => "fffoutline.pe",
            Effect::Inline { .. } => "fffinline.pe",
        }
    }

    /// Numeric script parameters, in the order the script expects them.
    pub fn params(&self) -> Vec<i32> {
        match *self {
            Effect::Shadow { angle, outline_width, shadow_width } => {
                vec![angle, outline_width, shadow_width]
            }
            Effect::Outline { outline_width } => vec![outline_width],
            Effect::Inline { outline_width, gap } => vec![outline_width, gap],
        }
    }

    /// `<input without extension><suffix><extension>`, e.g. `A.sfd` -> `A-Outline.sfd`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let file_name = match input.extension() {
            Some(ext) => format!("{stem}{}.{}", self.suffix(), ext.to_string_lossy()),
            None => format!("{stem}{}", self.suffix()),
        };
        input.with_file_name(file_name)
    }

    /// Positional script arguments: input, output, then the parameters.
    pub fn arguments(&self, input: &Path) -> Vec<String> {
        let mut args =
            vec![input.display().to_string(), self.output_path(input).display().to_string()];
        args.extend(self.params().iter().map(ToString::to_string));
        args
    }
}

pub struct EffectInvoker<'a> {
    settings: &'a Settings,
    runner: &'a dyn ProcessRunner,
}

impl<'a> EffectInvoker<'a> {
    pub fn new(settings: &'a Settings, runner: &'a dyn ProcessRunner) -> Self {
        Self { settings, runner }
    }

    /// `<fontforge> -script <scripts_dir>/<script> <arguments...>`
    pub fn command_line(&self, effect: &Effect, input: &Path) -> String {
        let script = self.settings.script_path(effect.script());
        format!(
            "{} -script {} {}",
            self.settings.fontforge,
            script.display(),
            effect.arguments(input).join(" ")
        )
    }

    /// Apply `effect` to one file. Returns the output path and whether the
    /// script reported success.
    pub fn apply(&self, effect: &Effect, input: &Path) -> Result<(PathBuf, bool)> {
        let output = effect.output_path(input);
        let ok = run_checked(self.runner, &self.command_line(effect, input), self.settings.strict)?;
        if ok {
            info!("{} -> {}", input.display(), output.display());
        }
        Ok((output, ok))
    }

    /// Apply `effect` to every file. A failing file does not stop the rest.
    pub fn apply_all(&self, effect: &Effect, inputs: &[PathBuf]) -> BatchResult {
        let label = format!("Apply {} effect", effect.name());
        run_batch(&label, inputs, |input| Ok(self.apply(effect, input)?.1))
    }
}
