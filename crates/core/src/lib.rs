//! fib core: format conversion, effects and font packages on top of an
//! external font engine.

pub mod batch;
pub mod config;
pub mod convert;
pub mod dry_run;
pub mod effects;
pub mod error;
pub mod foundry;
pub mod package;
pub mod process;
pub mod prompt;
pub mod resolver;

pub use batch::{BatchResult, run_batch};
pub use config::{EngineKind, Settings};
pub use convert::{Converter, output_path};
pub use dry_run::DryRunEngine;
pub use effects::{Effect, EffectInvoker};
pub use error::FibError;
pub use fib_font_engine::{FontEngine, FontHandle, FontInfo, OutputFormat};
pub use process::{DryRunRunner, ProcessOutput, ProcessRunner, ShellRunner};
pub use prompt::{
    Answer, AssumeDefaults, Console, Prompt, ScriptedPrompt, StreamConsole, TerminalPrompt,
};
pub use resolver::{Attribute, Resolution, resolve, resolve_files};
