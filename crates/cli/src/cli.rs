//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use fib_core::{
    DryRunRunner, Effect, EngineKind, FibError, FontEngine, OutputFormat, ProcessRunner, Settings,
    ShellRunner, foundry, package::PackageOptions,
};

use crate::commands::{apply_effect, convert, create_package, sync_package, validate_package};

#[derive(Parser)]
#[command(name = "fib", version)]
#[command(about = "A swiss-knife for working with font files")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct GlobalArgs {
    /// Settings file (defaults to <config dir>/fib/settings.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Font engine used to open and generate fonts
    #[arg(long, global = true, env = "FIB_ENGINE")]
    pub engine: Option<EngineKind>,
    /// FontForge executable
    #[arg(long, global = true, env = "FIB_FONTFORGE")]
    pub fontforge: Option<String>,
    /// TTF to EOT converter executable
    #[arg(long, global = true, env = "FIB_TTF2EOT")]
    pub ttf2eot: Option<String>,
    /// Directory holding the effect scripts
    #[arg(long, global = true, env = "FIB_SCRIPTS_DIR")]
    pub scripts_dir: Option<PathBuf>,
    /// Fail when an external script or converter fails
    #[arg(long, global = true)]
    pub strict: bool,
    /// Print external commands instead of running them
    #[arg(long, global = true)]
    pub dry_run: bool,
}

impl GlobalArgs {
    /// Settings file values with command-line overrides applied.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::load(self.config.as_deref())?;
        if let Some(engine) = self.engine {
            settings.engine = engine;
        }
        if let Some(fontforge) = &self.fontforge {
            settings.fontforge = fontforge.clone();
        }
        if let Some(ttf2eot) = &self.ttf2eot {
            settings.ttf2eot = ttf2eot.clone();
        }
        if let Some(scripts_dir) = &self.scripts_dir {
            settings.scripts_dir = scripts_dir.clone();
        }
        settings.strict |= self.strict;
        settings.dry_run |= self.dry_run;
        Ok(settings)
    }
}

fn existing_path(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.exists() { Ok(path) } else { Err(format!("path '{value}' does not exist")) }
}

#[derive(Debug, Clone, clap::Args)]
pub struct ConvertArgs {
    /// WOFF format
    #[arg(short, long)]
    pub woff: bool,
    /// TrueType format
    #[arg(short, long)]
    pub ttf: bool,
    /// OpenType format
    #[arg(short, long)]
    pub otf: bool,
    /// SVG format
    #[arg(short, long)]
    pub svg: bool,
    /// SFD format (FontForge)
    #[arg(short = 'f', long)]
    pub sfd: bool,
    /// UFO format
    #[arg(short, long)]
    pub ufo: bool,
    /// EOT format
    #[arg(short, long)]
    pub eot: bool,
    /// Make a ready-to-use webfont package
    #[arg(short, long)]
    pub pack_webfont: bool,
    /// Write converted files here instead of next to each input
    #[arg(short = 'd', long)]
    pub output_dir: Option<PathBuf>,
    #[arg(required = true, value_parser = existing_path)]
    pub files: Vec<PathBuf>,
}

impl ConvertArgs {
    pub fn formats(&self) -> Vec<OutputFormat> {
        [
            (self.woff, OutputFormat::Woff),
            (self.ttf, OutputFormat::Ttf),
            (self.otf, OutputFormat::Otf),
            (self.svg, OutputFormat::Svg),
            (self.sfd, OutputFormat::Sfd),
            (self.ufo, OutputFormat::Ufo),
            (self.eot, OutputFormat::Eot),
        ]
        .into_iter()
        .filter_map(|(selected, format)| selected.then_some(format))
        .collect()
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert fonts to and from various formats
    Convert(ConvertArgs),
    /// Create and maintain font packages
    #[command(subcommand)]
    Pkg(PkgCommands),
    /// Apply a shadow effect
    EffectShadow {
        /// Angle in degrees
        #[arg(short, long, default_value_t = 45, allow_negative_numbers = true)]
        angle: i32,
        /// Outline stroke width
        #[arg(short, long, default_value_t = 5)]
        outline_width: i32,
        /// Shadow depth
        #[arg(short, long, default_value_t = 30)]
        shadow_width: i32,
        #[arg(required = true, value_parser = existing_path)]
        files: Vec<PathBuf>,
    },
    /// Apply an outline effect
    EffectOutline {
        /// Outline stroke width
        #[arg(short, long, default_value_t = 20)]
        outline_width: i32,
        #[arg(required = true, value_parser = existing_path)]
        files: Vec<PathBuf>,
    },
    /// Apply an inline effect
    EffectInline {
        /// Outline stroke width
        #[arg(short, long, default_value_t = 20)]
        outline_width: i32,
        /// Inline gap
        #[arg(short, long, default_value_t = 25)]
        gap: i32,
        #[arg(required = true, value_parser = existing_path)]
        files: Vec<PathBuf>,
    },
    /// Build a font family from a foundry configuration
    #[command(subcommand)]
    Foundry(FoundryCommands),
    /// Transplant one font's spacing into another
    Transpace,
}

#[derive(Subcommand)]
pub enum PkgCommands {
    /// Create a <family>.fontpkg directory from font files
    Create {
        /// Do not ask anything; overwrite an existing package
        #[arg(short, long)]
        yes: bool,
        /// Family name to use instead of the one in the fonts
        #[arg(long)]
        family_name: Option<String>,
        /// Format of the packaged resources
        #[arg(long, value_enum, default_value_t = OutputFormat::Ufo)]
        format: OutputFormat,
        /// Directory in which the package is created
        #[arg(short = 'd', long, default_value = ".")]
        output_dir: PathBuf,
        #[arg(required = true, value_parser = existing_path)]
        files: Vec<PathBuf>,
    },
    /// Update a package's metadata from its fonts
    Sync {
        #[arg(default_value = ".")]
        fontpkg_dir: PathBuf,
    },
    /// Check a package's metadata and resources
    Validate {
        #[arg(value_parser = existing_path)]
        fontpkg_dir: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum FoundryCommands {
    /// Generate the fonts described by a foundry configuration
    Generate {
        #[arg(long)]
        config_file: Option<PathBuf>,
        files: Vec<PathBuf>,
    },
    /// Write a starter foundry configuration
    Init,
}

impl Commands {
    /// Whether the command opens fonts or runs FontForge scripts.
    pub fn requires_engine(&self) -> bool {
        matches!(
            self,
            Commands::Convert(_)
                | Commands::Pkg(PkgCommands::Create { .. })
                | Commands::EffectShadow { .. }
                | Commands::EffectOutline { .. }
                | Commands::EffectInline { .. }
        )
    }

    pub fn run(self, settings: &Settings, engine: &dyn FontEngine) -> Result<()> {
        let runner: Box<dyn ProcessRunner> = if settings.dry_run {
            Box::new(DryRunRunner::echoing())
        } else {
            Box::new(ShellRunner)
        };
        let runner = runner.as_ref();

        match self {
            Commands::Convert(args) if args.pack_webfont => {
                return Err(FibError::NotImplemented("convert --pack-webfont").into());
            }
            Commands::Convert(args) => {
                let formats = args.formats();
                convert(settings, engine, runner, &formats, args.output_dir.as_deref(), &args.files)?;
            }
            Commands::Pkg(PkgCommands::Create { yes, family_name, format, output_dir, files }) => {
                let options = PackageOptions {
                    family_name,
                    format,
                    parent_dir: output_dir,
                    dry_run: settings.dry_run,
                };
                create_package(settings, engine, runner, yes, &options, &files)?;
            }
            Commands::Pkg(PkgCommands::Sync { fontpkg_dir }) => sync_package(&fontpkg_dir)?,
            Commands::Pkg(PkgCommands::Validate { fontpkg_dir }) => validate_package(&fontpkg_dir)?,
            Commands::EffectShadow { angle, outline_width, shadow_width, files } => {
                let effect = Effect::Shadow { angle, outline_width, shadow_width };
                apply_effect(settings, runner, &effect, &files)?;
            }
            Commands::EffectOutline { outline_width, files } => {
                apply_effect(settings, runner, &Effect::Outline { outline_width }, &files)?;
            }
            Commands::EffectInline { outline_width, gap, files } => {
                apply_effect(settings, runner, &Effect::Inline { outline_width, gap }, &files)?;
            }
            Commands::Foundry(FoundryCommands::Generate { config_file, files }) => {
                foundry::generate(config_file.as_deref(), &files)?;
            }
            Commands::Foundry(FoundryCommands::Init) => foundry::init()?,
            Commands::Transpace => return Err(FibError::NotImplemented("transpace").into()),
        }
        Ok(())
    }
}
