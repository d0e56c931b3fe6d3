use std::process::exit;

use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use fib_cli::cli::Cli;

fn main() -> Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = cli.global.settings()?;
    let engine = settings.build_engine();

    if cli.command.requires_engine()
        && let Err(e) = engine.probe()
    {
        eprintln!();
        eprintln!("ERROR: Could not use the {} font engine!", engine.name());
        eprintln!();
        eprintln!("{e}");
        eprintln!("Install FontForge with its Python bindings through your package manager,");
        eprintln!("point --fontforge (or FIB_FONTFORGE) at the executable, or pass --engine sfnt.");
        exit(1);
    }

    cli.command.run(&settings, engine.as_ref())
}
