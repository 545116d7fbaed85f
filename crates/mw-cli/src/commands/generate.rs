use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use miette::{IntoDiagnostic, WrapErr};
use mw_core::{GenerationMode, World};

pub struct GenerateArgs {
    pub width: i64,
    pub height: i64,
    pub seed: Option<u64>,
    pub island: bool,
    pub config: Option<PathBuf>,
    pub octaves: Option<u32>,
    pub smoothing: Option<u32>,
    pub output: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs) -> miette::Result<()> {
    let mut config = super::load_config(args.config.as_deref())?;
    if let Some(octaves) = args.octaves {
        config = config.with_octaves(octaves);
    }
    if let Some(passes) = args.smoothing {
        config = config.with_smoothing_passes(passes);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mode = GenerationMode::from_island(args.island);
    let world = World::generate(args.width, args.height, seed, mode, &config)
        .into_diagnostic()
        .wrap_err("generation failed")?;
    tracing::debug!(world = %world.id, seed, "generated");

    super::show::print_overview(&world);

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&world)
            .into_diagnostic()
            .wrap_err("cannot encode world")?;
        fs::write(path, json)
            .into_diagnostic()
            .wrap_err_with(|| format!("cannot write {}", path.display()))?;
        println!();
        println!("  {} {}", "Saved".green(), path.display());
    }

    Ok(())
}
