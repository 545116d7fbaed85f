//! CLI frontend for the Mapwright world generator.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "mw",
    about = "Mapwright: procedural worlds with regions, places and lore",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log more (-v for debug, -vv for trace). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a world and print its biome summary
    Generate {
        /// Width in cells
        #[arg(long, default_value = "64")]
        width: i64,

        /// Height in cells
        #[arg(long, default_value = "64")]
        height: i64,

        /// Terrain seed (random if omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip the island falloff
        #[arg(long)]
        flat: bool,

        /// TOML file with generation parameters
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the number of noise octaves
        #[arg(long)]
        octaves: Option<u32>,

        /// Override the heightmap smoothing passes
        #[arg(long)]
        smoothing: Option<u32>,

        /// Write the world snapshot as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show a saved world snapshot
    Show {
        /// Snapshot file written by `generate --output` or the bridge
        snapshot: PathBuf,
    },

    /// Print an ASCII biome map of a snapshot
    Map {
        /// Snapshot file
        snapshot: PathBuf,

        /// Print the glyph legend below the map
        #[arg(short, long)]
        legend: bool,
    },

    /// Suggest sites for points of interest
    Sites {
        /// Snapshot file
        snapshot: PathBuf,

        /// Fraction of cells to suggest
        #[arg(short, long, default_value = "0.01")]
        density: f64,

        /// Sampling seed (defaults to the world seed)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Serve JSON-lines tool requests on stdin/stdout
    Bridge {
        /// Directory for saved worlds (enables save_world / load_world)
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Seed for generated names and descriptions
        #[arg(long)]
        prose_seed: Option<u64>,

        /// TOML file with generation parameters
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            width,
            height,
            seed,
            flat,
            config,
            octaves,
            smoothing,
            output,
        } => commands::generate::run(&commands::generate::GenerateArgs {
            width,
            height,
            seed,
            island: !flat,
            config,
            octaves,
            smoothing,
            output,
        }),
        Commands::Show { snapshot } => commands::show::run(&snapshot),
        Commands::Map { snapshot, legend } => commands::map::run(&snapshot, legend),
        Commands::Sites {
            snapshot,
            density,
            seed,
        } => commands::sites::run(&snapshot, density, seed),
        Commands::Bridge {
            data_dir,
            prose_seed,
            config,
        } => commands::bridge::run(data_dir.as_deref(), prose_seed, config.as_deref()),
    }
}
