pub mod bridge;
pub mod generate;
pub mod map;
pub mod show;
pub mod sites;

use std::fs;
use std::path::Path;

use miette::{IntoDiagnostic, WrapErr};
use mw_core::World;
use mw_terrain::GenerationConfig;

/// Read and validate a world snapshot.
fn load_snapshot(path: &Path) -> miette::Result<World> {
    let json = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", path.display()))?;
    let mut world: World = serde_json::from_str(&json)
        .into_diagnostic()
        .wrap_err_with(|| format!("not a world snapshot: {}", path.display()))?;
    world
        .validate()
        .into_diagnostic()
        .wrap_err_with(|| format!("corrupt world snapshot: {}", path.display()))?;
    world.recompute_stats();
    Ok(world)
}

/// Load generation parameters from TOML, or the defaults when no file is given.
fn load_config(path: Option<&Path>) -> miette::Result<GenerationConfig> {
    let Some(path) = path else {
        return Ok(GenerationConfig::default());
    };
    let text = fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("cannot read {}", path.display()))?;
    toml::from_str(&text)
        .into_diagnostic()
        .wrap_err_with(|| format!("invalid config {}", path.display()))
}

/// `count` as a percentage of `total`, one decimal.
fn percent(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".into();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}
