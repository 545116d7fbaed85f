use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use miette::{IntoDiagnostic, WrapErr};
use mw_terrain::{SiteSuitability, sample_poi_sites};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn run(path: &Path, density: f64, seed: Option<u64>) -> miette::Result<()> {
    let world = super::load_snapshot(path)?;
    let seed = seed.unwrap_or(world.seed);
    let mut rng = StdRng::seed_from_u64(seed);
    let sites = sample_poi_sites(world.biomes(), density, &SiteSuitability::default(), &mut rng)
        .into_diagnostic()
        .wrap_err("cannot place sites")?;

    if sites.is_empty() {
        println!("  No sites at density {density}.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["X", "Y", "Biome"]);
    for site in &sites {
        table.add_row(vec![site.x.to_string(), site.y.to_string(), site.biome.to_string()]);
    }
    println!("{table}");
    println!("  {} sites (seed {seed})", sites.len());
    Ok(())
}
