use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};
use mw_core::World;

pub fn run(path: &Path) -> miette::Result<()> {
    let world = super::load_snapshot(path)?;
    print_overview(&world);

    let named: Vec<_> = world
        .regions()
        .into_iter()
        .filter(|r| r.name.is_some())
        .collect();
    if !named.is_empty() {
        println!();
        println!("  {}", "Named regions".bold());
        for region in named {
            let at = region.coord().to_string();
            println!("  {at:>9}  {} [{}]", region.display_name(), region.biome);
        }
    }

    let pois: Vec<_> = world.pois().collect();
    if !pois.is_empty() {
        println!();
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Id", "Name", "Type", "At", "Biome", "NPCs"]);
        for poi in &pois {
            table.add_row(vec![
                poi.id.to_string(),
                poi.name.clone(),
                poi.poi_type.clone(),
                format!("({}, {})", poi.x, poi.y),
                poi.biome.to_string(),
                poi.npcs.len().to_string(),
            ]);
        }
        println!("{table}");
        println!("  {} points of interest", pois.len());
    }

    let lore: Vec<_> = world.lore().collect();
    if !lore.is_empty() {
        println!();
        println!("  {}", "Lore".bold());
        for entry in lore {
            println!("  {} {}", entry.title, format!("[{}]", entry.lore_type).dimmed());
        }
    }

    let timeline = world.timeline();
    if !timeline.is_empty() {
        println!();
        println!("  {}", "Timeline".bold());
        for event in timeline.entries() {
            println!("  {:>30}  {} [{}]", event.date, event.description, event.event_type);
        }
    }

    Ok(())
}

/// Header line plus a biome distribution table.
pub fn print_overview(world: &World) {
    let stats = world.stats();
    println!(
        "  {} {} {}",
        "World".bold(),
        world.id,
        format!(
            "({}x{}, seed={}, {})",
            world.width, world.height, world.seed, world.mode
        )
        .dimmed()
    );
    if let Some(biome) = stats.dominant_biome() {
        println!("  dominant biome: {biome}");
    }
    println!();

    let total = stats.total_cells();
    let mut rows: Vec<_> = stats
        .biome_distribution
        .iter()
        .filter(|(_, count)| **count > 0)
        .collect();
    rows.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Biome", "Cells", "Share"]);
    for (biome, count) in rows {
        table.add_row(vec![
            biome.to_string(),
            count.to_string(),
            super::percent(*count, total),
        ]);
    }
    println!("{table}");
    println!(
        "  {} cells, {} points of interest, {} named regions",
        total, stats.poi_count, stats.named_regions
    );
}
