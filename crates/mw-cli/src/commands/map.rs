use std::path::Path;

use mw_terrain::{Biome, Grid};

/// Single-character glyph for a biome.
pub fn glyph(biome: Biome) -> char {
    match biome {
        Biome::Ocean => '~',
        Biome::Beach => '.',
        Biome::Swamp => '%',
        Biome::Forest => 'f',
        Biome::Jungle => 'J',
        Biome::Grassland => '"',
        Biome::Plains => '-',
        Biome::Desert => ':',
        Biome::Hills => 'n',
        Biome::Mountain => '^',
        Biome::Snow => '*',
        Biome::Tundra => ',',
    }
}

/// One line per row, one glyph per cell.
pub fn render(biomes: &Grid<Biome>) -> String {
    let mut out = String::with_capacity(biomes.len() + biomes.height());
    for row in biomes.rows() {
        out.extend(row.iter().map(|b| glyph(*b)));
        out.push('\n');
    }
    out
}

pub fn run(path: &Path, legend: bool) -> miette::Result<()> {
    let world = super::load_snapshot(path)?;
    print!("{}", render(world.biomes()));

    if legend {
        println!();
        for biome in Biome::ALL {
            let count = world.stats().biome_distribution.get(&biome).copied().unwrap_or(0);
            if count > 0 {
                println!("  {}  {biome}", glyph(biome));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn glyphs_are_unique() {
        let glyphs: HashSet<char> = Biome::ALL.into_iter().map(glyph).collect();
        assert_eq!(glyphs.len(), Biome::ALL.len());
    }

    #[test]
    fn render_draws_rows_top_down() {
        let grid = Grid::from_fn(3, 2, |x, y| match (x, y) {
            (0, 0) => Biome::Mountain,
            (_, 0) => Biome::Ocean,
            _ => Biome::Forest,
        })
        .unwrap();
        assert_eq!(render(&grid), "^~~\nfff\n");
    }
}
