use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::error::TerrainResult;
use crate::grid::Grid;

/// Linear RGB in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    /// Color for labels missing from a palette.
    pub const NEUTRAL_GRAY: Rgb = Rgb([0.5, 0.5, 0.5]);
}

/// Biome to vertex color lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomePalette {
    colors: BTreeMap<Biome, Rgb>,
}

impl Default for BiomePalette {
    fn default() -> Self {
        let colors = [
            (Biome::Ocean, [0.0, 0.4, 0.8]),
            (Biome::Beach, [0.9, 0.8, 0.6]),
            (Biome::Swamp, [0.3, 0.5, 0.2]),
            (Biome::Forest, [0.1, 0.4, 0.1]),
            (Biome::Jungle, [0.1, 0.5, 0.1]),
            (Biome::Grassland, [0.4, 0.6, 0.3]),
            (Biome::Plains, [0.6, 0.7, 0.4]),
            (Biome::Desert, [0.8, 0.7, 0.5]),
            (Biome::Hills, [0.5, 0.4, 0.3]),
            (Biome::Mountain, [0.5, 0.5, 0.5]),
            (Biome::Snow, [0.9, 0.9, 0.9]),
            (Biome::Tundra, [0.7, 0.8, 0.9]),
        ]
        .into_iter()
        .map(|(biome, rgb)| (biome, Rgb(rgb)))
        .collect();
        Self { colors }
    }
}

impl BiomePalette {
    /// A palette with no entries; every biome renders gray.
    pub fn empty() -> Self {
        Self {
            colors: BTreeMap::new(),
        }
    }

    /// Override or add one entry.
    pub fn with_color(mut self, biome: Biome, rgb: Rgb) -> Self {
        self.colors.insert(biome, rgb);
        self
    }

    /// Color for `biome`, or [`Rgb::NEUTRAL_GRAY`] if the palette lacks it.
    pub fn color(&self, biome: Biome) -> Rgb {
        self.colors
            .get(&biome)
            .copied()
            .unwrap_or(Rgb::NEUTRAL_GRAY)
    }
}

/// Flat vertex/color/index buffers for an external renderer.
///
/// Vertex `i` is cell `(i % width, i / width)`, stored as `(x, elevation, y)`.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshBuffer {
    /// Grid width the mesh was built from.
    pub width: usize,
    /// Grid height the mesh was built from.
    pub height: usize,
    /// `3 * width * height` position components.
    pub vertices: Vec<f32>,
    /// `3 * width * height` color components.
    pub colors: Vec<f32>,
    /// `6 * (width - 1) * (height - 1)` triangle indices.
    pub indices: Vec<u32>,
}

impl MeshBuffer {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Turns a heightmap and biome grid into a colored triangle mesh.
#[derive(Debug, Clone)]
pub struct MeshBuilder {
    vertical_scale: f64,
    palette: BiomePalette,
}

impl MeshBuilder {
    pub fn new(vertical_scale: f64) -> Self {
        Self {
            vertical_scale,
            palette: BiomePalette::default(),
        }
    }

    pub fn with_palette(mut self, palette: BiomePalette) -> Self {
        self.palette = palette;
        self
    }

    /// One vertex and color per cell, two triangles per quad.
    ///
    /// Quad `(x, y)` emits `[a, b, c]` and `[c, b, d]` where `a = (x, y)`,
    /// `b = (x + 1, y)`, `c = (x, y + 1)`, `d = (x + 1, y + 1)`.
    pub fn build_colored_mesh(
        &self,
        heightmap: &Grid<f64>,
        biomes: &Grid<Biome>,
    ) -> TerrainResult<MeshBuffer> {
        heightmap.ensure_same_shape(biomes)?;
        let (width, height) = heightmap.dims();

        let mut vertices = Vec::with_capacity(3 * width * height);
        let mut colors = Vec::with_capacity(3 * width * height);
        for ((x, y, elevation), biome) in heightmap.iter_cells().zip(biomes.cells()) {
            vertices.extend([x as f32, (elevation * self.vertical_scale) as f32, y as f32]);
            colors.extend(self.palette.color(*biome).0);
        }

        let quads = width.saturating_sub(1) * height.saturating_sub(1);
        let mut indices = Vec::with_capacity(6 * quads);
        let w = width as u32;
        for y in 0..height.saturating_sub(1) as u32 {
            for x in 0..width.saturating_sub(1) as u32 {
                let a = y * w + x;
                let b = a + 1;
                let c = a + w;
                let d = c + 1;
                indices.extend([a, b, c, c, b, d]);
            }
        }

        Ok(MeshBuffer {
            width,
            height,
            vertices,
            colors,
            indices,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat(width: usize, height: usize) -> (Grid<f64>, Grid<Biome>) {
        (
            Grid::from_fn(width, height, |_, _| 0.5).unwrap(),
            Grid::from_fn(width, height, |_, _| Biome::Grassland).unwrap(),
        )
    }

    #[test]
    fn two_by_two_winding() {
        let (h, b) = flat(2, 2);
        let mesh = MeshBuilder::new(5.0).build_colored_mesh(&h, &b).unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2, 2, 1, 3]);
        assert_eq!(&mesh.vertices[..3], &[0.0, 2.5, 0.0]);
        assert_eq!(&mesh.vertices[9..], &[1.0, 2.5, 1.0]);
    }

    #[test]
    fn colors_follow_palette() {
        let h = Grid::from_fn(2, 1, |_, _| 0.0).unwrap();
        let b = Grid::from_fn(2, 1, |x, _| if x == 0 { Biome::Ocean } else { Biome::Snow }).unwrap();
        let mesh = MeshBuilder::new(1.0).build_colored_mesh(&h, &b).unwrap();
        assert_eq!(mesh.colors, vec![0.0, 0.4, 0.8, 0.9, 0.9, 0.9]);
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn missing_palette_entry_is_gray() {
        let (h, b) = flat(1, 1);
        let mesh = MeshBuilder::new(1.0)
            .with_palette(BiomePalette::empty())
            .build_colored_mesh(&h, &b)
            .unwrap();
        assert_eq!(mesh.colors, Rgb::NEUTRAL_GRAY.0.to_vec());
    }

    #[test]
    fn mismatched_grids_rejected() {
        let h = Grid::from_fn(3, 3, |_, _| 0.0).unwrap();
        let b = Grid::from_fn(3, 2, |_, _| Biome::Ocean).unwrap();
        assert!(MeshBuilder::new(1.0).build_colored_mesh(&h, &b).is_err());
    }

    proptest! {
        #[test]
        fn buffer_sizes(w in 1usize..30, h in 1usize..30) {
            let (hm, b) = flat(w, h);
            let mesh = MeshBuilder::new(5.0).build_colored_mesh(&hm, &b).unwrap();
            prop_assert_eq!(mesh.vertices.len(), 3 * w * h);
            prop_assert_eq!(mesh.colors.len(), 3 * w * h);
            prop_assert_eq!(mesh.indices.len(), 6 * (w - 1) * (h - 1));
            prop_assert!(mesh.indices.iter().all(|&i| (i as usize) < w * h));
        }
    }
}
