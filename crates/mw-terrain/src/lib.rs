//! Procedural terrain for Mapwright: noise, heightmaps, biomes, and meshes.
//!
//! The generation pipeline runs leaf-first: a seeded [`NoiseField`] feeds the
//! heightmap builder, the heightmap drives moisture and biome classification,
//! and the mesh builder turns both grids into render-ready buffers. Every stage
//! is deterministic for a given seed and [`GenerationConfig`].

/// Elevation/moisture classification into biome labels.
pub mod biome;
/// Tunable generation parameters.
pub mod config;
/// Error types for terrain generation.
pub mod error;
/// Dense row-major 2D grids.
pub mod grid;
/// Heightmap synthesis with optional island falloff.
pub mod heightmap;
/// Vertex/color/index buffers for external renderers.
pub mod mesh;
/// Seeded gradient noise.
pub mod noise;
/// Weighted-random candidate sites for points of interest.
pub mod placement;

pub use biome::{Biome, BiomeClassification, BiomeClassifier, BiomeRule};
pub use config::GenerationConfig;
pub use error::{TerrainError, TerrainResult};
pub use grid::Grid;
pub use heightmap::HeightmapBuilder;
pub use mesh::{BiomePalette, MeshBuffer, MeshBuilder, Rgb};
pub use noise::NoiseField;
pub use placement::{MAX_POI_SITES, PoiSite, SiteSuitability, sample_poi_sites};

/// Everything the pipeline produces for one seed.
#[derive(Debug, Clone)]
pub struct Terrain {
    /// Elevation in `[0, 1]`.
    pub elevation: Grid<f64>,
    /// Moisture in `[0, 1]`.
    pub moisture: Grid<f64>,
    /// Biome label per cell.
    pub biomes: Grid<Biome>,
    /// Cell count per biome; totals `width * height`.
    pub histogram: std::collections::BTreeMap<Biome, usize>,
    /// Renderer buffers derived from elevation and biomes.
    pub mesh: MeshBuffer,
}

/// Run the full pipeline: noise, heightmap, moisture, biomes, mesh.
pub fn generate(
    width: usize,
    height: usize,
    seed: u64,
    island: bool,
    config: &GenerationConfig,
) -> TerrainResult<Terrain> {
    let noise = NoiseField::new(seed);
    let builder = HeightmapBuilder::new(config);
    let elevation = if island {
        builder.build_island(width, height, &noise, config.island_factor)?
    } else {
        builder.build(width, height, &noise, config.scale)?
    };

    let classifier = BiomeClassifier::default();
    let moisture = classifier.derive_moisture(&elevation, seed, config.moisture_jitter);
    let BiomeClassification { biomes, histogram } =
        classifier.classify_grid(&elevation, &moisture)?;

    let mesh = MeshBuilder::new(config.vertical_scale).build_colored_mesh(&elevation, &biomes)?;

    tracing::debug!(
        width,
        height,
        seed,
        island,
        vertices = mesh.vertex_count(),
        "terrain generated"
    );

    Ok(Terrain {
        elevation,
        moisture,
        biomes,
        histogram,
        mesh,
    })
}
