use std::collections::BTreeMap;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use crate::biome::Biome;
use crate::error::{TerrainError, TerrainResult};
use crate::grid::Grid;

/// A candidate location for a point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoiSite {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Biome at the site.
    pub biome: Biome,
}

/// How likely each biome is to host a point of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSuitability {
    weights: BTreeMap<Biome, f64>,
    default_weight: f64,
}

impl Default for SiteSuitability {
    fn default() -> Self {
        let weights = [
            (Biome::Ocean, 0.1),
            (Biome::Beach, 0.5),
            (Biome::Swamp, 0.8),
            (Biome::Forest, 0.9),
            (Biome::Jungle, 1.0),
            (Biome::Grassland, 0.7),
            (Biome::Plains, 0.6),
            (Biome::Desert, 0.7),
            (Biome::Hills, 0.8),
            (Biome::Mountain, 0.4),
            (Biome::Snow, 0.2),
            (Biome::Tundra, 0.3),
        ]
        .into_iter()
        .collect();
        Self {
            weights,
            default_weight: 0.5,
        }
    }
}

impl SiteSuitability {
    /// Override the weight for one biome. Negative weights count as zero.
    pub fn with_weight(mut self, biome: Biome, weight: f64) -> Self {
        self.weights.insert(biome, weight);
        self
    }

    pub fn weight(&self, biome: Biome) -> f64 {
        let w = self
            .weights
            .get(&biome)
            .copied()
            .unwrap_or(self.default_weight);
        if w.is_finite() { w.max(0.0) } else { 0.0 }
    }
}

/// Upper bound on the number of sites one call may draw.
pub const MAX_POI_SITES: usize = 100_000;

/// Draw `round(density * width * height)` sites, each cell chosen with
/// probability proportional to its biome's weight. Draws are independent, so
/// the same cell may appear more than once.
///
/// Requests above [`MAX_POI_SITES`] fail with [`TerrainError::TooManySites`].
/// Reproducible only if `rng` is seeded.
pub fn sample_poi_sites<R: Rng + ?Sized>(
    biomes: &Grid<Biome>,
    density: f64,
    suitability: &SiteSuitability,
    rng: &mut R,
) -> TerrainResult<Vec<PoiSite>> {
    if !density.is_finite() || density <= 0.0 {
        return Ok(Vec::new());
    }
    let requested = density * biomes.len() as f64;
    if requested.round() > MAX_POI_SITES as f64 {
        return Err(TerrainError::TooManySites {
            requested,
            limit: MAX_POI_SITES,
        });
    }
    let target = requested.round() as usize;
    if target == 0 {
        return Ok(Vec::new());
    }

    let weights: Vec<f64> = biomes.cells().iter().map(|b| suitability.weight(*b)).collect();
    let distribution = WeightedIndex::new(&weights).map_err(|_| TerrainError::NoSuitableSites)?;

    let width = biomes.width();
    let sites = (0..target)
        .map(|_| {
            let index = distribution.sample(&mut *rng);
            let (x, y) = (index % width, index / width);
            PoiSite {
                x,
                y,
                biome: biomes.cells()[index],
            }
        })
        .collect();
    Ok(sites)
}
