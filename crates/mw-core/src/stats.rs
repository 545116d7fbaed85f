use std::collections::BTreeMap;

use mw_terrain::Biome;
use serde::{Deserialize, Serialize};

/// Running aggregate counts for a world.
///
/// `poi_count`, `lore_entries` and `timeline_events` are recomputed from the
/// collection sizes after every insertion. `named_regions` counts distinct
/// coordinates that have ever been named.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStats {
    /// Cell count per biome; sums to `width * height`.
    pub biome_distribution: BTreeMap<Biome, usize>,
    pub poi_count: usize,
    pub named_regions: usize,
    pub lore_entries: usize,
    #[serde(default)]
    pub timeline_events: usize,
}

impl WorldStats {
    /// Zeroed overlay counts on top of a terrain histogram.
    pub fn from_histogram(biome_distribution: BTreeMap<Biome, usize>) -> Self {
        Self {
            biome_distribution,
            ..Self::default()
        }
    }

    /// Total number of classified cells.
    pub fn total_cells(&self) -> usize {
        self.biome_distribution.values().sum()
    }

    /// The most common biome, ties broken by biome order.
    pub fn dominant_biome(&self) -> Option<Biome> {
        self.biome_distribution
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then(b.0.cmp(a.0)))
            .map(|(biome, _)| *biome)
    }
}
