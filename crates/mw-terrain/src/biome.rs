use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::TerrainResult;
use crate::grid::Grid;

/// Terrain type assigned to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// Open water.
    Ocean,
    /// Shoreline sand.
    Beach,
    /// Waterlogged lowland.
    Swamp,
    /// Temperate woodland.
    Forest,
    /// Dense tropical woodland.
    Jungle,
    /// Open grass.
    Grassland,
    /// Flat, drier grass.
    Plains,
    /// Arid land.
    Desert,
    /// Rolling high ground.
    Hills,
    /// High rock.
    Mountain,
    /// Permanent snow.
    Snow,
    /// Cold barren ground.
    Tundra,
}

impl Biome {
    /// Every biome label, in declaration order.
    pub const ALL: [Biome; 12] = [
        Biome::Ocean,
        Biome::Beach,
        Biome::Swamp,
        Biome::Forest,
        Biome::Jungle,
        Biome::Grassland,
        Biome::Plains,
        Biome::Desert,
        Biome::Hills,
        Biome::Mountain,
        Biome::Snow,
        Biome::Tundra,
    ];

    /// The snake_case label used on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ocean => "ocean",
            Self::Beach => "beach",
            Self::Swamp => "swamp",
            Self::Forest => "forest",
            Self::Jungle => "jungle",
            Self::Grassland => "grassland",
            Self::Plains => "plains",
            Self::Desert => "desert",
            Self::Hills => "hills",
            Self::Mountain => "mountain",
            Self::Snow => "snow",
            Self::Tundra => "tundra",
        }
    }

    /// Parse a snake_case label.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == s)
    }
}

impl fmt::Display for Biome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the classification table. Both ranges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiomeRule {
    /// Label produced when the rule matches.
    pub biome: Biome,
    /// Inclusive `(min, max)` elevation.
    pub elevation: (f64, f64),
    /// Inclusive `(min, max)` moisture.
    pub moisture: (f64, f64),
}

impl BiomeRule {
    pub const fn new(biome: Biome, elevation: (f64, f64), moisture: (f64, f64)) -> Self {
        Self {
            biome,
            elevation,
            moisture,
        }
    }

    pub fn matches(&self, elevation: f64, moisture: f64) -> bool {
        self.elevation.0 <= elevation
            && elevation <= self.elevation.1
            && self.moisture.0 <= moisture
            && moisture <= self.moisture.1
    }
}

/// The reference table. Ranges overlap, so order decides the winner: swamp
/// is shadowed by forest, and snow and tundra by mountain. Keep it as is.
pub const REFERENCE_RULES: [BiomeRule; 10] = [
    BiomeRule::new(Biome::Ocean, (0.0, 0.1), (0.0, 1.0)),
    BiomeRule::new(Biome::Beach, (0.1, 0.15), (0.0, 1.0)),
    BiomeRule::new(Biome::Desert, (0.15, 0.5), (0.0, 0.3)),
    BiomeRule::new(Biome::Grassland, (0.15, 0.5), (0.3, 0.7)),
    BiomeRule::new(Biome::Forest, (0.15, 0.5), (0.7, 1.0)),
    BiomeRule::new(Biome::Swamp, (0.15, 0.3), (0.8, 1.0)),
    BiomeRule::new(Biome::Hills, (0.5, 0.7), (0.0, 1.0)),
    BiomeRule::new(Biome::Mountain, (0.7, 1.0), (0.0, 1.0)),
    BiomeRule::new(Biome::Snow, (0.8, 1.0), (0.0, 1.0)),
    BiomeRule::new(Biome::Tundra, (0.7, 0.9), (0.0, 0.5)),
];

/// Classified grid plus its label histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeClassification {
    /// Label per cell.
    pub biomes: Grid<Biome>,
    /// Cells per label; sums to `width * height`.
    pub histogram: BTreeMap<Biome, usize>,
}

/// Maps `(elevation, moisture)` to a biome via an ordered rule table.
#[derive(Debug, Clone, PartialEq)]
pub struct BiomeClassifier {
    rules: Vec<BiomeRule>,
    fallback: Biome,
}

impl Default for BiomeClassifier {
    fn default() -> Self {
        Self::new(REFERENCE_RULES.to_vec(), Biome::Grassland)
    }
}

impl BiomeClassifier {
    /// A classifier over `rules`, checked in order, with `fallback` for
    /// points no rule covers.
    pub fn new(rules: Vec<BiomeRule>, fallback: Biome) -> Self {
        Self { rules, fallback }
    }

    pub fn rules(&self) -> &[BiomeRule] {
        &self.rules
    }

    pub fn fallback(&self) -> Biome {
        self.fallback
    }

    /// First matching rule wins. Total: unmatched points get the fallback.
    pub fn classify(&self, elevation: f64, moisture: f64) -> Biome {
        self.rules
            .iter()
            .find(|rule| rule.matches(elevation, moisture))
            .map(|rule| rule.biome)
            .unwrap_or(self.fallback)
    }

    /// Moisture per cell: `1 - elevation` plus uniform jitter in
    /// `[-jitter, jitter]` drawn from a stream seeded by `seed`, clamped to `[0, 1]`.
    pub fn derive_moisture(&self, heightmap: &Grid<f64>, seed: u64, jitter: f64) -> Grid<f64> {
        let jitter = if jitter.is_finite() { jitter.abs() } else { 0.0 };
        let mut rng = StdRng::seed_from_u64(seed);
        heightmap.map(|elevation| {
            let noise = if jitter > 0.0 {
                rng.random_range(-jitter..=jitter)
            } else {
                0.0
            };
            let moisture = 1.0 - elevation + noise;
            if moisture.is_finite() {
                moisture.clamp(0.0, 1.0)
            } else {
                0.0
            }
        })
    }

    /// Classify every cell and count labels.
    pub fn classify_grid(
        &self,
        heightmap: &Grid<f64>,
        moisture: &Grid<f64>,
    ) -> TerrainResult<BiomeClassification> {
        heightmap.ensure_same_shape(moisture)?;

        let mut histogram = BTreeMap::new();
        let biomes = Grid::from_fn(heightmap.width(), heightmap.height(), |x, y| {
            let e = heightmap.get(x, y).copied().unwrap_or(0.0);
            let m = moisture.get(x, y).copied().unwrap_or(0.0);
            let biome = self.classify(e, m);
            *histogram.entry(biome).or_insert(0) += 1;
            biome
        })?;

        Ok(BiomeClassification { biomes, histogram })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reference_table_samples() {
        let c = BiomeClassifier::default();
        assert_eq!(c.classify(0.05, 0.5), Biome::Ocean);
        assert_eq!(c.classify(0.12, 0.5), Biome::Beach);
        assert_eq!(c.classify(0.3, 0.1), Biome::Desert);
        assert_eq!(c.classify(0.3, 0.5), Biome::Grassland);
        assert_eq!(c.classify(0.6, 0.2), Biome::Hills);
    }

    #[test]
    fn boundaries_go_to_earlier_rule() {
        let c = BiomeClassifier::default();
        assert_eq!(c.classify(0.1, 0.5), Biome::Ocean);
        assert_eq!(c.classify(0.3, 0.3), Biome::Desert);
        assert_eq!(c.classify(0.3, 0.7), Biome::Grassland);
    }

    #[test]
    fn table_order_shadows_later_rules() {
        let c = BiomeClassifier::default();
        // Swamp's band sits inside forest's, and forest comes first.
        assert_eq!(c.classify(0.2, 0.9), Biome::Forest);
        // Mountain covers snow and tundra entirely.
        assert_eq!(c.classify(0.95, 0.5), Biome::Mountain);
        assert_eq!(c.classify(0.75, 0.2), Biome::Mountain);
    }

    #[test]
    fn reordered_table_changes_result() {
        let mut rules = REFERENCE_RULES.to_vec();
        rules.swap(4, 5);
        let c = BiomeClassifier::new(rules, Biome::Grassland);
        assert_eq!(c.classify(0.2, 0.9), Biome::Swamp);
    }

    #[test]
    fn unmatched_point_uses_fallback() {
        let c = BiomeClassifier::default();
        assert_eq!(c.classify(1.5, 0.5), Biome::Grassland);
        assert_eq!(c.classify(f64::NAN, 0.5), Biome::Grassland);
        let empty = BiomeClassifier::new(Vec::new(), Biome::Tundra);
        assert_eq!(empty.classify(0.5, 0.5), Biome::Tundra);
    }

    #[test]
    fn moisture_without_jitter_is_inverse_elevation() {
        let heightmap = Grid::from_fn(4, 1, |x, _| x as f64 * 0.25).unwrap();
        let moisture = BiomeClassifier::default().derive_moisture(&heightmap, 1, 0.0);
        assert_eq!(moisture.cells(), &[1.0, 0.75, 0.5, 0.25]);
    }

    #[test]
    fn moisture_is_seeded() {
        let heightmap = Grid::from_fn(8, 8, |x, y| (x + y) as f64 / 14.0).unwrap();
        let c = BiomeClassifier::default();
        assert_eq!(
            c.derive_moisture(&heightmap, 5, 0.1),
            c.derive_moisture(&heightmap, 5, 0.1)
        );
        assert_ne!(
            c.derive_moisture(&heightmap, 5, 0.1),
            c.derive_moisture(&heightmap, 6, 0.1)
        );
    }

    #[test]
    fn classify_grid_rejects_mismatched_shapes() {
        let a = Grid::from_fn(2, 2, |_, _| 0.5).unwrap();
        let b = Grid::from_fn(2, 3, |_, _| 0.5).unwrap();
        assert!(BiomeClassifier::default().classify_grid(&a, &b).is_err());
    }

    #[test]
    fn biome_labels_round_trip_through_parse() {
        for biome in Biome::ALL {
            assert_eq!(Biome::parse(biome.as_str()), Some(biome));
        }
        assert_eq!(Biome::parse("lava"), None);
    }

    proptest! {
        #[test]
        fn moisture_in_range_and_histogram_totals(
            seed in any::<u64>(),
            w in 1usize..20,
            h in 1usize..20,
        ) {
            let heightmap = Grid::from_fn(w, h, |x, y| ((x * 7 + y * 3) % 11) as f64 / 10.0).unwrap();
            let c = BiomeClassifier::default();
            let moisture = c.derive_moisture(&heightmap, seed, 0.1);
            for m in moisture.cells() {
                prop_assert!((0.0..=1.0).contains(m));
            }
            let result = c.classify_grid(&heightmap, &moisture).unwrap();
            prop_assert_eq!(result.histogram.values().sum::<usize>(), w * h);
        }
    }
}
