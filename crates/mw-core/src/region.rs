use std::collections::HashMap;
use std::fmt;

use mw_terrain::Biome;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A cell coordinate that has passed the world's bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The overlay record for one cell, created the first time the cell is queried.
///
/// `biome` and `elevation` are copied from the grids at creation and never
/// re-derived afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Biome snapshot.
    pub biome: Biome,
    /// Elevation snapshot.
    pub elevation: f64,
    /// Player-given name.
    pub name: Option<String>,
    /// Generated prose.
    pub description: Option<String>,
    /// Set when the region is named.
    pub discovered: bool,
    /// Set when the region is described.
    pub explored: bool,
}

impl Region {
    /// A fresh, unnamed region.
    pub fn new(coord: Coord, biome: Biome, elevation: f64) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
            biome,
            elevation,
            name: None,
            description: None,
            discovered: false,
            explored: false,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// The region's name, or a coordinate label if it has none.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Region at ({}, {})", self.x, self.y))
    }
}

/// Serializes the sparse region map as a list, since JSON object keys must be
/// strings. Each region already carries its own coordinate.
pub(crate) mod as_list {
    use super::*;

    pub fn serialize<S: Serializer>(
        map: &HashMap<Coord, Region>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut regions: Vec<&Region> = map.values().collect();
        regions.sort_by_key(|r| (r.y, r.x));
        regions.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<HashMap<Coord, Region>, D::Error> {
        let regions = Vec::<Region>::deserialize(deserializer)?;
        Ok(regions.into_iter().map(|r| (r.coord(), r)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_region_is_blank() {
        let region = Region::new(Coord::new(2, 3), Biome::Forest, 0.4);
        assert!(region.name.is_none());
        assert!(region.description.is_none());
        assert!(!region.discovered);
        assert!(!region.explored);
        assert_eq!(region.coord(), Coord::new(2, 3));
    }

    #[test]
    fn display_name_falls_back_to_coordinates() {
        let mut region = Region::new(Coord::new(1, 1), Biome::Hills, 0.6);
        assert_eq!(region.display_name(), "Region at (1, 1)");
        region.name = Some("Greymoor".into());
        assert_eq!(region.display_name(), "Greymoor");
    }
}
