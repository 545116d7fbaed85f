use std::collections::{BTreeMap, HashMap};
use std::fmt;

use chrono::{DateTime, Utc};
use mw_terrain::{Biome, GenerationConfig, Grid, MeshBuffer, Terrain};
use serde::{Deserialize, Serialize};

use crate::error::{MwError, MwResult};
use crate::ids::{EventId, LoreId, PoiId, WorldId};
use crate::lore::LoreEntry;
use crate::poi::{DetailLevel, Poi, PoiPatch};
use crate::prose::Prose;
use crate::region::{self, Coord, Region};
use crate::stats::WorldStats;
use crate::timeline::{Timeline, TimelineEvent};

/// Whether the heightmap was shaped by the radial island falloff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    #[default]
    Island,
    Unconstrained,
}

impl GenerationMode {
    pub fn from_island(island: bool) -> Self {
        if island {
            Self::Island
        } else {
            Self::Unconstrained
        }
    }

    pub fn is_island(self) -> bool {
        self == Self::Island
    }
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Island => write!(f, "island"),
            Self::Unconstrained => write!(f, "unconstrained"),
        }
    }
}

/// The authoritative record for one generated world.
///
/// The terrain grids and mesh are fixed at creation. Everything else is an
/// overlay that grows through the methods below; the store calls them while
/// holding the world's write lock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub id: WorldId,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub mode: GenerationMode,
    pub created_at: DateTime<Utc>,
    elevation: Grid<f64>,
    moisture: Grid<f64>,
    biomes: Grid<Biome>,
    mesh: MeshBuffer,
    stats: WorldStats,
    #[serde(with = "region::as_list")]
    regions: HashMap<Coord, Region>,
    pois: BTreeMap<PoiId, Poi>,
    lore: BTreeMap<LoreId, LoreEntry>,
    timeline: Timeline,
}

/// Everything about a world except its grids and mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSummary {
    pub id: WorldId,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    pub mode: GenerationMode,
    pub created_at: DateTime<Utc>,
    pub statistics: WorldStats,
    pub regions_visited: usize,
}

impl World {
    /// Run the terrain pipeline and wrap the result in an empty world.
    ///
    /// Dimensions arrive signed so that negative requests are reported as
    /// [`MwError::InvalidDimensions`] rather than wrapping.
    pub fn generate(
        width: i64,
        height: i64,
        seed: u64,
        mode: GenerationMode,
        config: &GenerationConfig,
    ) -> MwResult<Self> {
        let invalid = || MwError::InvalidDimensions { width, height };
        let w = usize::try_from(width).map_err(|_| invalid())?;
        let h = usize::try_from(height).map_err(|_| invalid())?;
        if w == 0 || h == 0 || w.checked_mul(h).is_none_or(|cells| cells > config.max_cells) {
            return Err(invalid());
        }

        let Terrain {
            elevation,
            moisture,
            biomes,
            histogram,
            mesh,
        } = mw_terrain::generate(w, h, seed, mode.is_island(), config)?;

        Ok(Self {
            id: WorldId::new(),
            width: w,
            height: h,
            seed,
            mode,
            created_at: Utc::now(),
            elevation,
            moisture,
            biomes,
            mesh,
            stats: WorldStats::from_histogram(histogram),
            regions: HashMap::new(),
            pois: BTreeMap::new(),
            lore: BTreeMap::new(),
            timeline: Timeline::new(),
        })
    }

    /// Check a snapshot before it is trusted: every grid must be well formed
    /// and match the world's dimensions.
    pub fn validate(&self) -> MwResult<()> {
        for dims in [self.elevation.dims(), self.moisture.dims(), self.biomes.dims()] {
            if dims != (self.width, self.height) {
                return Err(mw_terrain::TerrainError::ShapeMismatch {
                    expected: (self.width, self.height),
                    found: dims,
                }
                .into());
            }
        }
        self.elevation.validate()?;
        self.moisture.validate()?;
        self.biomes.validate()?;
        Ok(())
    }

    /// Rebuild every statistic from the biome grid and the overlays.
    ///
    /// Snapshots are loaded through here so stale or missing counts never
    /// outlive a reload. Call after [`World::validate`].
    pub fn recompute_stats(&mut self) {
        let mut biome_distribution = BTreeMap::new();
        for biome in self.biomes.cells() {
            *biome_distribution.entry(*biome).or_insert(0) += 1;
        }
        self.stats = WorldStats {
            biome_distribution,
            poi_count: self.pois.len(),
            named_regions: self.regions.values().filter(|r| r.name.is_some()).count(),
            lore_entries: self.lore.len(),
            timeline_events: self.timeline.len(),
        };
    }

    // -----------------------------------------------------------------------
    // Terrain access
    // -----------------------------------------------------------------------

    pub fn elevation(&self) -> &Grid<f64> {
        &self.elevation
    }

    pub fn moisture(&self) -> &Grid<f64> {
        &self.moisture
    }

    pub fn biomes(&self) -> &Grid<Biome> {
        &self.biomes
    }

    pub fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    pub fn stats(&self) -> &WorldStats {
        &self.stats
    }

    pub fn summary(&self) -> WorldSummary {
        WorldSummary {
            id: self.id,
            width: self.width,
            height: self.height,
            seed: self.seed,
            mode: self.mode,
            created_at: self.created_at,
            statistics: self.stats.clone(),
            regions_visited: self.regions.len(),
        }
    }

    /// Bounds-check a signed coordinate.
    pub fn coord(&self, x: i64, y: i64) -> MwResult<Coord> {
        match (usize::try_from(x), usize::try_from(y)) {
            (Ok(cx), Ok(cy)) if cx < self.width && cy < self.height => Ok(Coord::new(cx, cy)),
            _ => Err(MwError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            }),
        }
    }

    fn terrain_at(&self, coord: Coord) -> (Biome, f64) {
        let index = coord.y * self.width + coord.x;
        (self.biomes.cells()[index], self.elevation.cells()[index])
    }

    // -----------------------------------------------------------------------
    // Regions
    // -----------------------------------------------------------------------

    /// Look up a region without materializing it.
    pub fn region(&self, x: i64, y: i64) -> MwResult<&Region> {
        let coord = self.coord(x, y)?;
        self.regions
            .get(&coord)
            .ok_or(MwError::RegionNotFound { x, y })
    }

    /// All materialized regions, in row-major order.
    pub fn regions(&self) -> Vec<&Region> {
        let mut regions: Vec<&Region> = self.regions.values().collect();
        regions.sort_by_key(|r| (r.y, r.x));
        regions
    }

    fn materialize(&mut self, coord: Coord) -> &mut Region {
        let (biome, elevation) = self.terrain_at(coord);
        let world = self.id;
        self.regions.entry(coord).or_insert_with(|| {
            tracing::debug!(%world, %coord, %biome, "region materialized");
            Region::new(coord, biome, elevation)
        })
    }

    /// Return the region at `(x, y)`, creating it on first access.
    pub fn get_region(&mut self, x: i64, y: i64) -> MwResult<Region> {
        let coord = self.coord(x, y)?;
        Ok(self.materialize(coord).clone())
    }

    /// Name a region and mark it discovered. Only the first naming of a
    /// coordinate counts towards `named_regions`.
    pub fn name_region(&mut self, x: i64, y: i64, name: impl Into<String>) -> MwResult<Region> {
        let coord = self.coord(x, y)?;
        let region = self.materialize(coord);
        let first_naming = region.name.is_none();
        region.name = Some(name.into());
        region.discovered = true;
        let named = region.clone();
        if first_naming {
            self.stats.named_regions += 1;
        }
        Ok(named)
    }

    /// Generate and store a description for a region, marking it explored.
    pub fn describe_region(&mut self, x: i64, y: i64, prose: &dyn Prose) -> MwResult<String> {
        let coord = self.coord(x, y)?;
        let region = self.materialize(coord);
        let description = prose.region_description(region.biome, &region.display_name());
        region.description = Some(description.clone());
        region.explored = true;
        Ok(description)
    }

    // -----------------------------------------------------------------------
    // Points of interest
    // -----------------------------------------------------------------------

    pub fn poi(&self, id: PoiId) -> MwResult<&Poi> {
        self.pois.get(&id).ok_or(MwError::PoiNotFound(id))
    }

    /// All POIs ordered by id.
    pub fn pois(&self) -> impl Iterator<Item = &Poi> {
        self.pois.values()
    }

    /// Insert a new POI at an already bounds-checked coordinate.
    pub fn create_poi(
        &mut self,
        id: PoiId,
        poi_type: &str,
        coord: Coord,
        name: Option<String>,
        prose: &dyn Prose,
    ) -> Poi {
        let (biome, elevation) = self.terrain_at(coord);
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| prose.name_for(poi_type));
        let description = prose.description_for(poi_type, &name);

        let poi = Poi {
            id,
            poi_type: poi_type.to_string(),
            x: coord.x,
            y: coord.y,
            name,
            biome,
            elevation,
            description,
            npcs: Vec::new(),
            rumors: Vec::new(),
            secrets: Vec::new(),
            connections: Vec::new(),
            discovered: false,
            explored: false,
            created_at: Utc::now(),
        };
        self.pois.insert(id, poi.clone());
        self.stats.poi_count = self.pois.len();
        poi
    }

    pub fn update_poi(&mut self, id: PoiId, patch: PoiPatch) -> MwResult<Poi> {
        let poi = self.pois.get_mut(&id).ok_or(MwError::PoiNotFound(id))?;
        poi.apply(patch);
        let updated = poi.clone();
        self.stats.poi_count = self.pois.len();
        Ok(updated)
    }

    /// Regenerate NPCs, rumors and secrets for a POI, replacing any earlier
    /// detail, and mark it explored.
    pub fn detail_poi(&mut self, id: PoiId, level: DetailLevel, prose: &dyn Prose) -> MwResult<Poi> {
        let poi = self.pois.get_mut(&id).ok_or(MwError::PoiNotFound(id))?;
        let poi_type = poi.poi_type.clone();
        let name = poi.name.clone();

        poi.npcs = (0..level.npc_count()).map(|_| prose.npc_for(&poi_type)).collect();
        poi.rumors = (0..level.rumor_count())
            .map(|_| prose.rumor_for(&poi_type, &name))
            .collect();
        poi.secrets = (0..level.secret_count())
            .map(|_| prose.secret_for(&poi_type))
            .collect();
        poi.explored = true;
        Ok(poi.clone())
    }

    // -----------------------------------------------------------------------
    // Lore and timeline
    // -----------------------------------------------------------------------

    pub fn lore(&self) -> impl Iterator<Item = &LoreEntry> {
        self.lore.values()
    }

    pub fn add_lore(
        &mut self,
        id: LoreId,
        lore_type: &str,
        themes: Vec<String>,
        prose: &dyn Prose,
    ) -> LoreEntry {
        let title = prose.lore_title(lore_type);
        let content = prose.lore_body(lore_type, &themes, self);
        let entry = LoreEntry {
            id,
            lore_type: lore_type.to_string(),
            title,
            content,
            themes,
            created_at: Utc::now(),
        };
        self.lore.insert(id, entry.clone());
        self.stats.lore_entries = self.lore.len();
        entry
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn add_timeline_event(
        &mut self,
        id: EventId,
        event_type: &str,
        description: &str,
        date: Option<String>,
        prose: &dyn Prose,
    ) -> TimelineEvent {
        let event = TimelineEvent {
            id,
            event_type: event_type.to_string(),
            description: description.to_string(),
            date: date.unwrap_or_else(|| prose.event_date()),
            created_at: Utc::now(),
        };
        self.timeline.insert(event.clone());
        self.stats.timeline_events = self.timeline.len();
        event
    }

    /// Highest POI, lore and event ids in use, for advancing counters.
    pub fn max_ids(&self) -> (Option<PoiId>, Option<LoreId>, Option<EventId>) {
        (
            self.pois.keys().next_back().copied(),
            self.lore.keys().next_back().copied(),
            self.timeline.max_id(),
        )
    }
}
