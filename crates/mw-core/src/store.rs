use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use mw_terrain::{GenerationConfig, PoiSite, SiteSuitability, sample_poi_sites};
use parking_lot::RwLock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{MwError, MwResult};
use crate::ids::{EventId, LoreId, PoiId, WorldId};
use crate::lore::LoreEntry;
use crate::poi::{DetailLevel, Poi, PoiPatch};
use crate::prose::Prose;
use crate::region::Region;
use crate::stats::WorldStats;
use crate::timeline::TimelineEvent;
use crate::world::{GenerationMode, World, WorldSummary};

type WorldHandle = Arc<RwLock<World>>;

/// One entry of a batch naming request. Entries missing any field are skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionName {
    pub x: Option<i64>,
    pub y: Option<i64>,
    pub name: Option<String>,
}

impl RegionName {
    pub fn new(x: i64, y: i64, name: impl Into<String>) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            name: Some(name.into()),
        }
    }
}

/// Owns every live world and serializes mutations per world.
///
/// Each world sits behind its own read/write lock. Mutations hold the write
/// lock for their whole read-modify-write; queries share the read lock. The
/// outer map lock is only held long enough to find, insert or remove a
/// handle, so work on one world never blocks another.
///
/// POI, lore and event ids come from store-wide counters and are never
/// reused, including across [`WorldStore::restore`].
pub struct WorldStore {
    worlds: RwLock<HashMap<WorldId, WorldHandle>>,
    prose: Arc<dyn Prose>,
    config: GenerationConfig,
    next_poi: AtomicU64,
    next_lore: AtomicU64,
    next_event: AtomicU64,
}

impl WorldStore {
    pub fn new(prose: Arc<dyn Prose>) -> Self {
        Self {
            worlds: RwLock::new(HashMap::new()),
            prose,
            config: GenerationConfig::default(),
            next_poi: AtomicU64::new(1),
            next_lore: AtomicU64::new(1),
            next_event: AtomicU64::new(1),
        }
    }

    /// Use `config` for every world created from now on.
    pub fn with_config(mut self, config: GenerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    fn handle(&self, id: WorldId) -> MwResult<WorldHandle> {
        self.worlds
            .read()
            .get(&id)
            .cloned()
            .ok_or(MwError::WorldNotFound(id))
    }

    fn read<T>(&self, id: WorldId, f: impl FnOnce(&World) -> MwResult<T>) -> MwResult<T> {
        let handle = self.handle(id)?;
        let world = handle.read();
        f(&world)
    }

    fn write<T>(&self, id: WorldId, f: impl FnOnce(&mut World) -> MwResult<T>) -> MwResult<T> {
        let handle = self.handle(id)?;
        let mut world = handle.write();
        f(&mut world)
    }

    // -----------------------------------------------------------------------
    // Worlds
    // -----------------------------------------------------------------------

    /// Generate a world and register it. Returns a snapshot of the new world.
    pub fn create(&self, width: i64, height: i64, seed: u64, island: bool) -> MwResult<World> {
        let world = World::generate(
            width,
            height,
            seed,
            GenerationMode::from_island(island),
            &self.config,
        )?;
        tracing::info!(world = %world.id, width, height, seed, island, "world created");
        self.worlds
            .write()
            .insert(world.id, Arc::new(RwLock::new(world.clone())));
        Ok(world)
    }

    /// A full snapshot of a world, grids included.
    pub fn get_world(&self, id: WorldId) -> MwResult<World> {
        self.read(id, |w| Ok(w.clone()))
    }

    /// Run `f` against a world under its read lock.
    pub fn with_world<T>(&self, id: WorldId, f: impl FnOnce(&World) -> T) -> MwResult<T> {
        self.read(id, |w| Ok(f(w)))
    }

    pub fn summary(&self, id: WorldId) -> MwResult<WorldSummary> {
        self.read(id, |w| Ok(w.summary()))
    }

    pub fn statistics(&self, id: WorldId) -> MwResult<WorldStats> {
        self.read(id, |w| Ok(w.stats().clone()))
    }

    /// Ids of all live worlds, sorted.
    pub fn world_ids(&self) -> Vec<WorldId> {
        let mut ids: Vec<WorldId> = self.worlds.read().keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn contains(&self, id: WorldId) -> bool {
        self.worlds.read().contains_key(&id)
    }

    /// Remove a world and everything in it.
    pub fn delete(&self, id: WorldId) -> MwResult<()> {
        self.worlds
            .write()
            .remove(&id)
            .ok_or(MwError::WorldNotFound(id))?;
        tracing::info!(world = %id, "world deleted");
        Ok(())
    }

    /// Register a previously saved world, replacing any live world with the
    /// same id. Statistics are rebuilt from the snapshot's contents and id
    /// counters move past every id it uses.
    pub fn restore(&self, mut world: World) -> MwResult<WorldId> {
        world.validate()?;
        world.recompute_stats();
        let (poi, lore, event) = world.max_ids();
        advance(&self.next_poi, poi.map(PoiId::value));
        advance(&self.next_lore, lore.map(LoreId::value));
        advance(&self.next_event, event.map(EventId::value));

        let id = world.id;
        self.worlds.write().insert(id, Arc::new(RwLock::new(world)));
        tracing::info!(world = %id, "world restored");
        Ok(id)
    }

    // -----------------------------------------------------------------------
    // Regions
    // -----------------------------------------------------------------------

    pub fn get_region(&self, id: WorldId, x: i64, y: i64) -> MwResult<Region> {
        self.write(id, |w| w.get_region(x, y))
    }

    pub fn name_region(&self, id: WorldId, x: i64, y: i64, name: &str) -> MwResult<Region> {
        self.write(id, |w| w.name_region(x, y, name))
    }

    /// Name several regions under one lock. Incomplete entries are skipped;
    /// an out-of-bounds entry fails the whole batch before anything changes.
    pub fn batch_name_regions(&self, id: WorldId, entries: &[RegionName]) -> MwResult<Vec<Region>> {
        self.write(id, |w| {
            let complete: Vec<(i64, i64, &str)> = entries
                .iter()
                .filter_map(|e| Some((e.x?, e.y?, e.name.as_deref()?)))
                .collect();
            for &(x, y, _) in &complete {
                w.coord(x, y)?;
            }
            complete
                .into_iter()
                .map(|(x, y, name)| w.name_region(x, y, name))
                .collect()
        })
    }

    pub fn describe_region(&self, id: WorldId, x: i64, y: i64) -> MwResult<String> {
        self.write(id, |w| w.describe_region(x, y, self.prose.as_ref()))
    }

    // -----------------------------------------------------------------------
    // Points of interest
    // -----------------------------------------------------------------------

    /// Every POI in the world, ordered by id.
    pub fn list_pois(&self, id: WorldId) -> MwResult<Vec<Poi>> {
        self.read(id, |w| Ok(w.pois().cloned().collect()))
    }

    pub fn get_poi(&self, id: WorldId, poi: PoiId) -> MwResult<Poi> {
        self.read(id, |w| w.poi(poi).cloned())
    }

    pub fn create_poi(
        &self,
        id: WorldId,
        poi_type: &str,
        x: i64,
        y: i64,
        name: Option<String>,
    ) -> MwResult<Poi> {
        self.write(id, |w| {
            let coord = w.coord(x, y)?;
            let poi_id = PoiId(self.next_poi.fetch_add(1, Ordering::Relaxed));
            let poi = w.create_poi(poi_id, poi_type, coord, name, self.prose.as_ref());
            tracing::debug!(world = %id, poi = %poi.id, poi_type, "poi created");
            Ok(poi)
        })
    }

    pub fn update_poi(&self, id: WorldId, poi: PoiId, patch: PoiPatch) -> MwResult<Poi> {
        self.write(id, |w| w.update_poi(poi, patch))
    }

    pub fn detail_poi(&self, id: WorldId, poi: PoiId, level: DetailLevel) -> MwResult<Poi> {
        self.write(id, |w| w.detail_poi(poi, level, self.prose.as_ref()))
    }

    /// Weighted-random candidate POI sites drawn from the world's biome grid.
    /// The same `seed` always yields the same sites for the same world.
    pub fn suggest_poi_sites(&self, id: WorldId, density: f64, seed: u64) -> MwResult<Vec<PoiSite>> {
        self.read(id, |w| {
            let mut rng = StdRng::seed_from_u64(seed);
            Ok(sample_poi_sites(
                w.biomes(),
                density,
                &SiteSuitability::default(),
                &mut rng,
            )?)
        })
    }

    // -----------------------------------------------------------------------
    // Lore and timeline
    // -----------------------------------------------------------------------

    pub fn add_lore(&self, id: WorldId, lore_type: &str, themes: Vec<String>) -> MwResult<LoreEntry> {
        let handle = self.handle(id).map_err(|_| MwError::LoreTargetMissing(id))?;
        let mut world = handle.write();
        let lore_id = LoreId(self.next_lore.fetch_add(1, Ordering::Relaxed));
        Ok(world.add_lore(lore_id, lore_type, themes, self.prose.as_ref()))
    }

    /// Lore entries ordered by id, optionally restricted to one type.
    pub fn list_lore(&self, id: WorldId, lore_type: Option<&str>) -> MwResult<Vec<LoreEntry>> {
        self.read(id, |w| {
            Ok(w.lore()
                .filter(|l| lore_type.is_none_or(|t| l.lore_type == t))
                .cloned()
                .collect())
        })
    }

    pub fn add_timeline_event(
        &self,
        id: WorldId,
        event_type: &str,
        description: &str,
        date: Option<String>,
    ) -> MwResult<TimelineEvent> {
        let handle = self.handle(id).map_err(|_| MwError::LoreTargetMissing(id))?;
        let mut world = handle.write();
        let event_id = EventId(self.next_event.fetch_add(1, Ordering::Relaxed));
        Ok(world.add_timeline_event(event_id, event_type, description, date, self.prose.as_ref()))
    }

    /// Timeline events in date-string order, optionally restricted to one type.
    pub fn timeline(&self, id: WorldId, event_type: Option<&str>) -> MwResult<Vec<TimelineEvent>> {
        self.read(id, |w| {
            let timeline = w.timeline();
            Ok(match event_type {
                Some(t) => timeline.of_type(t).cloned().collect(),
                None => timeline.entries().to_vec(),
            })
        })
    }
}

fn advance(counter: &AtomicU64, used: Option<u64>) {
    if let Some(max) = used {
        counter.fetch_max(max.saturating_add(1), Ordering::Relaxed);
    }
}
