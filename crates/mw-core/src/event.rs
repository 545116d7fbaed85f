use serde::{Deserialize, Serialize};

use crate::ids::{EventId, LoreId, PoiId, WorldId};
use crate::poi::DetailLevel;

/// A notification describing one change to a world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorldEvent {
    WorldCreated {
        world_id: WorldId,
        width: usize,
        height: usize,
        seed: u64,
        island: bool,
    },
    RegionNamed {
        world_id: WorldId,
        x: usize,
        y: usize,
        name: String,
    },
    /// Several regions named in a single batch.
    RegionsNamed {
        world_id: WorldId,
        regions: Vec<(usize, usize)>,
    },
    RegionDescribed {
        world_id: WorldId,
        x: usize,
        y: usize,
    },
    PoiCreated {
        world_id: WorldId,
        poi_id: PoiId,
        poi_type: String,
        x: usize,
        y: usize,
        name: String,
    },
    PoiUpdated {
        world_id: WorldId,
        poi_id: PoiId,
        fields: Vec<String>,
    },
    PoiDetailed {
        world_id: WorldId,
        poi_id: PoiId,
        level: DetailLevel,
    },
    LoreCreated {
        world_id: WorldId,
        lore_id: LoreId,
        lore_type: String,
        title: String,
    },
    HistoricalEventAdded {
        world_id: WorldId,
        event_id: EventId,
        event_type: String,
        date: String,
    },
    WorldSaved {
        world_id: WorldId,
    },
    WorldLoaded {
        world_id: WorldId,
    },
    WorldDeleted {
        world_id: WorldId,
    },
}

impl WorldEvent {
    /// The `type` tag this event serializes with.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::WorldCreated { .. } => "world_created",
            Self::RegionNamed { .. } => "region_named",
            Self::RegionsNamed { .. } => "regions_named",
            Self::RegionDescribed { .. } => "region_described",
            Self::PoiCreated { .. } => "poi_created",
            Self::PoiUpdated { .. } => "poi_updated",
            Self::PoiDetailed { .. } => "poi_detailed",
            Self::LoreCreated { .. } => "lore_created",
            Self::HistoricalEventAdded { .. } => "historical_event_added",
            Self::WorldSaved { .. } => "world_saved",
            Self::WorldLoaded { .. } => "world_loaded",
            Self::WorldDeleted { .. } => "world_deleted",
        }
    }

    pub fn world_id(&self) -> WorldId {
        match self {
            Self::WorldCreated { world_id, .. }
            | Self::RegionNamed { world_id, .. }
            | Self::RegionsNamed { world_id, .. }
            | Self::RegionDescribed { world_id, .. }
            | Self::PoiCreated { world_id, .. }
            | Self::PoiUpdated { world_id, .. }
            | Self::PoiDetailed { world_id, .. }
            | Self::LoreCreated { world_id, .. }
            | Self::HistoricalEventAdded { world_id, .. }
            | Self::WorldSaved { world_id }
            | Self::WorldLoaded { world_id }
            | Self::WorldDeleted { world_id } => *world_id,
        }
    }
}

/// Receives world events and delivers them to whoever is listening.
///
/// Events published from one thread must be delivered in publish order.
/// Publishing never fails from the caller's point of view.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: WorldEvent);
}
