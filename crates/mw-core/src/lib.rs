//! Core world model for Mapwright.
//!
//! A [`World`] wraps the terrain produced by `mw-terrain` with mutable
//! overlays: lazily created regions, points of interest, lore and a
//! timeline. The [`WorldStore`] owns every live world behind a per-world
//! lock and is the only way callers mutate them.
//!
//! Text generation, event delivery and persistence are collaborators
//! described by the [`Prose`], [`EventSink`] and [`WorldRepository`] traits.

/// Error types used throughout the crate.
pub mod error;
/// Events describing world changes, and the sink trait that receives them.
pub mod event;
/// World and overlay identifiers.
pub mod ids;
/// Generated lore entries.
pub mod lore;
/// Snapshot persistence.
pub mod persist;
/// Points of interest, NPCs and partial updates.
pub mod poi;
/// Text generation collaborator.
pub mod prose;
/// Lazily materialized per-cell regions.
pub mod region;
/// Aggregate world statistics.
pub mod stats;
/// Concurrent store of live worlds.
pub mod store;
/// Historical events sorted by date.
pub mod timeline;
/// The world record.
pub mod world;

pub use error::{MwError, MwResult};
pub use event::{EventSink, WorldEvent};
pub use ids::{EventId, LoreId, PoiId, WorldId};
pub use lore::{DEFAULT_LORE_TYPE, LoreEntry};
pub use persist::{MemoryRepository, PersistError, PersistResult, WorldRepository};
pub use poi::{Alignment, DetailLevel, Npc, Poi, PoiPatch};
pub use prose::Prose;
pub use region::{Coord, Region};
pub use stats::WorldStats;
pub use store::{RegionName, WorldStore};
pub use timeline::{DEFAULT_EVENT_TYPE, Timeline, TimelineEvent};
pub use world::{GenerationMode, World, WorldSummary};
