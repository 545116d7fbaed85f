use std::collections::HashMap;

use parking_lot::Mutex;

use crate::ids::WorldId;
use crate::world::World;

/// Alias for `Result<T, PersistError>`.
pub type PersistResult<T> = Result<T, PersistError>;

/// Errors raised by a [`WorldRepository`].
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// No snapshot is stored under this id.
    #[error("no saved world with id {0}")]
    NotFound(WorldId),

    /// The backing storage failed.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PersistError {
    /// Stable snake_case name for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "world_not_saved",
            Self::Io(_) => "storage",
            Self::Serialization(_) => "serialization",
        }
    }
}

/// Stores full world snapshots, grids and overlays included.
pub trait WorldRepository: Send + Sync {
    /// Write (or overwrite) the snapshot for `world.id`.
    fn save_world(&self, world: &World) -> PersistResult<()>;

    fn load_world(&self, id: WorldId) -> PersistResult<World>;

    /// Ids of every stored snapshot, sorted.
    fn list_world_ids(&self) -> PersistResult<Vec<WorldId>>;

    fn delete_world(&self, id: WorldId) -> PersistResult<()>;
}

/// Keeps serialized snapshots in memory. Useful for tests and for running
/// without a data directory.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    snapshots: Mutex<HashMap<WorldId, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorldRepository for MemoryRepository {
    fn save_world(&self, world: &World) -> PersistResult<()> {
        let json = serde_json::to_string(world)?;
        self.snapshots.lock().insert(world.id, json);
        Ok(())
    }

    fn load_world(&self, id: WorldId) -> PersistResult<World> {
        let snapshots = self.snapshots.lock();
        let json = snapshots.get(&id).ok_or(PersistError::NotFound(id))?;
        Ok(serde_json::from_str(json)?)
    }

    fn list_world_ids(&self) -> PersistResult<Vec<WorldId>> {
        let mut ids: Vec<WorldId> = self.snapshots.lock().keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    fn delete_world(&self, id: WorldId) -> PersistResult<()> {
        self.snapshots
            .lock()
            .remove(&id)
            .map(|_| ())
            .ok_or(PersistError::NotFound(id))
    }
}
