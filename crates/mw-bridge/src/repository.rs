use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use mw_core::{PersistError, PersistResult, World, WorldId, WorldRepository};

/// Stores each world as `<world_id>.json` inside one directory.
#[derive(Debug, Clone)]
pub struct JsonDirRepository {
    root: PathBuf,
}

impl JsonDirRepository {
    /// Open `root`, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> PersistResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: WorldId) -> PathBuf {
        self.root.join(format!("{id}.json"))
    }
}

impl WorldRepository for JsonDirRepository {
    fn save_world(&self, world: &World) -> PersistResult<()> {
        let json = serde_json::to_string(world)?;
        let path = self.path_for(world.id);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &path)?;
        tracing::debug!(world = %world.id, path = %path.display(), "world saved");
        Ok(())
    }

    fn load_world(&self, id: WorldId) -> PersistResult<World> {
        let json = match fs::read_to_string(self.path_for(id)) {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => return Err(PersistError::NotFound(id)),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&json)?)
    }

    fn list_world_ids(&self) -> PersistResult<Vec<WorldId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            // Foreign files in the directory are ignored.
            if let Some(id) = path
                .file_stem()
                .and_then(|stem| stem.to_str())
                .and_then(|stem| stem.parse::<WorldId>().ok())
            {
                ids.push(id);
            }
        }
        ids.sort();
        Ok(ids)
    }

    fn delete_world(&self, id: WorldId) -> PersistResult<()> {
        match fs::remove_file(self.path_for(id)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Err(PersistError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }
}
