use mw_terrain::TerrainError;

use crate::ids::{PoiId, WorldId};

/// Alias for `Result<T, MwError>`.
pub type MwResult<T> = Result<T, MwError>;

/// Errors that can occur when generating or manipulating a world.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MwError {
    /// Width or height was not positive, or the area exceeds the configured maximum.
    #[error("invalid dimensions: {width}x{height} (both must be positive, area bounded)")]
    InvalidDimensions {
        /// Requested width.
        width: i64,
        /// Requested height.
        height: i64,
    },

    /// A coordinate fell outside `[0, width) x [0, height)`.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} world")]
    OutOfBounds {
        /// Requested column.
        x: i64,
        /// Requested row.
        y: i64,
        /// World width.
        width: usize,
        /// World height.
        height: usize,
    },

    /// The requested world ID does not exist in the store.
    #[error("world not found: {0}")]
    WorldNotFound(WorldId),

    /// No region has been materialized at this coordinate.
    #[error("region not found at ({x}, {y})")]
    RegionNotFound {
        /// Column.
        x: i64,
        /// Row.
        y: i64,
    },

    /// The requested POI ID does not exist in the world.
    #[error("point of interest not found: {0}")]
    PoiNotFound(PoiId),

    /// Lore or a timeline event was addressed to a world that does not exist.
    #[error("lore target missing: world {0}")]
    LoreTargetMissing(WorldId),

    /// The terrain pipeline rejected its input.
    #[error("terrain error: {0}")]
    Terrain(#[from] TerrainError),
}

impl MwError {
    /// Stable snake_case name for the error kind, for wire protocols.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidDimensions { .. } => "invalid_dimensions",
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::WorldNotFound(_) => "world_not_found",
            Self::RegionNotFound { .. } => "region_not_found",
            Self::PoiNotFound(_) => "poi_not_found",
            Self::LoreTargetMissing(_) => "lore_target_missing",
            Self::Terrain(_) => "terrain",
        }
    }
}
