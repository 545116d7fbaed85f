/// Alias for `Result<T, TerrainError>`.
pub type TerrainResult<T> = Result<T, TerrainError>;

/// Errors raised by the terrain pipeline.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TerrainError {
    /// Width or height was zero, or the cell count overflowed.
    #[error("invalid dimensions: {width}x{height} (both must be positive)")]
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },

    /// Two grids that must share a shape did not.
    #[error("grid shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Shape of the reference grid as `(width, height)`.
        expected: (usize, usize),
        /// Shape of the offending grid.
        found: (usize, usize),
    },

    /// A site request asked for more draws than [`crate::MAX_POI_SITES`].
    #[error("too many sites requested: {requested} (limit {limit})")]
    TooManySites {
        /// `density * cells`, before rounding.
        requested: f64,
        /// The fixed cap.
        limit: usize,
    },

    /// Every cell carried zero placement weight.
    #[error("no cell has a positive placement weight")]
    NoSuitableSites,
}
