use serde::{Deserialize, Serialize};

/// Parameters for one run of the terrain pipeline.
///
/// Missing fields fall back to their defaults when deserialized, so a config
/// file only needs to list what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Number of noise layers summed per sample.
    pub octaves: u32,
    /// Amplitude multiplier between successive octaves.
    pub persistence: f64,
    /// Frequency multiplier between successive octaves.
    pub lacunarity: f64,
    /// Lattice spacing: noise coordinate per grid cell.
    pub scale: f64,
    /// Exponent of the radial island falloff.
    pub island_factor: f64,
    /// Lowest value the island falloff may reach.
    pub falloff_floor: f64,
    /// Half-width of the uniform jitter added to moisture.
    pub moisture_jitter: f64,
    /// Box-blur passes applied to the heightmap. 0 = none.
    pub smoothing_passes: u32,
    /// Vertical exaggeration applied to mesh vertex elevation.
    pub vertical_scale: f64,
    /// Largest `width * height` a world may have.
    pub max_cells: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            octaves: 5,
            persistence: 0.5,
            lacunarity: 2.0,
            scale: 0.08,
            island_factor: 2.0,
            falloff_floor: 0.05,
            moisture_jitter: 0.1,
            smoothing_passes: 0,
            vertical_scale: 5.0,
            max_cells: 4096 * 4096,
        }
    }
}

impl GenerationConfig {
    /// Set the octave count (at least 1).
    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves.max(1);
        self
    }

    /// Set the per-octave amplitude decay.
    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    /// Set the per-octave frequency growth.
    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    /// Set the lattice scale.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Set the island falloff exponent.
    pub fn with_island_factor(mut self, factor: f64) -> Self {
        self.island_factor = factor;
        self
    }

    /// Set the falloff floor (clamped to `[0, 1]`).
    pub fn with_falloff_floor(mut self, floor: f64) -> Self {
        self.falloff_floor = floor.clamp(0.0, 1.0);
        self
    }

    /// Set the moisture jitter half-width (clamped to `[0, 1]`).
    pub fn with_moisture_jitter(mut self, jitter: f64) -> Self {
        self.moisture_jitter = jitter.clamp(0.0, 1.0);
        self
    }

    /// Set the number of smoothing passes.
    pub fn with_smoothing_passes(mut self, passes: u32) -> Self {
        self.smoothing_passes = passes;
        self
    }

    /// Set the largest permitted cell count.
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = max_cells;
        self
    }

    /// Set the mesh vertical exaggeration.
    pub fn with_vertical_scale(mut self, scale: f64) -> Self {
        self.vertical_scale = scale;
        self
    }
}
