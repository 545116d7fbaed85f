use crate::config::GenerationConfig;
use crate::error::TerrainResult;
use crate::grid::Grid;
use crate::noise::NoiseField;

/// Builds elevation grids in `[0, 1]` from fractal noise.
#[derive(Debug, Clone)]
pub struct HeightmapBuilder {
    octaves: u32,
    persistence: f64,
    lacunarity: f64,
    scale: f64,
    falloff_floor: f64,
    smoothing_passes: u32,
}

impl HeightmapBuilder {
    pub fn new(config: &GenerationConfig) -> Self {
        Self {
            octaves: config.octaves.max(1),
            persistence: config.persistence,
            lacunarity: config.lacunarity,
            scale: config.scale,
            falloff_floor: config.falloff_floor.clamp(0.0, 1.0),
            smoothing_passes: config.smoothing_passes,
        }
    }

    /// Unconstrained heightmap: fractal noise sampled at cell centers spaced
    /// `scale` apart, remapped from `[-1, 1]` to `[0, 1]`.
    pub fn build(
        &self,
        width: usize,
        height: usize,
        noise: &NoiseField,
        scale: f64,
    ) -> TerrainResult<Grid<f64>> {
        let raw = Grid::from_fn(width, height, |x, y| {
            let nx = (x as f64 + 0.5) * scale;
            let ny = (y as f64 + 0.5) * scale;
            let value = noise.fractal_sample(nx, ny, self.octaves, self.persistence, self.lacunarity);
            (value + 1.0) / 2.0
        })?;
        let smoothed = smooth(raw, self.smoothing_passes);
        Ok(smoothed.map(|v| sanitize(*v)))
    }

    /// Island heightmap: the unconstrained heightmap multiplied by a radial
    /// falloff `max(1 - d^island_factor, floor)`, where `d` is the distance to
    /// the grid center normalized so the farthest corner sits at 1.
    ///
    /// A non-positive or non-finite `island_factor` disables the falloff.
    pub fn build_island(
        &self,
        width: usize,
        height: usize,
        noise: &NoiseField,
        island_factor: f64,
    ) -> TerrainResult<Grid<f64>> {
        let base = self.build(width, height, noise, self.scale)?;
        if !(island_factor.is_finite() && island_factor > 0.0) {
            return Ok(base);
        }

        let cx = (width as f64 - 1.0) / 2.0;
        let cy = (height as f64 - 1.0) / 2.0;
        let max_distance = (cx * cx + cy * cy).sqrt();

        let island = Grid::from_fn(width, height, |x, y| {
            let d = if max_distance > 0.0 {
                let dx = x as f64 - cx;
                let dy = y as f64 - cy;
                ((dx * dx + dy * dy).sqrt() / max_distance).min(1.0)
            } else {
                0.0
            };
            let falloff = (1.0 - d.powf(island_factor)).max(self.falloff_floor);
            let elevation = base.get(x, y).copied().unwrap_or(0.0);
            sanitize(elevation * falloff)
        })?;
        Ok(island)
    }
}

/// Clamp to `[0, 1]`, mapping non-finite values to 0.
fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// 3x3 box blur, averaging over the neighbors that exist at the edges.
fn smooth(grid: Grid<f64>, passes: u32) -> Grid<f64> {
    let mut current = grid;
    for _ in 0..passes {
        let (width, height) = current.dims();
        let source = &current;
        let blurred = Grid::from_fn(width, height, |x, y| {
            let mut sum = 0.0;
            let mut count = 0.0;
            for ny in y.saturating_sub(1)..=(y + 1).min(height - 1) {
                for nx in x.saturating_sub(1)..=(x + 1).min(width - 1) {
                    if let Some(v) = source.get(nx, ny) {
                        sum += v;
                        count += 1.0;
                    }
                }
            }
            sum / count
        });
        match blurred {
            Ok(next) => current = next,
            Err(_) => break,
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn builder() -> HeightmapBuilder {
        HeightmapBuilder::new(&GenerationConfig::default())
    }

    #[test]
    fn build_has_requested_shape() {
        let grid = builder().build(12, 7, &NoiseField::new(1), 0.1).unwrap();
        assert_eq!(grid.dims(), (12, 7));
    }

    #[test]
    fn island_suppresses_corners() {
        let noise = NoiseField::new(21);
        let b = builder();
        let flat = b.build(33, 33, &noise, 0.08).unwrap();
        let island = b.build_island(33, 33, &noise, 2.0).unwrap();

        let corner = island.get(0, 0).copied().unwrap();
        let floor = 0.05 * flat.get(0, 0).copied().unwrap();
        assert!((corner - floor).abs() < 1e-12);
        assert_eq!(island.get(16, 16), flat.get(16, 16));
    }

    #[test]
    fn island_never_exceeds_unconstrained() {
        let noise = NoiseField::new(8);
        let b = builder();
        let flat = b.build(20, 14, &noise, 0.08).unwrap();
        let island = b.build_island(20, 14, &noise, 1.5).unwrap();
        for (x, y, v) in island.iter_cells() {
            assert!(*v <= flat.get(x, y).copied().unwrap() + 1e-12);
        }
    }

    #[test]
    fn non_positive_factor_disables_falloff() {
        let noise = NoiseField::new(4);
        let b = builder();
        let flat = b.build(10, 10, &noise, 0.08).unwrap();
        assert_eq!(b.build_island(10, 10, &noise, 0.0).unwrap(), flat);
        assert_eq!(b.build_island(10, 10, &noise, -3.0).unwrap(), flat);
        assert_eq!(b.build_island(10, 10, &noise, f64::NAN).unwrap(), flat);
    }

    #[test]
    fn single_cell_island() {
        let grid = builder().build_island(1, 1, &NoiseField::new(2), 2.0).unwrap();
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn smoothing_reduces_spread() {
        let noise = NoiseField::new(13);
        let rough = builder().build(24, 24, &noise, 0.4).unwrap();
        let smooth = HeightmapBuilder::new(&GenerationConfig::default().with_smoothing_passes(3))
            .build(24, 24, &noise, 0.4)
            .unwrap();
        let spread = |g: &Grid<f64>| {
            let max = g.cells().iter().cloned().fold(f64::MIN, f64::max);
            let min = g.cells().iter().cloned().fold(f64::MAX, f64::min);
            max - min
        };
        assert!(spread(&smooth) <= spread(&rough));
    }

    proptest! {
        #[test]
        fn elevation_always_in_unit_range(
            seed in any::<u64>(),
            w in 1usize..24,
            h in 1usize..24,
            factor in -2.0f64..6.0,
        ) {
            let noise = NoiseField::new(seed);
            let grid = builder().build_island(w, h, &noise, factor).unwrap();
            for v in grid.cells() {
                prop_assert!(v.is_finite());
                prop_assert!((0.0..=1.0).contains(v));
            }
        }
    }
}
