use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Seeded 2D gradient noise.
///
/// The permutation table holds a shuffle of `0..=255` repeated twice so that
/// corner hashing at `index + 1` never needs to wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseField {
    seed: u64,
    permutation: [u8; 512],
}

impl NoiseField {
    /// Build the permutation table from `seed`. Same seed, same table.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut base: Vec<u8> = (0..=255).collect();
        base.shuffle(&mut rng);

        let mut permutation = [0u8; 512];
        for (i, slot) in permutation.iter_mut().enumerate() {
            *slot = base[i % 256];
        }
        Self { seed, permutation }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The doubled permutation table.
    pub fn permutation(&self) -> &[u8; 512] {
        &self.permutation
    }

    fn fade(t: f64) -> f64 {
        t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
    }

    fn lerp(t: f64, a: f64, b: f64) -> f64 {
        a + t * (b - a)
    }

    fn grad(hash: u8, x: f64, y: f64) -> f64 {
        match hash & 7 {
            0 => x + y,
            1 => -x + y,
            2 => x - y,
            3 => -x - y,
            4 => x,
            5 => -x,
            6 => y,
            _ => -y,
        }
    }

    fn hash(&self, xi: usize, yi: usize) -> u8 {
        self.permutation[self.permutation[xi] as usize + yi]
    }

    /// Evaluate noise at `(x, y)`. Always in `[-1, 1]`; zero at lattice points.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;
        let xf = x - x_floor;
        let yf = y - y_floor;

        let u = Self::fade(xf);
        let v = Self::fade(yf);

        let aa = Self::grad(self.hash(xi, yi), xf, yf);
        let ba = Self::grad(self.hash(xi + 1, yi), xf - 1.0, yf);
        let ab = Self::grad(self.hash(xi, yi + 1), xf, yf - 1.0);
        let bb = Self::grad(self.hash(xi + 1, yi + 1), xf - 1.0, yf - 1.0);

        let value = Self::lerp(v, Self::lerp(u, aa, ba), Self::lerp(u, ab, bb));
        if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }

    /// Sum `octaves` layers of [`sample`](Self::sample), each at `lacunarity`
    /// times the previous frequency and `persistence` times the previous
    /// amplitude, normalized by the total amplitude so the result stays in
    /// `[-1, 1]` for any octave count.
    pub fn fractal_sample(
        &self,
        x: f64,
        y: f64,
        octaves: u32,
        persistence: f64,
        lacunarity: f64,
    ) -> f64 {
        let mut total = 0.0;
        let mut frequency = 1.0;
        let mut amplitude = 1.0;
        let mut max_value = 0.0;

        for _ in 0..octaves.max(1) {
            total += self.sample(x * frequency, y * frequency) * amplitude;
            max_value += f64::abs(amplitude);
            amplitude *= persistence;
            frequency *= lacunarity;
        }

        let value = total / max_value;
        if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn same_seed_same_table() {
        assert_eq!(NoiseField::new(42), NoiseField::new(42));
    }

    #[test]
    fn different_seed_different_table() {
        assert_ne!(
            NoiseField::new(1).permutation(),
            NoiseField::new(2).permutation()
        );
    }

    #[test]
    fn table_is_doubled_permutation() {
        let noise = NoiseField::new(9);
        let table = noise.permutation();
        let mut first: Vec<u8> = table[..256].to_vec();
        assert_eq!(&table[..256], &table[256..]);
        first.sort_unstable();
        assert_eq!(first, (0..=255).collect::<Vec<u8>>());
    }

    #[test]
    fn lattice_points_are_zero() {
        let noise = NoiseField::new(5);
        assert_eq!(noise.sample(3.0, 7.0), 0.0);
        assert_eq!(noise.sample(-2.0, 0.0), 0.0);
    }

    #[test]
    fn sampling_is_repeatable() {
        let a = NoiseField::new(11);
        let b = NoiseField::new(11);
        for i in 0..50 {
            let x = i as f64 * 0.37;
            let y = i as f64 * 0.91;
            assert_eq!(a.sample(x, y), b.sample(x, y));
            assert_eq!(
                a.fractal_sample(x, y, 6, 0.5, 2.0),
                b.fractal_sample(x, y, 6, 0.5, 2.0)
            );
        }
    }

    #[test]
    fn noise_varies_off_lattice() {
        let noise = NoiseField::new(3);
        let values: Vec<f64> = (0..20)
            .map(|i| noise.sample(i as f64 * 0.43 + 0.1, 0.5))
            .collect();
        assert!(values.iter().any(|v| v.abs() > 1e-6));
    }

    proptest! {
        #[test]
        fn sample_in_range(seed in any::<u64>(), x in -500.0f64..500.0, y in -500.0f64..500.0) {
            let v = NoiseField::new(seed).sample(x, y);
            prop_assert!((-1.0..=1.0).contains(&v));
        }

        #[test]
        fn fractal_in_range(
            x in -100.0f64..100.0,
            y in -100.0f64..100.0,
            octaves in 0u32..10,
            persistence in 0.0f64..1.5,
        ) {
            let v = NoiseField::new(17).fractal_sample(x, y, octaves, persistence, 2.0);
            prop_assert!((-1.0..=1.0).contains(&v));
        }
    }
}
