use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// Gradient directions for the 2D lattice.
const GRADIENTS: [(f32, f32); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2),
    (-std::f32::consts::FRAC_1_SQRT_2, std::f32::consts::FRAC_1_SQRT_2),
    (std::f32::consts::FRAC_1_SQRT_2, -std::f32::consts::FRAC_1_SQRT_2),
    (-std::f32::consts::FRAC_1_SQRT_2, -std::f32::consts::FRAC_1_SQRT_2),
];

/// Seeded 2D gradient (Perlin) noise.
///
/// Deterministic for a given seed, continuous, and band limited: points closer than one lattice
/// cell are correlated, points many cells apart are effectively independent.
#[derive(Clone)]
pub struct Perlin {
    perm: [u8; 512],
}

impl Perlin {
    pub fn new(seed: u64) -> Self {
        Perlin::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(rng);

        let mut perm = [0; 512];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = table[i & 255];
        }
        Perlin { perm }
    }

    /// Noise in 0.0 - 1.0
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        (self.raw(x, y) * 0.5 + 0.5).clamp(0.0, 1.0)
    }

    /// Noise in -1.0 - 1.0
    pub fn sample_signed(&self, x: f32, y: f32) -> f32 {
        self.sample(x, y) * 2.0 - 1.0
    }

    fn gradient(&self, xi: usize, yi: usize) -> (f32, f32) {
        let hash = self.perm[self.perm[xi & 255] as usize + (yi & 255)];
        GRADIENTS[(hash & 7) as usize]
    }

    /// Unscaled noise, roughly -1.0 - 1.0
    fn raw(&self, x: f32, y: f32) -> f32 {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;
        // wrapping keeps negative lattice coordinates on the table
        let xi = (x0 as i64).rem_euclid(256) as usize;
        let yi = (y0 as i64).rem_euclid(256) as usize;

        let dot = |dx: usize, dy: usize| {
            let (gx, gy) = self.gradient(xi + dx, yi + dy);
            gx * (fx - dx as f32) + gy * (fy - dy as f32)
        };

        let u = fade(fx);
        let v = fade(fy);
        let bottom = lerp(dot(0, 0), dot(1, 0), u);
        let top = lerp(dot(0, 1), dot(1, 1), u);
        // the largest possible value of a 2D gradient sum is sqrt(2) / 2
        lerp(bottom, top, v) * std::f32::consts::SQRT_2
    }
}

impl Default for Perlin {
    fn default() -> Self {
        Perlin::new(0)
    }
}

impl std::fmt::Debug for Perlin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Perlin").finish_non_exhaustive()
    }
}

fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
