//! Seeded 3D simplex noise.

use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};

/// Gradient directions: midpoints of the edges of a cube.
const GRAD3: [[f64; 3]; 12] = [
    [1.0, 1.0, 0.0],
    [-1.0, 1.0, 0.0],
    [1.0, -1.0, 0.0],
    [-1.0, -1.0, 0.0],
    [1.0, 0.0, 1.0],
    [-1.0, 0.0, 1.0],
    [1.0, 0.0, -1.0],
    [-1.0, 0.0, -1.0],
    [0.0, 1.0, 1.0],
    [0.0, -1.0, 1.0],
    [0.0, 1.0, -1.0],
    [0.0, -1.0, -1.0],
];

/// Skew factor onto the simplex grid.
const F3: f64 = 1.0 / 3.0;
/// Unskew factor back to input space.
const G3: f64 = 1.0 / 6.0;

/// A coherent noise function of three inputs.
///
/// Output lies in `[-1, 1]`, is continuous in all inputs and depends on
/// nothing but the seed the field was built with.
#[derive(Clone)]
pub struct NoiseField {
    seed: u64,
    /// Permutation of 0..256, stored twice to skip index wrapping.
    perm: [u8; 512],
}

impl std::fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

impl NoiseField {
    /// Build a field whose permutation table is shuffled from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut table: Vec<u8> = (0..=255).collect();
        table.shuffle(&mut rng);

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = table[i & 255];
        }
        Self { seed, perm }
    }

    /// Seed this field was built from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn hash(&self, i: usize, j: usize, k: usize) -> usize {
        let p = &self.perm;
        p[i + p[j + p[k] as usize] as usize] as usize % 12
    }

    /// Sample the field at `(x, y, z)`.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        // Which simplex cell contains the point.
        let s = (x + y + z) * F3;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let t = (i + j + k) * G3;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);

        // Offsets of the second and third corners, ordered by magnitude.
        let (i1, j1, k1, i2, j2, k2) = if x0 >= y0 {
            if y0 >= z0 {
                (1, 0, 0, 1, 1, 0)
            } else if x0 >= z0 {
                (1, 0, 0, 1, 0, 1)
            } else {
                (0, 0, 1, 1, 0, 1)
            }
        } else if y0 < z0 {
            (0, 0, 1, 0, 1, 1)
        } else if x0 < z0 {
            (0, 1, 0, 0, 1, 1)
        } else {
            (0, 1, 0, 1, 1, 0)
        };

        let corners = [
            (x0, y0, z0),
            (
                x0 - i1 as f64 + G3,
                y0 - j1 as f64 + G3,
                z0 - k1 as f64 + G3,
            ),
            (
                x0 - i2 as f64 + 2.0 * G3,
                y0 - j2 as f64 + 2.0 * G3,
                z0 - k2 as f64 + 2.0 * G3,
            ),
            (x0 - 1.0 + 3.0 * G3, y0 - 1.0 + 3.0 * G3, z0 - 1.0 + 3.0 * G3),
        ];

        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;
        let kk = (k as i64 & 255) as usize;
        let gradients = [
            self.hash(ii, jj, kk),
            self.hash(ii + i1, jj + j1, kk + k1),
            self.hash(ii + i2, jj + j2, kk + k2),
            self.hash(ii + 1, jj + 1, kk + 1),
        ];

        let total: f64 = corners
            .iter()
            .zip(gradients)
            .map(|(&(cx, cy, cz), gi)| {
                let falloff = 0.6 - cx * cx - cy * cy - cz * cz;
                if falloff < 0.0 {
                    0.0
                } else {
                    let g = GRAD3[gi];
                    let falloff = falloff * falloff;
                    falloff * falloff * (g[0] * cx + g[1] * cy + g[2] * cz)
                }
            })
            .sum();

        // Scale the sum to cover [-1, 1].
        (32.0 * total).clamp(-1.0, 1.0)
    }
}
