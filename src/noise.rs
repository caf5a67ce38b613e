//! Noise generation for terrain elevation.
//!
//! The value-noise generator interpolates dot products between per-corner gradients and
//! corner offsets. Gradients are either redrawn on every query or hashed from the lattice
//! point; a smooth Perlin field from the `noise` crate is available as well.

use glam::Vec2;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::Rng;

use crate::params::{GradientMode, NoiseKind, NoiseParams};

/// Scalar field over the XZ plane
pub trait NoiseField {
    /// Height at planar coordinate (x, z)
    fn sample(&mut self, x: f32, z: f32) -> f32;
}

/// Bilinear dot-product value noise
pub struct NoiseGenerator {
    mode: GradientMode,
    seed: u32,
    rng: StdRng,
}

impl NoiseGenerator {
    /// Create a generator; `rng` feeds the redraw mode
    pub fn new(mode: GradientMode, seed: u32, rng: StdRng) -> Self {
        Self { mode, seed, rng }
    }

    /// Gradient for the corner at (cx, cz), components in [0, 1)
    fn corner_gradient(&mut self, cx: f32, cz: f32) -> Vec2 {
        match self.mode {
            GradientMode::Redraw => Vec2::new(self.rng.random(), self.rng.random()),
            GradientMode::Lattice => {
                let (ix, iz) = (cx as i32, cz as i32);
                Vec2::new(
                    unit_from_hash(hash2d(ix, iz, self.seed)),
                    unit_from_hash(hash2d(ix, iz, self.seed ^ 0x9e37_79b9)),
                )
            }
        }
    }
}

impl NoiseField for NoiseGenerator {
    fn sample(&mut self, x: f32, z: f32) -> f32 {
        let (x1, x2) = (x.floor(), x.ceil());
        let (z1, z2) = (z.floor(), z.ceil());
        let point = Vec2::new(x, z);

        let offset_a = Vec2::new(x1, z1) - point;
        let offset_b = Vec2::new(x2, z1) - point;
        let offset_c = Vec2::new(x1, z2) - point;
        let offset_d = Vec2::new(x2, z2) - point;

        let dot_a = self.corner_gradient(x1, z1).dot(offset_a);
        let dot_b = self.corner_gradient(x2, z1).dot(offset_b);
        let dot_c = self.corner_gradient(x1, z2).dot(offset_c);
        let dot_d = self.corner_gradient(x2, z2).dot(offset_d);

        // On a grid line x1 == x2 and the weight is 0, so no division is involved
        let tx = x - x1;
        let tz = z - z1;

        let near = lerp(dot_a, dot_b, tx);
        let far = lerp(dot_c, dot_d, tx);
        lerp(near, far, tz)
    }
}

/// Smooth Perlin field
pub struct PerlinField {
    perlin: Perlin,
}

impl PerlinField {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseField for PerlinField {
    fn sample(&mut self, x: f32, z: f32) -> f32 {
        self.perlin.get([x as f64, z as f64]) as f32
    }
}

/// Build the field selected by `params`
pub fn build_noise_field(params: &NoiseParams, rng: StdRng) -> Box<dyn NoiseField> {
    match params.kind {
        NoiseKind::Value(mode) => Box::new(NoiseGenerator::new(mode, params.seed, rng)),
        NoiseKind::Perlin => Box::new(PerlinField::new(params.seed)),
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

fn hash2d(x: i32, z: i32, seed: u32) -> u32 {
    let n = x
        .wrapping_mul(374_761_393)
        .wrapping_add(z.wrapping_mul(668_265_263))
        .wrapping_add((seed as i32).wrapping_mul(1_274_126_177));
    let n = (n ^ (n >> 13)).wrapping_mul(1_274_126_177);
    (n ^ (n >> 16)) as u32
}

/// Top 24 bits of a hash as a float in [0, 1)
fn unit_from_hash(hash: u32) -> f32 {
    (hash >> 8) as f32 / (1u32 << 24) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn generator(mode: GradientMode) -> NoiseGenerator {
        NoiseGenerator::new(mode, 42, StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_redraw_is_finite_and_bounded() {
        let mut noise = generator(GradientMode::Redraw);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..10_000 {
            let x = rng.random_range(-350.0..350.0);
            let z = rng.random_range(-350.0..350.0);
            let v = noise.sample(x, z);
            assert!(v.is_finite(), "non-finite noise at ({}, {})", x, z);
            assert!(v.abs() <= 2.0, "noise {} out of bounds at ({}, {})", v, x, z);
        }
    }

    #[test]
    fn test_redraw_is_not_repeatable() {
        let mut noise = generator(GradientMode::Redraw);
        let first = noise.sample(0.5, 0.5);
        let differs = (0..16).any(|_| noise.sample(0.5, 0.5) != first);
        assert!(differs);
    }

    #[test]
    fn test_grid_point_is_zero() {
        // Every offset vanishes at an integer corner
        for mode in [GradientMode::Redraw, GradientMode::Lattice] {
            let mut noise = generator(mode);
            assert_eq!(noise.sample(3.0, -7.0), 0.0);
        }
    }

    #[test]
    fn test_grid_line_is_finite() {
        let mut noise = generator(GradientMode::Redraw);
        let v = noise.sample(4.0, 2.25);
        assert!(v.is_finite());
        assert!(v.abs() <= 2.0);
    }

    #[test]
    fn test_lattice_is_deterministic() {
        let mut a = generator(GradientMode::Lattice);
        let mut b = NoiseGenerator::new(GradientMode::Lattice, 42, StdRng::seed_from_u64(99));
        for i in 0..100 {
            let x = i as f32 * 0.37 - 10.0;
            let z = i as f32 * 0.91 + 3.0;
            assert_eq!(a.sample(x, z), b.sample(x, z));
        }
    }

    #[test]
    fn test_lattice_is_continuous_across_cells() {
        let mut noise = generator(GradientMode::Lattice);
        let eps = 1e-3;
        for k in -5..5 {
            let x = k as f32;
            let left = noise.sample(x - eps, 0.4);
            let right = noise.sample(x + eps, 0.4);
            assert!(
                (left - right).abs() < 0.02,
                "jump of {} at x = {}",
                (left - right).abs(),
                x
            );
        }
    }

    #[test]
    fn test_lattice_seed_changes_field() {
        let mut a = NoiseGenerator::new(GradientMode::Lattice, 1, StdRng::seed_from_u64(0));
        let mut b = NoiseGenerator::new(GradientMode::Lattice, 2, StdRng::seed_from_u64(0));
        let differs = (0..20).any(|i| {
            let x = i as f32 + 0.5;
            a.sample(x, 0.5) != b.sample(x, 0.5)
        });
        assert!(differs);
    }

    #[test]
    fn test_perlin_range() {
        let mut field = PerlinField::new(42);
        for i in 0..500 {
            let v = field.sample(i as f32 * 0.173, i as f32 * 0.071);
            assert!(v.is_finite() && v.abs() <= 1.5, "perlin value {} out of range", v);
        }
    }

    #[test]
    fn test_unit_from_hash_half_open() {
        assert_eq!(unit_from_hash(0), 0.0);
        assert!(unit_from_hash(u32::MAX) < 1.0);
    }
}
