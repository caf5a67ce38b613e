//! Terrain, noise and sea parameters.

use crate::error::Result;

use super::{check_at_least, check_positive};

/// How the value-noise generator chooses the gradient at each grid corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientMode {
    /// Fresh random gradient per corner on every query (rough, non-repeatable)
    Redraw,

    /// One hashed gradient per integer grid point (continuous, repeatable)
    Lattice,
}

/// Noise field used to raise the terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    /// Bilinear dot-product value noise
    Value(GradientMode),

    /// Smooth Perlin noise from the `noise` crate
    Perlin,
}

/// Noise sampling parameters
#[derive(Debug, Clone)]
pub struct NoiseParams {
    pub kind: NoiseKind,

    /// Seed for lattice hashing and Perlin permutation
    pub seed: u32,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            kind: NoiseKind::Value(GradientMode::Redraw),
            seed: 42,
        }
    }
}

/// Mountain terrain parameters
#[derive(Debug, Clone)]
pub struct TerrainParams {
    /// Extent along X (meters)
    pub world_width_m: f32,

    /// Extent along Z (meters)
    pub world_length_m: f32,

    /// Vertices along X
    pub columns: usize,

    /// Vertices along Z (256 × 256 = 65,536 vertices)
    pub rows: usize,

    /// Elevation scale applied to the noise value (meters)
    pub amplitude_m: f32,

    /// Noise coordinates per meter (1.0 = one noise cell per meter)
    pub frequency: f32,

    /// Half extent of the square around the origin where trees may be planted (meters)
    pub tree_region_half_extent_m: f32,

    pub noise: NoiseParams,

    pub color: u32,
    pub texture: String,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            world_width_m: 700.0,
            world_length_m: 700.0,
            columns: 256,
            rows: 256,
            amplitude_m: 30.0,
            frequency: 1.0,
            tree_region_half_extent_m: 100.0,
            noise: NoiseParams::default(),
            color: 0x00ffff,
            texture: "images/mountain.jpg".to_string(),
        }
    }
}

impl TerrainParams {
    pub fn validate(&self) -> Result<()> {
        check_positive("terrain.world_width_m", self.world_width_m)?;
        check_positive("terrain.world_length_m", self.world_length_m)?;
        check_at_least("terrain.columns", self.columns, 2)?;
        check_at_least("terrain.rows", self.rows, 2)?;
        check_positive("terrain.tree_region_half_extent_m", self.tree_region_half_extent_m)?;
        Ok(())
    }
}

/// Sea surface parameters
#[derive(Debug, Clone)]
pub struct SeaParams {
    /// Extent along X (meters)
    pub world_width_m: f32,

    /// Extent along Z (meters)
    pub world_length_m: f32,

    /// Cells along X (vertices = segments + 1)
    pub segments_x: usize,

    /// Cells along Z
    pub segments_z: usize,

    /// Wave height (meters)
    pub amplitude_m: f32,

    /// Divisor applied to vertex index in the wave phase
    pub index_scale: f32,

    /// Divisor applied to planar coordinates in the wave phase (meters)
    pub spatial_scale_m: f32,

    pub color: u32,
    pub texture: String,
}

impl Default for SeaParams {
    fn default() -> Self {
        Self {
            world_width_m: 700.0,
            world_length_m: 700.0,
            segments_x: 256,
            segments_z: 256,
            amplitude_m: 2.0,
            index_scale: 10.0,
            spatial_scale_m: 10.0,
            color: 0x0044ff,
            texture: "images/sea.jpg".to_string(),
        }
    }
}

impl SeaParams {
    pub fn validate(&self) -> Result<()> {
        check_positive("sea.world_width_m", self.world_width_m)?;
        check_positive("sea.world_length_m", self.world_length_m)?;
        check_at_least("sea.segments_x", self.segments_x, 1)?;
        check_at_least("sea.segments_z", self.segments_z, 1)?;
        check_positive("sea.index_scale", self.index_scale)?;
        check_positive("sea.spatial_scale_m", self.spatial_scale_m)?;
        Ok(())
    }
}
