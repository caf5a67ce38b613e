//! Mountain terrain: a grid height field raised by noise, plus tree placement.

mod grid;

pub use grid::GridMesh;

use glam::Vec3;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Result, SceneError};
use crate::noise::{build_noise_field, NoiseField};
use crate::params::TerrainParams;
use crate::render::{Color, DrawableDesc, DrawableId, DrawableKind, Geometry, Material, Renderer, Transform};

/// Static terrain mesh with elevations fixed at construction
pub struct Terrain {
    grid: GridMesh,
    amplitude_m: f32,
    /// Vertex indices inside the tree-planting region
    eligible: Vec<usize>,
    region_half_extent_m: f32,
    material: Material,
    drawable: Option<DrawableId>,
}

impl Terrain {
    /// Build the terrain with the noise field selected in `params`
    pub fn generate<R: Rng + ?Sized>(params: &TerrainParams, rng: &mut R) -> Result<Self> {
        params.validate()?;
        let mut noise = build_noise_field(&params.noise, StdRng::seed_from_u64(rng.random()));
        let terrain = Self::with_noise(params, noise.as_mut());
        info!(
            "Terrain: {}x{} vertices over {}x{}m, {:?} noise, {} plantable points",
            terrain.grid.columns(),
            terrain.grid.rows(),
            params.world_width_m,
            params.world_length_m,
            params.noise.kind,
            terrain.eligible.len()
        );
        Ok(terrain)
    }

    /// Build the terrain sampling elevations from `noise`
    pub fn with_noise(params: &TerrainParams, noise: &mut dyn NoiseField) -> Self {
        let mut grid = GridMesh::new(
            params.world_width_m,
            params.world_length_m,
            params.columns.saturating_sub(1),
            params.rows.saturating_sub(1),
        );

        for vertex in &mut grid.positions {
            let height = noise.sample(vertex.x * params.frequency, vertex.z * params.frequency);
            vertex.y = height * params.amplitude_m;
        }

        let half = params.tree_region_half_extent_m;
        let eligible = grid
            .positions
            .iter()
            .enumerate()
            .filter(|(_, p)| p.x.abs() < half && p.z.abs() < half)
            .map(|(i, _)| i)
            .collect();

        Self {
            grid,
            amplitude_m: params.amplitude_m,
            eligible,
            region_half_extent_m: half,
            material: Material::surface(Color::from_hex(params.color), &params.texture),
            drawable: None,
        }
    }

    pub fn grid(&self) -> &GridMesh {
        &self.grid
    }

    pub fn amplitude_m(&self) -> f32 {
        self.amplitude_m
    }

    /// Elevation of every vertex, in grid order
    pub fn elevations(&self) -> impl Iterator<Item = f32> + '_ {
        self.grid.positions.iter().map(|p| p.y)
    }

    /// Vertices where trees may be planted
    pub fn eligible_points(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.eligible.iter().map(|&i| self.grid.positions[i])
    }

    /// Uniformly chosen surface point with |x| and |z| inside the planting region
    pub fn pick_random_surface_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec3> {
        if self.eligible.is_empty() {
            return Err(SceneError::NoEligibleTerrainPoint {
                half_extent: self.region_half_extent_m,
            });
        }
        let index = self.eligible[rng.random_range(0..self.eligible.len())];
        Ok(self.grid.positions[index])
    }

    /// Create the terrain drawable (once; the terrain never changes afterwards)
    pub fn sync(&mut self, renderer: &mut dyn Renderer) {
        if self.drawable.is_some() {
            return;
        }
        self.drawable = Some(renderer.create_drawable(DrawableDesc {
            label: "terrain",
            kind: DrawableKind::Surface {
                columns: self.grid.columns(),
                rows: self.grid.rows(),
            },
            geometry: Geometry::surface(&self.grid.positions, &self.grid.indices),
            material: self.material.clone(),
            transform: Transform::IDENTITY,
        }));
    }
}
