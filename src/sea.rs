//! Undulating sea surface: a grid whose heights follow a traveling sine wave.

use rand::RngCore;

use crate::clock::FrameTime;
use crate::params::SeaParams;
use crate::render::{Color, DrawableDesc, DrawableId, DrawableKind, Geometry, Material, Renderer, Transform};
use crate::scene::Animate;
use crate::terrain::GridMesh;

/// Wave parameters copied out of `SeaParams` for the per-vertex formula
#[derive(Debug, Clone, Copy)]
struct Wave {
    amplitude_m: f32,
    index_scale: f32,
    spatial_scale_m: f32,
}

impl Wave {
    fn height(&self, index: usize, x: f32, z: f32, elapsed_s: f32) -> f32 {
        let phase = index as f32 / self.index_scale
            + elapsed_s
            + x / self.spatial_scale_m
            + z / self.spatial_scale_m;
        self.amplitude_m * phase.sin()
    }
}

pub struct Sea {
    grid: GridMesh,
    wave: Wave,
    /// Clock reading of the first update; wave time counts from here
    started_at_s: Option<f32>,
    material: Material,
    drawable: Option<DrawableId>,
}

impl Sea {
    pub fn new(params: &SeaParams) -> Self {
        Self {
            grid: GridMesh::new(
                params.world_width_m,
                params.world_length_m,
                params.segments_x,
                params.segments_z,
            ),
            wave: Wave {
                amplitude_m: params.amplitude_m,
                index_scale: params.index_scale,
                spatial_scale_m: params.spatial_scale_m,
            },
            started_at_s: None,
            material: Material::surface(Color::from_hex(params.color), &params.texture),
            drawable: None,
        }
    }

    pub fn grid(&self) -> &GridMesh {
        &self.grid
    }

    /// Wave height of vertex `index` at planar `(x, z)`, `elapsed_s` seconds into the animation
    pub fn height_at(&self, index: usize, x: f32, z: f32, elapsed_s: f32) -> f32 {
        self.wave.height(index, x, z, elapsed_s)
    }

    /// Set every vertex height for `elapsed_s` seconds of wave time
    pub fn displace(&mut self, elapsed_s: f32) {
        let wave = self.wave;
        for (i, vertex) in self.grid.positions.iter_mut().enumerate() {
            vertex.y = wave.height(i, vertex.x, vertex.z, elapsed_s);
        }
    }
}

impl Animate for Sea {
    fn update(&mut self, frame: &FrameTime, _rng: &mut dyn RngCore) {
        let started_at_s = *self.started_at_s.get_or_insert(frame.elapsed_s);
        self.displace(frame.elapsed_s - started_at_s);
    }

    fn sync(&mut self, renderer: &mut dyn Renderer) {
        match self.drawable {
            // Topology never changes; only positions are re-uploaded
            Some(id) => renderer.upload_geometry(
                id,
                Geometry {
                    positions: &self.grid.positions,
                    ..Geometry::default()
                },
            ),
            None => {
                self.drawable = Some(renderer.create_drawable(DrawableDesc {
                    label: "sea",
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
    }
}
