//! Blowing-leaf particle system: leaves sink at their own speed and respawn above the floor.

use glam::{Quat, Vec3};
use rand::{Rng, RngCore};

use super::ParticlePopulation;
use crate::clock::FrameTime;
use crate::params::LeafDriftParams;
use crate::render::{Color, DrawableDesc, DrawableId, DrawableKind, Material, Renderer, Transform};
use crate::scene::Animate;

/// Ambient leaf drift; the attribute is each leaf's fall speed (meters per frame)
pub struct LeafDrift {
    population: ParticlePopulation<f32>,
    floor_m: f32,
    respawn_band: std::ops::Range<f32>,
    spin_per_frame: f32,
    spin_y: f32,
    transform: Transform,
    material: Material,
    drawable: Option<DrawableId>,
}

impl LeafDrift {
    pub fn new<R: Rng + ?Sized>(params: &LeafDriftParams, rng: &mut R) -> Self {
        let half = params.spawn_half_extent_m;
        let population = (0..params.particle_count)
            .map(|_| {
                let position = Vec3::new(
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                );
                (position, rng.random_range(params.fall_speed_range.clone()))
            })
            .collect();

        Self {
            population,
            floor_m: params.floor_m,
            respawn_band: params.respawn_band.clone(),
            spin_per_frame: params.spin_per_frame,
            spin_y: 0.0,
            transform: Transform::IDENTITY,
            material: Material::points(
                Color::from_hex(params.color),
                params.point_size,
                &params.texture,
            ),
            drawable: None,
        }
    }

    pub fn population(&self) -> &ParticlePopulation<f32> {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut ParticlePopulation<f32> {
        &mut self.population
    }

    pub fn floor_m(&self) -> f32 {
        self.floor_m
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl Animate for LeafDrift {
    fn update(&mut self, _frame: &FrameTime, rng: &mut dyn RngCore) {
        self.spin_y += self.spin_per_frame;
        self.transform.rotation = Quat::from_rotation_y(self.spin_y);

        for (position, speed) in self.population.iter_mut() {
            // Leaves that sank below the floor last frame come back this frame
            if position.y < self.floor_m {
                position.y = rng.random_range(self.respawn_band.clone());
            }
            position.y -= *speed;
        }
    }

    fn sync(&mut self, renderer: &mut dyn Renderer) {
        match self.drawable {
            Some(id) => {
                renderer.upload_geometry(id, self.population.geometry());
                renderer.upload_transform(id, &self.transform);
            }
            None => {
                self.drawable = Some(renderer.create_drawable(DrawableDesc {
                    label: "leaves",
                    kind: DrawableKind::Points,
                    geometry: self.population.geometry(),
                    material: self.material.clone(),
                    transform: self.transform,
                }));
            }
        }
    }
}
