//! Clouds: slowly spinning point blobs whose particles stream along -Z and wrap around.

use glam::{EulerRot, Quat, Vec3};
use rand::{Rng, RngCore};

use super::ParticlePopulation;
use crate::clock::FrameTime;
use crate::params::CloudParams;
use crate::render::{Color, DrawableDesc, DrawableId, DrawableKind, Material, Renderer, Transform};
use crate::scene::Animate;

pub struct Cloud {
    population: ParticlePopulation<()>,
    /// Drift along -Z (meters per frame)
    speed: f32,
    world_size_m: f32,
    spin_per_frame: f32,
    spin_x: f32,
    spin_y: f32,
    transform: Transform,
    material: Material,
    drawable: Option<DrawableId>,
}

impl Cloud {
    pub fn new<R: Rng + ?Sized>(params: &CloudParams, rng: &mut R) -> Self {
        let count = rng.random_range(params.particle_count_range.clone());
        let population = (0..count)
            .map(|_| {
                let position = Vec3::new(
                    rng.random_range(params.particle_x.clone()),
                    rng.random_range(params.particle_y.clone()),
                    rng.random_range(params.particle_z.clone()),
                );
                (position, ())
            })
            .collect();

        let speed = rng.random_range(params.speed_range.clone());
        let translation = Vec3::new(
            rng.random_range(params.position_x.clone()),
            rng.random_range(params.position_y.clone()),
            rng.random_range(params.position_z.clone()),
        );

        Self {
            population,
            speed,
            world_size_m: params.world_size_m,
            spin_per_frame: params.spin_per_frame,
            spin_x: 0.0,
            spin_y: 0.0,
            transform: Transform::from_translation(translation),
            material: Material::points(
                Color::from_hex(params.color),
                params.point_size,
                &params.texture,
            ),
            drawable: None,
        }
    }

    pub fn population(&self) -> &ParticlePopulation<()> {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut ParticlePopulation<()> {
        &mut self.population
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

impl Animate for Cloud {
    fn update(&mut self, _frame: &FrameTime, _rng: &mut dyn RngCore) {
        self.spin_x += self.spin_per_frame;
        self.spin_y += self.spin_per_frame;
        self.transform.rotation = Quat::from_euler(EulerRot::XYZ, self.spin_x, self.spin_y, 0.0);

        for position in self.population.positions_mut() {
            position.z -= self.speed;
            if position.z < -self.world_size_m {
                position.z = self.world_size_m;
            }
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
                    label: "cloud",
                    kind: DrawableKind::Points,
                    geometry: self.population.geometry(),
                    material: self.material.clone(),
                    transform: self.transform,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn cloud(seed: u64) -> (Cloud, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let cloud = Cloud::new(&CloudParams::default(), &mut rng);
        (cloud, rng)
    }

    #[test]
    fn test_spawn_ranges() {
        for seed in 0..20 {
            let (cloud, _) = cloud(seed);
            let count = cloud.population().len();
            assert!((100..1100).contains(&count));
            assert!((1.5..2.5).contains(&cloud.speed()));

            let t = cloud.transform().translation;
            assert!(t.x >= -300.0 && t.x < 300.0);
            assert!(t.y >= 0.0 && t.y < 300.0);
            assert!(t.z >= -750.0 && t.z < 750.0);
        }
    }

    #[test]
    fn test_particles_drift_along_negative_z() {
        let (mut cloud, mut rng) = cloud(1);
        let before: Vec<Vec3> = cloud.population().positions().to_vec();
        cloud.update(&FrameTime::fixed_step(1, 1.0 / 60.0), &mut rng);

        for (a, b) in before.iter().zip(cloud.population().positions()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
            assert!((a.z - cloud.speed() - b.z).abs() < 1e-4);
        }
    }

    #[test]
    fn test_wrap_in_same_frame() {
        let (mut cloud, mut rng) = cloud(2);
        cloud.population_mut().positions_mut()[0].z = -699.0;
        cloud.update(&FrameTime::fixed_step(1, 1.0 / 60.0), &mut rng);

        assert_eq!(cloud.population().positions()[0].z, 700.0);
    }

    #[test]
    fn test_particles_stay_inside_wrap_band() {
        let (mut cloud, mut rng) = cloud(3);
        for frame in 1..1000 {
            cloud.update(&FrameTime::fixed_step(frame, 1.0 / 60.0), &mut rng);
            assert!(cloud
                .population()
                .positions()
                .iter()
                .all(|p| p.z >= -700.0 && p.z <= 700.0));
        }
    }

    #[test]
    fn test_spin_about_x_and_y() {
        let (mut cloud, mut rng) = cloud(4);
        for frame in 1..=100 {
            cloud.update(&FrameTime::fixed_step(frame, 1.0 / 60.0), &mut rng);
        }
        let expected = Quat::from_euler(EulerRot::XYZ, 0.1, 0.1, 0.0);
        assert!(cloud.transform().rotation.abs_diff_eq(expected, 1e-4));
    }
}
