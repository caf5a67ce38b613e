//! Moon and sky dome: rigid bodies that only ever change their transform.

use glam::{Quat, Vec3};
use rand::RngCore;

use crate::clock::FrameTime;
use crate::params::{MoonParams, SkyParams};
use crate::render::{Color, DrawableDesc, DrawableId, DrawableKind, Geometry, Material, Renderer, Transform};
use crate::scene::Animate;

/// Moon orbiting a pivot at the origin while spinning on its own axes
pub struct Moon {
    radius_m: f32,
    offset: Vec3,
    pivot: Quat,
    spin: Quat,
    orbit_step: Quat,
    spin_step: Quat,
    material: Material,
    drawable: Option<DrawableId>,
}

impl Moon {
    pub fn new(params: &MoonParams) -> Self {
        Self {
            radius_m: params.radius_m,
            offset: Vec3::from_array(params.offset_m),
            pivot: Quat::IDENTITY,
            spin: Quat::IDENTITY,
            orbit_step: Quat::from_rotation_y(params.orbit_per_frame),
            // Local-axis rotations compose on the right: X first, then Y
            spin_step: Quat::from_rotation_x(params.spin_x_per_frame)
                * Quat::from_rotation_y(params.spin_y_per_frame),
            material: Material::surface(Color::from_hex(params.emissive), &params.texture),
            drawable: None,
        }
    }

    /// World placement: the offset carried around by the pivot
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.pivot * self.offset,
            rotation: self.pivot * self.spin,
        }
    }

    pub fn radius_m(&self) -> f32 {
        self.radius_m
    }
}

impl Animate for Moon {
    fn update(&mut self, _frame: &FrameTime, _rng: &mut dyn RngCore) {
        self.pivot = (self.pivot * self.orbit_step).normalize();
        self.spin = (self.spin * self.spin_step).normalize();
    }

    fn sync(&mut self, renderer: &mut dyn Renderer) {
        let transform = self.transform();
        match self.drawable {
            Some(id) => renderer.upload_transform(id, &transform),
            None => {
                self.drawable = Some(renderer.create_drawable(DrawableDesc {
                    label: "moon",
                    kind: DrawableKind::Sphere {
                        radius: self.radius_m,
                        inside: false,
                    },
                    geometry: Geometry::default(),
                    material: self.material.clone(),
                    transform,
                }));
            }
        }
    }
}

/// Sky dome seen from the inside, slowly turning about Y
pub struct Sky {
    radius_m: f32,
    spin_per_frame: f32,
    angle: f32,
    material: Material,
    drawable: Option<DrawableId>,
}

impl Sky {
    pub fn new(params: &SkyParams) -> Self {
        Self {
            radius_m: params.radius_m,
            spin_per_frame: params.spin_per_frame,
            angle: 0.0,
            material: Material::surface(Color::WHITE, &params.texture),
            drawable: None,
        }
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: Vec3::ZERO,
            rotation: Quat::from_rotation_y(self.angle),
        }
    }
}

impl Animate for Sky {
    fn update(&mut self, _frame: &FrameTime, _rng: &mut dyn RngCore) {
        self.angle = (self.angle + self.spin_per_frame) % std::f32::consts::TAU;
    }

    fn sync(&mut self, renderer: &mut dyn Renderer) {
        let transform = self.transform();
        match self.drawable {
            Some(id) => renderer.upload_transform(id, &transform),
            None => {
                self.drawable = Some(renderer.create_drawable(DrawableDesc {
                    label: "sky",
                    kind: DrawableKind::Sphere {
                        radius: self.radius_m,
                        inside: true,
                    },
                    geometry: Geometry::default(),
                    material: self.material.clone(),
                    transform,
                }));
            }
        }
    }
}
