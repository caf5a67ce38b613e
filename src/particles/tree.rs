//! Trees: a trunk plus a small leaf population whose leaves randomly fall and regrow.

use glam::Vec3;
use rand::{Rng, RngCore};

use super::ParticlePopulation;
use crate::clock::FrameTime;
use crate::params::TreeParams;
use crate::render::{Color, DrawableDesc, DrawableId, DrawableKind, Geometry, Material, Renderer, Transform};
use crate::scene::Animate;

/// Whether a leaf hangs on its branch or is falling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafState {
    Attached,
    Falling,
}

/// Per-leaf record: where it grows back and what it is doing now
#[derive(Debug, Clone, Copy)]
pub struct TreeLeaf {
    pub origin: Vec3,
    pub state: LeafState,
}

pub struct Tree {
    leaves: ParticlePopulation<TreeLeaf>,
    /// Sideways drift of falling leaves (meters per frame)
    wind: f32,
    fall_speed_m: f32,
    fall_epsilon: f32,
    scale_fall_by_population: bool,
    reset_depth_m: f32,
    trunk_radius_m: f32,
    trunk_height_m: f32,
    trunk_transform: Transform,
    leaf_transform: Transform,
    trunk_material: Material,
    leaf_material: Material,
    trunk_drawable: Option<DrawableId>,
    leaf_drawable: Option<DrawableId>,
}

impl Tree {
    /// Plant a tree with its base at `base` (a terrain surface point)
    pub fn new<R: Rng + ?Sized>(base: Vec3, params: &TreeParams, rng: &mut R) -> Self {
        let radius = rng.random_range(params.trunk_radius_range.clone());
        let height = rng.random_range(params.trunk_height_range.clone());

        let leaf_size = rng.random_range(params.leaf_size_range.clone());
        let leaves = (0..params.leaves_per_tree)
            .map(|_| {
                let spread = rng.random_range(-radius..radius);
                let rise = rng.random_range(-height..height);
                let origin = Vec3::new(spread * 10.0, rise / 10.0, spread * 10.0);
                (
                    origin,
                    TreeLeaf {
                        origin,
                        state: LeafState::Attached,
                    },
                )
            })
            .collect();

        let wind = rng.random_range(params.wind_range.clone());

        Self {
            leaves,
            wind,
            fall_speed_m: params.fall_speed_m,
            fall_epsilon: params.fall_epsilon,
            scale_fall_by_population: params.scale_fall_by_population,
            reset_depth_m: params.reset_depth_m,
            trunk_radius_m: radius,
            trunk_height_m: height,
            trunk_transform: Transform::from_translation(base),
            leaf_transform: Transform::from_translation(base + Vec3::new(0.0, height / 2.0, 0.0)),
            trunk_material: Material::surface(Color::WHITE, &params.trunk_texture),
            leaf_material: Material::points(
                Color::from_hex(params.leaf_color),
                leaf_size,
                &params.leaf_texture,
            )
            .with_vertex_colors(),
            trunk_drawable: None,
            leaf_drawable: None,
        }
    }

    pub fn leaves(&self) -> &ParticlePopulation<TreeLeaf> {
        &self.leaves
    }

    pub fn leaves_mut(&mut self) -> &mut ParticlePopulation<TreeLeaf> {
        &mut self.leaves
    }

    pub fn wind(&self) -> f32 {
        self.wind
    }

    pub fn base(&self) -> Vec3 {
        self.trunk_transform.translation
    }

    pub fn trunk_height_m(&self) -> f32 {
        self.trunk_height_m
    }

    pub fn falling_count(&self) -> usize {
        self.leaves
            .attributes()
            .iter()
            .filter(|leaf| leaf.state == LeafState::Falling)
            .count()
    }
}

impl Animate for Tree {
    fn update(&mut self, _frame: &FrameTime, rng: &mut dyn RngCore) {
        let divisor = if self.scale_fall_by_population {
            self.leaves.len() as f32
        } else {
            1.0
        };
        for leaf in self.leaves.attributes_mut() {
            if leaf.state == LeafState::Attached {
                let draw: f32 = rng.random();
                if draw / divisor < self.fall_epsilon {
                    leaf.state = LeafState::Falling;
                }
            }
        }

        for (position, leaf) in self.leaves.iter_mut() {
            if leaf.state != LeafState::Falling {
                continue;
            }
            position.y -= self.fall_speed_m;
            position.x -= self.wind;

            if position.y < -self.reset_depth_m {
                *position = leaf.origin;
                leaf.state = LeafState::Attached;
            }
        }
    }

    fn sync(&mut self, renderer: &mut dyn Renderer) {
        if self.trunk_drawable.is_none() {
            self.trunk_drawable = Some(renderer.create_drawable(DrawableDesc {
                label: "tree-trunk",
                kind: DrawableKind::Cylinder {
                    radius: self.trunk_radius_m,
                    height: self.trunk_height_m,
                },
                geometry: Geometry::default(),
                material: self.trunk_material.clone(),
                transform: self.trunk_transform,
            }));
        }

        match self.leaf_drawable {
            Some(id) => renderer.upload_geometry(id, self.leaves.geometry()),
            None => {
                self.leaf_drawable = Some(renderer.create_drawable(DrawableDesc {
                    label: "tree-leaves",
                    kind: DrawableKind::Points,
                    geometry: self.leaves.geometry(),
                    material: self.leaf_material.clone(),
                    transform: self.leaf_transform,
                }));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DrawableStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tree(seed: u64, params: &TreeParams) -> (Tree, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let tree = Tree::new(Vec3::new(10.0, 5.0, -20.0), params, &mut rng);
        (tree, rng)
    }

    fn always_falls() -> TreeParams {
        TreeParams {
            fall_epsilon: 1.0,
            scale_fall_by_population: false,
            ..TreeParams::default()
        }
    }

    #[test]
    fn test_leaves_start_attached_at_origin() {
        let (tree, _) = tree(1, &TreeParams::default());
        assert_eq!(tree.leaves().len(), 25);
        assert_eq!(tree.falling_count(), 0);
        for (p, leaf) in tree.leaves().positions().iter().zip(tree.leaves().attributes()) {
            assert_eq!(*p, leaf.origin);
            // Leaves sit on the X = Z diagonal of the crown
            assert_eq!(p.x, p.z);
        }
        assert!((0.0..2.0).contains(&tree.wind()));
    }

    #[test]
    fn test_falling_leaf_moves_down_and_with_wind() {
        let (mut tree, mut rng) = tree(2, &always_falls());
        let before = tree.leaves().positions()[0];
        tree.update(&FrameTime::fixed_step(1, 1.0 / 60.0), &mut rng);

        let after = tree.leaves().positions()[0];
        assert_eq!(tree.falling_count(), 25);
        assert!((before.y - 0.5 - after.y).abs() < 1e-4);
        assert!((before.x - tree.wind() - after.x).abs() < 1e-4);
        assert_eq!(before.z, after.z);
    }

    #[test]
    fn test_leaf_resets_on_crossing_depth() {
        let (mut tree, mut rng) = tree(3, &always_falls());
        tree.update(&FrameTime::fixed_step(1, 1.0 / 60.0), &mut rng);
        let origin = tree.leaves().attributes()[0].origin;
        tree.leaves_mut().positions_mut()[0].y = -699.8;

        tree.update(&FrameTime::fixed_step(2, 1.0 / 60.0), &mut rng);
        // Crossed -700 this frame: back on the branch in the same frame
        assert_eq!(tree.leaves().positions()[0], origin);
        assert_eq!(tree.leaves().attributes()[0].state, LeafState::Attached);
    }

    #[test]
    fn test_no_leaf_ever_below_depth_after_update() {
        let (mut tree, mut rng) = tree(4, &always_falls());
        for frame in 1..3000 {
            tree.update(&FrameTime::fixed_step(frame, 1.0 / 60.0), &mut rng);
            assert!(tree.leaves().positions().iter().all(|p| p.y >= -700.0));
        }
    }

    #[test]
    fn test_population_scaled_fall_chance_is_rare() {
        let (mut tree, mut rng) = tree(5, &TreeParams::default());
        for frame in 1..100 {
            tree.update(&FrameTime::fixed_step(frame, 1.0 / 60.0), &mut rng);
        }
        // rand()/25 < 5e-5 happens with probability 1.25e-3 per leaf per frame
        assert!(tree.falling_count() < 25);
    }

    #[test]
    fn test_sync_creates_trunk_and_leaves() {
        let (mut tree, mut rng) = tree(6, &TreeParams::default());
        let mut store = DrawableStore::new();

        tree.sync(&mut store);
        tree.update(&FrameTime::fixed_step(1, 1.0 / 60.0), &mut rng);
        tree.sync(&mut store);

        assert_eq!(store.count_labeled("tree-trunk"), 1);
        assert_eq!(store.count_labeled("tree-leaves"), 1);
        assert_eq!(store.stats().geometry_uploads, 1);
    }
}
