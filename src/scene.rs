//! Scene assembly and the per-frame driver.

use log::{info, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::celestial::{Moon, Sky};
use crate::clock::FrameTime;
use crate::error::Result;
use crate::params::SceneParams;
use crate::particles::{Cloud, Firework, LeafDrift, Tree};
use crate::render::Renderer;
use crate::sea::Sea;
use crate::terrain::Terrain;

/// Per-frame behavior shared by every animated entity
pub trait Animate {
    /// Advance one frame; every random draw goes through `rng`
    fn update(&mut self, frame: &FrameTime, rng: &mut dyn RngCore);

    /// Create the entity's drawables on first call, re-upload changed state afterwards
    fn sync(&mut self, renderer: &mut dyn Renderer);
}

/// The whole night scene: static terrain plus every animated entity
pub struct Scene {
    params: SceneParams,
    rng: StdRng,
    terrain: Terrain,
    sea: Sea,
    leaves: LeafDrift,
    clouds: Vec<Cloud>,
    fireworks: Vec<Firework>,
    trees: Vec<Tree>,
    moon: Moon,
    sky: Sky,
    frames_stepped: u64,
}

impl Scene {
    /// Validate `params` and build every entity from `rng`
    pub fn new(params: SceneParams, mut rng: StdRng) -> Result<Self> {
        params.validate()?;

        let terrain = Terrain::generate(&params.terrain, &mut rng)?;

        let trees = (0..params.trees.count)
            .map(|_| {
                let base = terrain.pick_random_surface_point(&mut rng)?;
                Ok(Tree::new(base, &params.trees, &mut rng))
            })
            .collect::<Result<Vec<_>>>()?;

        let leaves = LeafDrift::new(&params.leaves, &mut rng);
        let clouds: Vec<Cloud> = (0..params.clouds.count)
            .map(|_| Cloud::new(&params.clouds, &mut rng))
            .collect();
        let fireworks: Vec<Firework> = (0..params.fireworks.count)
            .map(|_| Firework::new(&params.fireworks, &mut rng))
            .collect();

        let scene = Self {
            sea: Sea::new(&params.sea),
            moon: Moon::new(&params.moon),
            sky: Sky::new(&params.sky),
            terrain,
            leaves,
            clouds,
            fireworks,
            trees,
            params,
            rng,
            frames_stepped: 0,
        };

        info!(
            "Scene ready: {} trees, {} clouds ({} particles), {} fireworks, {} leaves",
            scene.trees.len(),
            scene.clouds.len(),
            scene.clouds.iter().map(|c| c.population().len()).sum::<usize>(),
            scene.fireworks.len(),
            scene.leaves.population().len()
        );
        Ok(scene)
    }

    /// Build a reproducible scene from a fixed seed
    pub fn from_seed(params: SceneParams, seed: u64) -> Result<Self> {
        Self::new(params, StdRng::seed_from_u64(seed))
    }

    /// Advance every entity by one frame, then push the results to `renderer`
    pub fn step(&mut self, frame: &FrameTime, renderer: &mut dyn Renderer) {
        let rng: &mut dyn RngCore = &mut self.rng;

        self.moon.update(frame, rng);
        self.sky.update(frame, rng);
        self.sea.update(frame, rng);
        self.leaves.update(frame, rng);
        for cloud in &mut self.clouds {
            cloud.update(frame, rng);
        }
        for firework in &mut self.fireworks {
            firework.update(frame, rng);
        }
        for tree in &mut self.trees {
            tree.update(frame, rng);
        }

        self.sync(renderer);
        self.frames_stepped += 1;
        trace!("Frame {} stepped at {:.3}s", frame.index, frame.elapsed_s);
    }

    /// Push the current state of every entity to `renderer`
    pub fn sync(&mut self, renderer: &mut dyn Renderer) {
        self.terrain.sync(renderer);
        self.moon.sync(renderer);
        self.sky.sync(renderer);
        self.sea.sync(renderer);
        self.leaves.sync(renderer);
        for cloud in &mut self.clouds {
            cloud.sync(renderer);
        }
        for firework in &mut self.fireworks {
            firework.sync(renderer);
        }
        for tree in &mut self.trees {
            tree.sync(renderer);
        }
    }

    pub fn params(&self) -> &SceneParams {
        &self.params
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn sea(&self) -> &Sea {
        &self.sea
    }

    pub fn leaves(&self) -> &LeafDrift {
        &self.leaves
    }

    pub fn clouds(&self) -> &[Cloud] {
        &self.clouds
    }

    pub fn fireworks(&self) -> &[Firework] {
        &self.fireworks
    }

    pub fn trees(&self) -> &[Tree] {
        &self.trees
    }

    pub fn moon(&self) -> &Moon {
        &self.moon
    }

    pub fn sky(&self) -> &Sky {
        &self.sky
    }

    pub fn frames_stepped(&self) -> u64 {
        self.frames_stepped
    }

    /// Completed firework bursts across all fireworks
    pub fn bursts_completed(&self) -> u64 {
        self.fireworks.iter().map(Firework::bursts_completed).sum()
    }
}
