//! Fireworks: a burst ascends, explodes outward along fixed directions, then relaunches.

use glam::Vec3;
use log::debug;
use rand::{Rng, RngCore};

use super::ParticlePopulation;
use crate::clock::FrameTime;
use crate::params::{FireworkPacing, FireworkParams};
use crate::render::{Color, DrawableDesc, DrawableId, DrawableKind, Material, Renderer, Transform};
use crate::scene::Animate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkPhase {
    Ascending,
    Exploding,
}

/// Per-particle record: explosion direction, fixed when the burst is created
#[derive(Debug, Clone, Copy)]
pub struct Spark {
    pub direction: Vec3,
}

/// One launch of a firework; replaced wholesale when it completes
struct Burst {
    population: ParticlePopulation<Spark>,
    transform: Transform,
    /// Clock reading at creation; `None` until the first update sees a clock
    started_at_s: Option<f32>,
    phase: FireworkPhase,
    timer: f32,
    ascent_duration: f32,
    explosion_duration: f32,
}

impl Burst {
    fn new<R: Rng + ?Sized>(params: &FireworkParams, started_at_s: Option<f32>, rng: &mut R) -> Self {
        let count = rng.random_range(params.particle_count_range.clone());
        let half = params.explosion_size_m / 2.0;

        let population = (0..count)
            .map(|_| {
                let offset = Vec3::new(
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                    rng.random_range(-half..half),
                );
                (offset, Spark { direction: offset })
            })
            .collect();

        // Wider bursts launch from a wider area
        let spread = count as f32;
        let translation = Vec3::new(
            rng.random::<f32>() * spread * 0.5 - spread * 0.25,
            rng.random_range(params.launch_height_range.clone()),
            rng.random::<f32>() * spread * 0.5 - spread * 0.25,
        );

        Self {
            population,
            transform: Transform::from_translation(translation),
            started_at_s,
            phase: FireworkPhase::Ascending,
            timer: 0.0,
            ascent_duration: rng.random_range(params.ascent_duration_range.clone()),
            explosion_duration: rng.random_range(params.explosion_duration_range.clone()),
        }
    }

    fn duration(&self) -> f32 {
        match self.phase {
            FireworkPhase::Ascending => self.ascent_duration,
            FireworkPhase::Exploding => self.explosion_duration,
        }
    }
}

pub struct Firework {
    burst: Burst,
    params: FireworkParams,
    material: Material,
    drawable: Option<DrawableId>,
    /// Drawables of completed bursts awaiting removal
    retired: Vec<DrawableId>,
    bursts_completed: u64,
}

impl Firework {
    pub fn new<R: Rng + ?Sized>(params: &FireworkParams, rng: &mut R) -> Self {
        Self {
            burst: Burst::new(params, None, rng),
            params: params.clone(),
            material: Material::points(Color::WHITE, 0.0, &params.texture).with_vertex_colors(),
            drawable: None,
            retired: Vec::new(),
            bursts_completed: 0,
        }
    }

    pub fn phase(&self) -> FireworkPhase {
        self.burst.phase
    }

    /// Accumulated timer of the current phase
    pub fn timer(&self) -> f32 {
        self.burst.timer
    }

    /// Length of the current phase in timer units
    pub fn phase_duration(&self) -> f32 {
        self.burst.duration()
    }

    pub fn population(&self) -> &ParticlePopulation<Spark> {
        &self.burst.population
    }

    pub fn transform(&self) -> &Transform {
        &self.burst.transform
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Bursts that ran through both phases
    pub fn bursts_completed(&self) -> u64 {
        self.bursts_completed
    }

    /// Move to the next phase (or a new burst) once the timer passes the phase length
    fn advance_phase<R: Rng + ?Sized>(&mut self, now_s: f32, rng: &mut R) {
        if self.burst.timer <= self.burst.duration() {
            return;
        }

        match self.burst.phase {
            FireworkPhase::Ascending => {
                debug!(
                    "Firework exploding at {:.1?} after timer {:.1}",
                    self.burst.transform.translation, self.burst.timer
                );
                self.burst.phase = FireworkPhase::Exploding;
                self.burst.timer = 0.0;
            }
            FireworkPhase::Exploding => {
                self.bursts_completed += 1;
                self.burst = Burst::new(&self.params, Some(now_s), rng);
                if let Some(id) = self.drawable.take() {
                    self.retired.push(id);
                }
                debug!(
                    "Firework relaunched ({} bursts done, {} sparks)",
                    self.bursts_completed,
                    self.burst.population.len()
                );
            }
        }
    }
}

impl Animate for Firework {
    fn update(&mut self, frame: &FrameTime, rng: &mut dyn RngCore) {
        self.advance_phase(frame.elapsed_s, rng);

        let started_at_s = *self.burst.started_at_s.get_or_insert(frame.elapsed_s);
        let burst_elapsed = (frame.elapsed_s - started_at_s).max(0.0);
        let step = burst_elapsed / self.params.motion_divisor;
        let ratio = (self.burst.timer / self.burst.duration()).clamp(0.0, 1.0);
        let sqrt_count = (self.burst.population.len() as f32).sqrt();

        match self.burst.phase {
            FireworkPhase::Ascending => {
                for position in self.burst.population.positions_mut() {
                    position.y += step;
                }
                let color = Color::new(1.0 - ratio, ratio, ratio);
                self.burst.population.colors_mut().fill(color);
                self.material.size = sqrt_count / 2.0 * (1.0 - ratio);
            }
            FireworkPhase::Exploding => {
                for (position, spark) in self.burst.population.iter_mut() {
                    *position += spark.direction * step;
                }
                for color in self.burst.population.colors_mut() {
                    let flicker: f32 = rng.random();
                    *color = Color::new(((1.0 - ratio) + flicker) / 2.0, ratio, ratio);
                }
                self.material.size = sqrt_count * (1.0 - ratio);
            }
        }
        self.material.opacity = 1.0 - ratio;

        self.burst.timer += match self.params.pacing {
            FireworkPacing::BurstElapsed => burst_elapsed,
            FireworkPacing::FrameDelta => frame.delta_s,
        };
    }

    fn sync(&mut self, renderer: &mut dyn Renderer) {
        for id in self.retired.drain(..) {
            renderer.remove_drawable(id);
        }

        match self.drawable {
            Some(id) => {
                renderer.upload_geometry(id, self.burst.population.geometry());
                renderer.upload_material(id, &self.material);
            }
            None => {
                self.drawable = Some(renderer.create_drawable(DrawableDesc {
                    label: "firework",
                    kind: DrawableKind::Points,
                    geometry: self.burst.population.geometry(),
                    material: self.material.clone(),
                    transform: self.burst.transform,
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

    const STEP: f32 = 1.0 / 60.0;

    fn firework(seed: u64, params: &FireworkParams) -> (Firework, StdRng) {
        let mut rng = StdRng::seed_from_u64(seed);
        let firework = Firework::new(params, &mut rng);
        (firework, rng)
    }

    /// Short bursts paced by frame delta, so a cycle takes a few seconds
    fn quick_params() -> FireworkParams {
        FireworkParams {
            pacing: FireworkPacing::FrameDelta,
            ascent_duration_range: 1.0..2.0,
            explosion_duration_range: 1.0..2.0,
            ..FireworkParams::default()
        }
    }

    /// Update until the first burst is exploding; returns the next frame index
    fn step_into_explosion(fw: &mut Firework, rng: &mut StdRng) -> u64 {
        let mut frame = 0;
        while fw.phase() != FireworkPhase::Exploding {
            fw.update(&FrameTime::fixed_step(frame, STEP), rng);
            frame += 1;
            assert!(frame < 1000, "burst never exploded");
        }
        assert_eq!(fw.bursts_completed(), 0);
        frame
    }

    #[test]
    fn test_burst_shape() {
        let (fw, _) = firework(1, &FireworkParams::default());
        let count = fw.population().len();
        assert!((200..1200).contains(&count));
        assert_eq!(fw.phase(), FireworkPhase::Ascending);
        assert!(fw.population().positions().iter().all(|p| p.abs().max_element() <= 5.0));
        for (p, spark) in fw.population().positions().iter().zip(fw.population().attributes()) {
            assert_eq!(*p, spark.direction);
        }

        let t = fw.transform().translation;
        let quarter = count as f32 / 4.0;
        assert!(t.x.abs() <= quarter && t.z.abs() <= quarter);
        assert!((0.0..10.0).contains(&t.y));
        assert!((100.0..600.0).contains(&fw.phase_duration()));
    }

    #[test]
    fn test_ascending_raises_mean_height() {
        let (mut fw, mut rng) = firework(2, &FireworkParams::default());
        let mut last = fw.population().centroid().y;

        fw.update(&FrameTime::fixed_step(0, STEP), &mut rng);
        for frame in 1..30 {
            fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);
            let y = fw.population().centroid().y;
            assert_eq!(fw.phase(), FireworkPhase::Ascending);
            assert!(y > last, "frame {}: {} <= {}", frame, y, last);
            last = y;
        }
    }

    #[test]
    fn test_ascending_colors_fade_to_cyan() {
        let (mut fw, mut rng) = firework(3, &quick_params());
        for frame in 0..20 {
            fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);
        }
        let ratio = (fw.timer() - STEP) / fw.phase_duration();
        let c = fw.population().colors()[0];
        assert!((c.r - (1.0 - ratio)).abs() < 1e-3);
        assert_eq!(c.g, c.b);
        assert!((fw.material().opacity - (1.0 - ratio)).abs() < 1e-3);
    }

    #[test]
    fn test_transition_when_timer_first_exceeds_duration() {
        let (mut fw, mut rng) = firework(4, &quick_params());
        let mut transitions = 0;

        for frame in 0..400 {
            let phase = fw.phase();
            let timer = fw.timer();
            let duration = fw.phase_duration();
            let completed = fw.bursts_completed();

            fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);

            let moved_on = fw.phase() != phase || fw.bursts_completed() != completed;
            assert_eq!(moved_on, timer > duration, "frame {}", frame);
            if moved_on {
                transitions += 1;
            }
        }
        assert!(transitions >= 2);
    }

    #[test]
    fn test_completion_installs_new_population() {
        let (mut fw, mut rng) = firework(5, &quick_params());
        let mut store = DrawableStore::new();
        let first: Vec<Vec3> = fw.population().positions().to_vec();

        let mut frame = 0;
        fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);
        fw.sync(&mut store);
        while fw.bursts_completed() == 0 {
            frame += 1;
            fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);
            fw.sync(&mut store);
            assert!(frame < 1000, "burst never completed");
        }

        assert_eq!(fw.phase(), FireworkPhase::Ascending);
        assert_ne!(fw.population().positions(), &first[..]);
        assert_eq!(store.count_labeled("firework"), 1);
        assert_eq!(store.stats().drawables_created, 2);
        assert_eq!(store.stats().drawables_removed, 1);
    }

    #[test]
    fn test_burst_elapsed_pacing_completes_within_max_duration() {
        let params = FireworkParams::default();
        let (mut fw, mut rng) = firework(6, &params);

        // Timer grows by n/60 on frame n, so 600 + 600 units take under 400 frames
        for frame in 0..800 {
            fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);
        }
        assert!(fw.bursts_completed() >= 1);
    }

    #[test]
    fn test_frame_delta_pacing_tracks_wall_time() {
        let (mut fw, mut rng) = firework(7, &quick_params());
        fw.update(&FrameTime::fixed_step(0, STEP), &mut rng);
        for frame in 1..=30 {
            fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);
        }
        assert!((fw.timer() - 30.0 * STEP).abs() < 1e-4);
    }

    #[test]
    fn test_ascending_point_size() {
        let (mut fw, mut rng) = firework(8, &quick_params());
        let sqrt_count = (fw.population().len() as f32).sqrt();

        for frame in 0..20 {
            let ratio = fw.timer() / fw.phase_duration();
            fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);
            assert_eq!(fw.phase(), FireworkPhase::Ascending);
            let expected = sqrt_count / 2.0 * (1.0 - ratio);
            assert!((fw.material().size - expected).abs() < 1e-3, "frame {}", frame);
        }
    }

    #[test]
    fn test_exploding_moves_along_directions() {
        let (mut fw, mut rng) = firework(9, &quick_params());
        let frame = step_into_explosion(&mut fw, &mut rng);
        let before = fw.population().positions().to_vec();

        let time = FrameTime::fixed_step(frame, STEP);
        fw.update(&time, &mut rng);
        assert_eq!(fw.phase(), FireworkPhase::Exploding);
        assert_eq!(fw.bursts_completed(), 0);

        // The first burst started on frame 0, so its age is the clock reading
        let step = time.elapsed_s / 4.0;
        let after = fw.population().positions();
        for ((p, start), spark) in after.iter().zip(&before).zip(fw.population().attributes()) {
            let expected = *start + spark.direction * step;
            assert!((*p - expected).length() < 1e-3, "{} != {}", p, expected);
        }
    }

    #[test]
    fn test_exploding_color_and_size() {
        let (mut fw, mut rng) = firework(10, &quick_params());
        let mut frame = step_into_explosion(&mut fw, &mut rng);
        for _ in 0..10 {
            fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);
            frame += 1;
        }
        assert_eq!(fw.phase(), FireworkPhase::Exploding);

        let ratio = fw.timer() / fw.phase_duration();
        assert!(ratio > 0.0);
        fw.update(&FrameTime::fixed_step(frame, STEP), &mut rng);
        assert_eq!(fw.phase(), FireworkPhase::Exploding);

        let low = (1.0 - ratio) / 2.0;
        let high = (2.0 - ratio) / 2.0;
        for c in fw.population().colors() {
            assert!(c.r >= low - 1e-6 && c.r < high + 1e-6, "r {} outside [{}, {})", c.r, low, high);
            assert!((c.g - ratio).abs() < 1e-6);
            assert_eq!(c.g, c.b);
        }

        let sqrt_count = (fw.population().len() as f32).sqrt();
        assert!((fw.material().size - sqrt_count * (1.0 - ratio)).abs() < 1e-3);
        assert!((fw.material().opacity - (1.0 - ratio)).abs() < 1e-6);
    }
}
