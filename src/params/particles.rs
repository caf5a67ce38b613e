//! Particle population parameters (ambient leaves, trees, clouds, fireworks).

use std::ops::Range;

use crate::error::{Result, SceneError};

use super::{check_at_least, check_positive, check_range, check_range_usize};

/// Blowing-leaf particle system filling the scene
#[derive(Debug, Clone)]
pub struct LeafDriftParams {
    pub particle_count: usize,

    /// Half side length of the spawn cube (meters)
    pub spawn_half_extent_m: f32,

    /// Per-particle fall speed (meters per frame)
    pub fall_speed_range: Range<f32>,

    /// Height below which a particle is respawned (meters)
    pub floor_m: f32,

    /// Respawn heights (meters)
    pub respawn_band: Range<f32>,

    /// Rigid-body spin about Y (radians per frame)
    pub spin_per_frame: f32,

    pub color: u32,
    pub point_size: f32,
    pub texture: String,
}

impl Default for LeafDriftParams {
    fn default() -> Self {
        Self {
            particle_count: 1000,
            spawn_half_extent_m: 250.0,
            fall_speed_range: 1.0..2.0,
            floor_m: -200.0,
            respawn_band: -200.0..200.0,
            spin_per_frame: 0.015,
            color: 0xff99ff,
            point_size: 5.0,
            texture: "images/sakura.png".to_string(),
        }
    }
}

impl LeafDriftParams {
    pub fn validate(&self) -> Result<()> {
        check_range("leaves.fall_speed_range", &self.fall_speed_range)?;
        check_range("leaves.respawn_band", &self.respawn_band)?;
        check_range("leaves.spawn", &(-self.spawn_half_extent_m..self.spawn_half_extent_m))?;
        Ok(())
    }
}

/// Trees planted on the terrain, each shedding a small leaf population
#[derive(Debug, Clone)]
pub struct TreeParams {
    pub count: usize,

    /// Leaves per tree
    pub leaves_per_tree: usize,

    /// Trunk radius (meters)
    pub trunk_radius_range: Range<f32>,

    /// Trunk height (meters)
    pub trunk_height_range: Range<f32>,

    /// Leaf point size (pixels at unit distance)
    pub leaf_size_range: Range<f32>,

    /// Sideways drift of falling leaves (meters per frame)
    pub wind_range: Range<f32>,

    /// Downward speed of falling leaves (meters per frame)
    pub fall_speed_m: f32,

    /// Base chance for an attached leaf to start falling
    pub fall_epsilon: f32,

    /// Divide the random draw by the leaf count before comparing against `fall_epsilon`,
    /// which makes larger trees shed less often per leaf
    pub scale_fall_by_population: bool,

    /// Leaves falling below `-reset_depth_m` snap back to their branch (meters)
    pub reset_depth_m: f32,

    pub trunk_texture: String,
    pub leaf_color: u32,
    pub leaf_texture: String,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            count: 10,
            leaves_per_tree: 25,
            trunk_radius_range: 0.5..1.0,
            trunk_height_range: 15.0..45.0,
            leaf_size_range: 3.0..6.0,
            wind_range: 0.0..2.0,
            fall_speed_m: 0.5,
            fall_epsilon: 0.00005,
            scale_fall_by_population: true,
            reset_depth_m: 700.0,
            trunk_texture: "images/tree.jpg".to_string(),
            leaf_color: 0xff00ff,
            leaf_texture: "images/sakura.png".to_string(),
        }
    }
}

impl TreeParams {
    pub fn validate(&self) -> Result<()> {
        check_range("trees.trunk_radius_range", &self.trunk_radius_range)?;
        check_range("trees.trunk_height_range", &self.trunk_height_range)?;
        // Leaf offsets are drawn from (-radius, radius) and (-height, height)
        check_positive("trees.trunk_radius_range.start", self.trunk_radius_range.start)?;
        check_positive("trees.trunk_height_range.start", self.trunk_height_range.start)?;
        check_range("trees.leaf_size_range", &self.leaf_size_range)?;
        check_range("trees.wind_range", &self.wind_range)?;
        check_positive("trees.reset_depth_m", self.reset_depth_m)?;
        if self.count > 0 {
            check_at_least("trees.leaves_per_tree", self.leaves_per_tree, 1)?;
        }
        if !(0.0..=1.0).contains(&self.fall_epsilon) {
            return Err(SceneError::InvalidConfig(format!(
                "trees.fall_epsilon must be within [0, 1], got {}",
                self.fall_epsilon
            )));
        }
        Ok(())
    }
}

/// Drifting point clouds
#[derive(Debug, Clone)]
pub struct CloudParams {
    pub count: usize,

    /// Particles per cloud
    pub particle_count_range: Range<usize>,

    /// Drift along -Z (meters per frame)
    pub speed_range: Range<f32>,

    /// Particles wrap from `-world_size_m` to `+world_size_m` along Z (meters)
    pub world_size_m: f32,

    /// Spin about X and Y (radians per frame)
    pub spin_per_frame: f32,

    /// Local particle spawn box (meters)
    pub particle_x: Range<f32>,
    pub particle_y: Range<f32>,
    pub particle_z: Range<f32>,

    /// Cloud placement box (meters)
    pub position_x: Range<f32>,
    pub position_y: Range<f32>,
    pub position_z: Range<f32>,

    pub color: u32,
    pub point_size: f32,
    pub texture: String,
}

impl Default for CloudParams {
    fn default() -> Self {
        Self {
            count: 10,
            particle_count_range: 100..1100,
            speed_range: 1.5..2.5,
            world_size_m: 700.0,
            spin_per_frame: 0.001,
            particle_x: -200.0..100.0,
            particle_y: -50.0..50.0,
            particle_z: -200.0..100.0,
            position_x: -300.0..300.0,
            position_y: 0.0..300.0,
            position_z: -750.0..750.0,
            color: 0xffffff,
            point_size: 10.0,
            texture: "images/cloud.jpg".to_string(),
        }
    }
}

impl CloudParams {
    pub fn validate(&self) -> Result<()> {
        check_range_usize("clouds.particle_count_range", &self.particle_count_range)?;
        check_range("clouds.speed_range", &self.speed_range)?;
        check_range("clouds.particle_x", &self.particle_x)?;
        check_range("clouds.particle_y", &self.particle_y)?;
        check_range("clouds.particle_z", &self.particle_z)?;
        check_range("clouds.position_x", &self.position_x)?;
        check_range("clouds.position_y", &self.position_y)?;
        check_range("clouds.position_z", &self.position_z)?;
        // Particles wrap across [-world_size_m, world_size_m]
        check_positive("clouds.world_size_m", self.world_size_m)?;
        if !self.spin_per_frame.is_finite() {
            return Err(SceneError::InvalidConfig(format!(
                "clouds.spin_per_frame must be finite, got {}",
                self.spin_per_frame
            )));
        }
        Ok(())
    }
}

/// What the firework phase timer accumulates each frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkPacing {
    /// Seconds since the burst started, added every frame (timer grows quadratically)
    BurstElapsed,

    /// Frame delta in seconds (timer tracks wall time)
    FrameDelta,
}

/// Firework bursts
#[derive(Debug, Clone)]
pub struct FireworkParams {
    pub count: usize,

    /// Particles per burst
    pub particle_count_range: Range<usize>,

    /// Side length of the cube the sparks start in (meters)
    pub explosion_size_m: f32,

    /// Launch height above the ground (meters)
    pub launch_height_range: Range<f32>,

    /// Length of the ascending phase (timer units)
    pub ascent_duration_range: Range<f32>,

    /// Length of the exploding phase (timer units)
    pub explosion_duration_range: Range<f32>,

    pub pacing: FireworkPacing,

    /// Divisor applied to burst age when moving particles
    pub motion_divisor: f32,

    pub texture: String,
}

impl Default for FireworkParams {
    fn default() -> Self {
        Self {
            count: 10,
            particle_count_range: 200..1200,
            explosion_size_m: 10.0,
            launch_height_range: 0.0..10.0,
            ascent_duration_range: 100.0..600.0,
            explosion_duration_range: 100.0..600.0,
            pacing: FireworkPacing::BurstElapsed,
            motion_divisor: 4.0,
            texture: "images/particle1.png".to_string(),
        }
    }
}

impl FireworkParams {
    pub fn validate(&self) -> Result<()> {
        check_range_usize("fireworks.particle_count_range", &self.particle_count_range)?;
        check_range("fireworks.launch_height_range", &self.launch_height_range)?;
        check_range("fireworks.ascent_duration_range", &self.ascent_duration_range)?;
        check_range("fireworks.explosion_duration_range", &self.explosion_duration_range)?;
        // Phase ratios divide by the drawn duration
        check_positive(
            "fireworks.ascent_duration_range.start",
            self.ascent_duration_range.start,
        )?;
        check_positive(
            "fireworks.explosion_duration_range.start",
            self.explosion_duration_range.start,
        )?;
        if self.explosion_size_m <= 0.0 || self.motion_divisor <= 0.0 {
            return Err(SceneError::InvalidConfig(
                "fireworks.explosion_size_m and fireworks.motion_divisor must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Longest possible burst in timer units
    pub fn max_burst_duration(&self) -> f32 {
        self.ascent_duration_range.end + self.explosion_duration_range.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected(result: Result<()>, field: &str) {
        match result {
            Err(SceneError::InvalidConfig(message)) => {
                assert!(message.contains(field), "{}", message)
            }
            other => panic!("expected {} to be rejected, got {:?}", field, other),
        }
    }

    #[test]
    fn test_defaults_validate() {
        LeafDriftParams::default().validate().unwrap();
        TreeParams::default().validate().unwrap();
        CloudParams::default().validate().unwrap();
        FireworkParams::default().validate().unwrap();
    }

    #[test]
    fn test_non_positive_firework_durations_rejected() {
        let params = FireworkParams {
            ascent_duration_range: 0.0..600.0,
            ..FireworkParams::default()
        };
        rejected(params.validate(), "fireworks.ascent_duration_range.start");

        let params = FireworkParams {
            explosion_duration_range: -10.0..600.0,
            ..FireworkParams::default()
        };
        rejected(params.validate(), "fireworks.explosion_duration_range.start");
    }

    #[test]
    fn test_cloud_wrap_extent_and_spin_checked() {
        let params = CloudParams {
            world_size_m: 0.0,
            ..CloudParams::default()
        };
        rejected(params.validate(), "clouds.world_size_m");

        let params = CloudParams {
            spin_per_frame: f32::NAN,
            ..CloudParams::default()
        };
        rejected(params.validate(), "clouds.spin_per_frame");

        let params = CloudParams {
            spin_per_frame: -0.01,
            ..CloudParams::default()
        };
        params.validate().unwrap();
    }

    #[test]
    fn test_tree_reset_depth_must_be_positive() {
        let params = TreeParams {
            reset_depth_m: -700.0,
            ..TreeParams::default()
        };
        rejected(params.validate(), "trees.reset_depth_m");
    }
}
