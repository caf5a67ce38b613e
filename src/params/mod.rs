//! Parameter definitions with physical units and documented semantics.
//!
//! All magic numbers of the scene live here with:
//! - Physical units (meters, radians per frame, seconds)
//! - Documented ranges and meanings
//! - Validation so random draws never see an empty range

mod camera;
mod celestial;
mod particles;
mod render;
mod scene;
mod terrain;

use std::ops::Range;

use crate::error::{Result, SceneError};

// Re-export all types
pub use camera::{CameraPreset, FixedCamera};
pub use celestial::{MoonParams, SkyParams};
pub use particles::{CloudParams, FireworkPacing, FireworkParams, LeafDriftParams, TreeParams};
pub use render::{RenderConfig, SnapshotConfig};
pub use scene::SceneParams;
pub use terrain::{GradientMode, NoiseKind, NoiseParams, SeaParams, TerrainParams};

fn check_range(name: &str, range: &Range<f32>) -> Result<()> {
    if range.start.is_finite() && range.end.is_finite() && range.start < range.end {
        Ok(())
    } else {
        Err(SceneError::InvalidConfig(format!(
            "{} must be a non-empty finite range, got {:?}",
            name, range
        )))
    }
}

fn check_range_usize(name: &str, range: &Range<usize>) -> Result<()> {
    if range.is_empty() {
        return Err(SceneError::InvalidConfig(format!(
            "{} must be a non-empty range, got {:?}",
            name, range
        )));
    }
    Ok(())
}

fn check_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SceneError::InvalidConfig(format!(
            "{} must be > 0, got {}",
            name, value
        )))
    }
}

fn check_at_least(name: &str, value: usize, min: usize) -> Result<()> {
    if value < min {
        return Err(SceneError::InvalidConfig(format!(
            "{} must be at least {}, got {}",
            name, min, value
        )));
    }
    Ok(())
}
