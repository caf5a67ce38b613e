//! Rendering and snapshot configuration.

use std::path::PathBuf;

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Viewport width (pixels)
    pub window_width: u32,

    /// Viewport height (pixels)
    pub window_height: u32,

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane (meters)
    pub near_plane_m: f32,

    /// Far clipping plane (meters)
    pub far_plane_m: f32,

    /// Background color
    pub clear_color: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            fov_degrees: 75.0,
            near_plane_m: 1.0,
            far_plane_m: 2000.0,
            clear_color: 0x333333,
        }
    }
}

impl RenderConfig {
    pub fn aspect_ratio(&self) -> f32 {
        self.window_width as f32 / self.window_height.max(1) as f32
    }
}

/// Snapshot mode configuration
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Write a snapshot every this many frames
    pub every_frames: u64,

    /// Output directory for PNG frames
    pub output_dir: PathBuf,
}

impl SnapshotConfig {
    pub fn new(every_frames: u64, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            every_frames: every_frames.max(1),
            output_dir: output_dir.into(),
        }
    }

    /// Whether `frame_index` should be captured
    pub fn captures(&self, frame_index: u64) -> bool {
        frame_index % self.every_frames == 0
    }

    /// Frame file path
    pub fn frame_path(&self, frame_index: u64) -> PathBuf {
        self.output_dir.join(format!("frame_{:05}.png", frame_index))
    }
}
