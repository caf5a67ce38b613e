//! Viewer camera configuration and presets.

/// Stationary viewer camera
#[derive(Debug, Clone)]
pub struct FixedCamera {
    /// Camera position (meters)
    pub position: [f32; 3],

    /// Look-at target (meters)
    pub target: [f32; 3],
}

impl Default for FixedCamera {
    fn default() -> Self {
        Self {
            position: [0.0, 10.0, 0.0],
            target: [0.0, 10.0, -1.0], // Looking down -Z toward the moon
        }
    }
}

/// Camera preset selection
#[derive(Debug, Clone)]
pub enum CameraPreset {
    /// Desktop preset: eye at the default viewer position
    Desktop(FixedCamera),

    /// Head-mounted preset: eye at standing height, the headset supplies orientation
    HeadMounted(FixedCamera),
}

impl CameraPreset {
    pub fn head_mounted() -> Self {
        Self::HeadMounted(FixedCamera {
            position: [0.0, 1.6, 0.0],
            target: [0.0, 1.6, -1.0],
        })
    }

    pub fn camera(&self) -> &FixedCamera {
        match self {
            Self::Desktop(camera) | Self::HeadMounted(camera) => camera,
        }
    }
}

impl Default for CameraPreset {
    fn default() -> Self {
        Self::Desktop(FixedCamera::default())
    }
}
