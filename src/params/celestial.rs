//! Moon and sky dome parameters.

use std::f32::consts::PI;

/// Moon orbiting the scene origin
#[derive(Debug, Clone)]
pub struct MoonParams {
    pub radius_m: f32,

    /// Position relative to the orbit pivot (meters)
    pub offset_m: [f32; 3],

    /// Pivot rotation about Y (radians per frame)
    pub orbit_per_frame: f32,

    /// Moon spin about its local X and Y axes (radians per frame)
    pub spin_x_per_frame: f32,
    pub spin_y_per_frame: f32,

    pub emissive: u32,
    pub texture: String,
}

impl Default for MoonParams {
    fn default() -> Self {
        Self {
            radius_m: 50.0,
            offset_m: [0.0, 100.0, -200.0],
            orbit_per_frame: -PI / 1000.0,
            spin_x_per_frame: PI / 1000.0,
            spin_y_per_frame: -PI / 1000.0,
            emissive: 0xff4444,
            texture: "images/moon.jpg".to_string(),
        }
    }
}

/// Sky dome rendered from the inside
#[derive(Debug, Clone)]
pub struct SkyParams {
    pub radius_m: f32,

    /// Rotation about Y (radians per frame)
    pub spin_per_frame: f32,

    pub texture: String,
}

impl Default for SkyParams {
    fn default() -> Self {
        Self {
            radius_m: 500.0,
            spin_per_frame: -PI / 5000.0,
            texture: "images/skydome.png".to_string(),
        }
    }
}
