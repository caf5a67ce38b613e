//! Sakura Night library - procedural terrain and per-frame particle animation

pub mod camera;
pub mod celestial;
pub mod cli;
pub mod clock;
pub mod error;
pub mod noise;
pub mod params;
pub mod particles;
pub mod render;
pub mod scene;
pub mod sea;
pub mod terrain;

pub use error::{Result, SceneError};
