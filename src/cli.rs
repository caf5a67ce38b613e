//! Command-line argument parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::params::{SceneParams, SnapshotConfig};

/// Scene preset selection
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Preset {
    /// Full-resolution meshes, eye at 10m
    Desktop,
    /// Lighter meshes, eye at standing height
    HeadMounted,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "sakuranight")]
#[command(about = "Headless night-scene simulation: terrain, sea, falling sakura and fireworks", long_about = None)]
pub struct Args {
    /// Number of frames to simulate
    #[arg(long, value_name = "N", default_value_t = 600)]
    pub frames: u64,

    /// Simulated frames per second
    #[arg(long, value_name = "FPS", default_value_t = 60)]
    pub fps: u32,

    /// RNG seed (random when absent)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Scene preset
    #[arg(long, value_enum, default_value_t = Preset::Desktop)]
    pub preset: Preset,

    /// Pace frames against the wall clock instead of stepping simulated time
    #[arg(long)]
    pub realtime: bool,

    /// Write a PNG snapshot every N frames
    #[arg(long, value_name = "N")]
    pub snapshot_every: Option<u64>,

    /// Snapshot output directory
    #[arg(long, value_name = "DIR", default_value = "snapshots")]
    pub output: PathBuf,

    /// Viewport width (pixels)
    #[arg(long, default_value_t = 1280)]
    pub width: u32,

    /// Viewport height (pixels)
    #[arg(long, default_value_t = 720)]
    pub height: u32,
}

impl Args {
    /// Scene parameters for the selected preset and viewport
    pub fn scene_params(&self) -> SceneParams {
        let mut params = match self.preset {
            Preset::Desktop => SceneParams::desktop(),
            Preset::HeadMounted => SceneParams::head_mounted(),
        };
        params.render.window_width = self.width;
        params.render.window_height = self.height;
        params
    }

    /// Snapshot configuration if snapshot mode is enabled
    pub fn snapshot_config(&self) -> Option<SnapshotConfig> {
        self.snapshot_every
            .map(|every| SnapshotConfig::new(every, self.output.clone()))
    }

    /// Seconds per simulated frame
    pub fn frame_step_s(&self) -> f32 {
        1.0 / self.fps.max(1) as f32
    }
}
