//! Sakura Night - headless night-scene simulation
//!
//! Terrain rises from noise, the sea rolls, sakura leaves fall and fireworks burst.
//! Frames are stepped on a simulated or wall clock and optionally written as PNG snapshots.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use sakuranight::camera::CameraSystem;
use sakuranight::cli::Args;
use sakuranight::clock::{Clock, FrameTimer, SteppedClock, SystemClock};
use sakuranight::render::{save_snapshot, DrawableStore};
use sakuranight::scene::Scene;

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let params = args.scene_params();
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(
        "Sakura Night: {:?} preset, seed {}, {} frames at {} fps{}",
        args.preset,
        seed,
        args.frames,
        args.fps,
        if args.realtime { " (realtime)" } else { "" }
    );

    let camera = CameraSystem::new(params.camera.clone(), &params.render);
    let render_config = params.render.clone();
    let mut scene = Scene::from_seed(params, seed).context("Failed to build scene")?;

    let snapshots = args.snapshot_config();
    if let Some(config) = &snapshots {
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("Failed to create {}", config.output_dir.display())
        })?;
        info!(
            "Snapshots every {} frames into {}",
            config.every_frames,
            config.output_dir.display()
        );
    }

    let step_s = args.frame_step_s();
    let frame_budget = Duration::from_secs_f32(step_s);
    let mut stepped = SteppedClock::new(step_s);
    let wall = SystemClock::new();
    let mut timer = FrameTimer::new();
    let mut store = DrawableStore::new();
    let view_proj = camera.view_proj();
    let report_every = u64::from(args.fps.max(1));
    let mut snapshots_written = 0u64;
    let run_started = Instant::now();

    for _ in 0..args.frames {
        let frame_started = Instant::now();
        let clock: &dyn Clock = if args.realtime { &wall } else { &stepped };
        let frame = timer.tick(clock);

        scene.step(&frame, &mut store);

        if let Some(config) = &snapshots {
            if config.captures(frame.index) {
                let path = config.frame_path(frame.index);
                match save_snapshot(&store, view_proj, &render_config, &path) {
                    Ok(()) => snapshots_written += 1,
                    Err(e) => warn!("Snapshot skipped: {}", e),
                }
            }
        }

        if frame.index > 0 && frame.index % report_every == 0 {
            info!(
                "t={:.1}s frame {}: {} drawables, {} bursts completed",
                frame.elapsed_s,
                frame.index,
                store.len(),
                scene.bursts_completed()
            );
        }

        stepped.advance();
        if args.realtime {
            if let Some(rest) = frame_budget.checked_sub(frame_started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    let stats = store.stats();
    info!(
        "Done: {} frames in {:.2?}, {} bursts completed, {} snapshots",
        scene.frames_stepped(),
        run_started.elapsed(),
        scene.bursts_completed(),
        snapshots_written
    );
    info!(
        "Uploads: {} geometry, {} material, {} transform ({:.1} MiB); {} drawables created, {} removed",
        stats.geometry_uploads,
        stats.material_uploads,
        stats.transform_uploads,
        stats.bytes_uploaded as f64 / (1024.0 * 1024.0),
        stats.drawables_created,
        stats.drawables_removed
    );

    Ok(())
}
