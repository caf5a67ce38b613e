//! CPU point-splat rasterizer producing PNG snapshots of a `DrawableStore`.
//!
//! Every drawable is drawn as projected points in creation order (no depth test).
//! Surfaces draw their vertices, spheres and cylinders are sampled on a coarse grid.

use std::f32::consts::{PI, TAU};
use std::path::Path;

use glam::{Mat4, Vec3};
use image::{Rgba, RgbaImage};

use super::{Blending, Color, DrawableKind, DrawableState, DrawableStore};
use crate::error::{Result, SceneError};
use crate::params::RenderConfig;

/// Sample rings/segments used for renderer-generated primitives
const PRIMITIVE_SEGMENTS: usize = 24;

/// Largest sprite edge (pixels)
const MAX_SPRITE_PX: f32 = 12.0;

/// Rasterize the store as seen through `view_proj`
pub fn rasterize(store: &DrawableStore, view_proj: Mat4, config: &RenderConfig) -> RgbaImage {
    let width = config.window_width.max(1);
    let height = config.window_height.max(1);
    let clear = Color::from_hex(config.clear_color);
    let mut frame = vec![clear; pixel_count(width, height)];

    for (_, drawable) in store.iter() {
        let mvp = view_proj * drawable.transform.matrix();
        let points = primitive_points(drawable);

        for (i, point) in points.iter().enumerate() {
            let clip = mvp * point.extend(1.0);
            if clip.w <= 0.0 {
                continue; // Behind the camera
            }
            let ndc = clip.truncate() / clip.w;
            if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 || !(0.0..=1.0).contains(&ndc.z) {
                continue;
            }

            let px = (ndc.x + 1.0) * 0.5 * width as f32;
            let py = (1.0 - ndc.y) * 0.5 * height as f32;
            let sprite = match drawable.kind {
                DrawableKind::Points => {
                    (drawable.material.size * height as f32 * 0.5 / clip.w).clamp(1.0, MAX_SPRITE_PX)
                }
                _ => 1.0,
            };

            let color = fragment_color(drawable, i);
            splat(&mut frame, width, height, px, py, sprite, color, drawable);
        }
    }

    let mut image = RgbaImage::new(width, height);
    for (pixel, color) in image.pixels_mut().zip(frame.iter()) {
        let [r, g, b] = color.to_rgb8();
        *pixel = Rgba([r, g, b, 255]);
    }
    image
}

/// Rasterize and write a PNG, creating the parent directory if needed
pub fn save_snapshot(
    store: &DrawableStore,
    view_proj: Mat4,
    config: &RenderConfig,
    path: &Path,
) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    rasterize(store, view_proj, config)
        .save(path)
        .map_err(|source| SceneError::Snapshot {
            path: path.to_path_buf(),
            source,
        })
}

/// Pixels in a `width` × `height` frame, computed without u32 overflow
fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

fn fragment_color(drawable: &DrawableState, index: usize) -> Color {
    let base = drawable.material.color;
    match (&drawable.colors, drawable.material.vertex_colors) {
        (Some(colors), true) => colors
            .get(index)
            .map_or(base, |vertex| base.modulate(*vertex)),
        _ => base,
    }
}

#[allow(clippy::too_many_arguments)]
fn splat(
    frame: &mut [Color],
    width: u32,
    height: u32,
    px: f32,
    py: f32,
    size: f32,
    color: Color,
    drawable: &DrawableState,
) {
    let opacity = drawable.material.opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 {
        return;
    }

    let half = size * 0.5;
    let x0 = (px - half).floor().max(0.0) as u32;
    let y0 = (py - half).floor().max(0.0) as u32;
    let x1 = ((px + half).ceil() as u32).min(width);
    let y1 = ((py + half).ceil() as u32).min(height);

    for y in y0..y1 {
        for x in x0..x1 {
            let dst = &mut frame[y as usize * width as usize + x as usize];
            *dst = match drawable.material.blending {
                Blending::Additive => {
                    let add = color.scale(opacity);
                    Color::new(dst.r + add.r, dst.g + add.g, dst.b + add.b)
                }
                Blending::Normal => Color::new(
                    dst.r + (color.r - dst.r) * opacity,
                    dst.g + (color.g - dst.g) * opacity,
                    dst.b + (color.b - dst.b) * opacity,
                ),
            };
        }
    }
}

/// Local-space points to draw for a drawable
fn primitive_points(drawable: &DrawableState) -> Vec<Vec3> {
    match drawable.kind {
        DrawableKind::Points | DrawableKind::Surface { .. } => drawable.positions.clone(),
        DrawableKind::Sphere { radius, .. } => sphere_points(radius, PRIMITIVE_SEGMENTS),
        DrawableKind::Cylinder { radius, height } => {
            cylinder_points(radius, height, PRIMITIVE_SEGMENTS)
        }
    }
}

fn sphere_points(radius: f32, segments: usize) -> Vec<Vec3> {
    let mut points = Vec::with_capacity((segments + 1) * segments);
    for ring in 0..=segments {
        let theta = ring as f32 / segments as f32 * PI;
        for seg in 0..segments {
            let phi = seg as f32 / segments as f32 * TAU;
            points.push(Vec3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.cos(),
                radius * theta.sin() * phi.sin(),
            ));
        }
    }
    points
}

fn cylinder_points(radius: f32, height: f32, segments: usize) -> Vec<Vec3> {
    let mut points = Vec::with_capacity((segments + 1) * segments);
    for ring in 0..=segments {
        let y = ring as f32 / segments as f32 * height - height * 0.5;
        for seg in 0..segments {
            let phi = seg as f32 / segments as f32 * TAU;
            points.push(Vec3::new(radius * phi.cos(), y, radius * phi.sin()));
        }
    }
    points
}
