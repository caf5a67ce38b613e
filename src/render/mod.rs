//! Renderer seam: the drawing collaborator the scene talks to, plus the data it exchanges.
//!
//! The scene never owns GPU state. Entities describe their drawables once, then re-upload
//! geometry, materials and transforms after each update.

mod snapshot;
mod store;

pub use snapshot::{rasterize, save_snapshot};
pub use store::{DrawableState, DrawableStore, RenderStats};

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Linear RGB color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Color from a 0xRRGGBB literal
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::new(channel(16), channel(8), channel(0))
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    pub fn modulate(self, other: Color) -> Self {
        Self::new(self.r * other.r, self.g * other.g, self.b * other.b)
    }

    /// Quantize to 8-bit channels (clamped)
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [quantize(self.r), quantize(self.g), quantize(self.b)]
    }
}

/// How a drawable's fragments combine with what is already drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blending {
    Normal,
    Additive,
}

/// Material descriptor (opaque to the scene beyond these fields)
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub color: Color,

    /// Point size for point drawables (pixels at unit distance)
    pub size: f32,

    pub opacity: f32,

    /// Multiply `color` by the per-vertex colors of the geometry
    pub vertex_colors: bool,

    pub blending: Blending,

    /// Asset name of the texture; never loaded by the core
    pub texture: Option<String>,
}

impl Material {
    /// Additive, transparent point sprite material
    pub fn points(color: Color, size: f32, texture: &str) -> Self {
        Self {
            color,
            size,
            opacity: 1.0,
            vertex_colors: false,
            blending: Blending::Additive,
            texture: Some(texture.to_string()),
        }
    }

    /// Opaque surface material
    pub fn surface(color: Color, texture: &str) -> Self {
        Self {
            color,
            size: 1.0,
            opacity: 1.0,
            vertex_colors: false,
            blending: Blending::Normal,
            texture: Some(texture.to_string()),
        }
    }

    pub fn with_vertex_colors(mut self) -> Self {
        self.vertex_colors = true;
        self
    }
}

/// Population-level placement of a drawable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Handle to a drawable owned by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DrawableId(pub u32);

/// Shape of a drawable
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawableKind {
    /// One sprite per sample
    Points,

    /// Indexed triangle grid of `columns × rows` vertices
    Surface { columns: usize, rows: usize },

    /// Renderer-generated sphere; `inside` renders the back faces (sky dome)
    Sphere { radius: f32, inside: bool },

    /// Renderer-generated upright cylinder centered on the transform
    Cylinder { radius: f32, height: f32 },
}

/// Borrowed geometry handed to the renderer for (re-)upload
#[derive(Debug, Clone, Copy, Default)]
pub struct Geometry<'a> {
    pub positions: &'a [Vec3],
    pub colors: Option<&'a [Color]>,
    pub indices: Option<&'a [u32]>,
}

impl<'a> Geometry<'a> {
    pub fn points(positions: &'a [Vec3], colors: &'a [Color]) -> Self {
        Self {
            positions,
            colors: Some(colors),
            indices: None,
        }
    }

    pub fn surface(positions: &'a [Vec3], indices: &'a [u32]) -> Self {
        Self {
            positions,
            colors: None,
            indices: Some(indices),
        }
    }

    /// Size in bytes of the data a GPU upload would copy
    pub fn byte_len(&self) -> usize {
        let positions = bytemuck::cast_slice::<Vec3, u8>(self.positions).len();
        let colors = self
            .colors
            .map_or(0, |c| bytemuck::cast_slice::<Color, u8>(c).len());
        let indices = self
            .indices
            .map_or(0, |i| bytemuck::cast_slice::<u32, u8>(i).len());
        positions + colors + indices
    }
}

/// Everything needed to create a drawable
#[derive(Debug, Clone)]
pub struct DrawableDesc<'a> {
    pub label: &'static str,
    pub kind: DrawableKind,
    pub geometry: Geometry<'a>,
    pub material: Material,
    pub transform: Transform,
}

/// Drawing collaborator consumed by the scene
pub trait Renderer {
    /// Add a drawable to the draw set
    fn create_drawable(&mut self, desc: DrawableDesc<'_>) -> DrawableId;

    /// Replace a drawable's geometry (mark it dirty for re-upload)
    fn upload_geometry(&mut self, id: DrawableId, geometry: Geometry<'_>);

    /// Replace a drawable's material
    fn upload_material(&mut self, id: DrawableId, material: &Material);

    /// Replace a drawable's transform
    fn upload_transform(&mut self, id: DrawableId, transform: &Transform);

    /// Remove a drawable from the draw set
    fn remove_drawable(&mut self, id: DrawableId);
}
