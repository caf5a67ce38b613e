//! In-memory renderer keeping the last uploaded state of every drawable.

use std::collections::BTreeMap;

use glam::Vec3;
use log::warn;

use super::{Color, DrawableDesc, DrawableId, DrawableKind, Geometry, Material, Renderer, Transform};

/// Upload counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub drawables_created: u64,
    pub drawables_removed: u64,
    pub geometry_uploads: u64,
    pub material_uploads: u64,
    pub transform_uploads: u64,
    pub bytes_uploaded: u64,
}

/// Last known state of one drawable
#[derive(Debug, Clone)]
pub struct DrawableState {
    pub label: &'static str,
    pub kind: DrawableKind,
    pub positions: Vec<Vec3>,
    pub colors: Option<Vec<Color>>,
    pub indices: Option<Vec<u32>>,
    pub material: Material,
    pub transform: Transform,
}

impl DrawableState {
    fn apply_geometry(&mut self, geometry: Geometry<'_>) {
        self.positions.clear();
        self.positions.extend_from_slice(geometry.positions);
        self.colors = geometry.colors.map(<[Color]>::to_vec);
        if let Some(indices) = geometry.indices {
            self.indices = Some(indices.to_vec());
        }
    }
}

/// Renderer that records drawables in memory (headless driver, tests, rasterizer input)
#[derive(Debug, Default)]
pub struct DrawableStore {
    drawables: BTreeMap<DrawableId, DrawableState>,
    next_id: u32,
    stats: RenderStats,
}

impl DrawableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }

    pub fn get(&self, id: DrawableId) -> Option<&DrawableState> {
        self.drawables.get(&id)
    }

    /// Drawables in creation order
    pub fn iter(&self) -> impl Iterator<Item = (DrawableId, &DrawableState)> {
        self.drawables.iter().map(|(id, state)| (*id, state))
    }

    /// Number of live drawables carrying `label`
    pub fn count_labeled(&self, label: &str) -> usize {
        self.drawables.values().filter(|d| d.label == label).count()
    }

    fn state_mut(&mut self, id: DrawableId, what: &str) -> Option<&mut DrawableState> {
        let state = self.drawables.get_mut(&id);
        if state.is_none() {
            warn!("{} upload for unknown drawable {:?}", what, id);
        }
        state
    }
}

impl Renderer for DrawableStore {
    fn create_drawable(&mut self, desc: DrawableDesc<'_>) -> DrawableId {
        let id = DrawableId(self.next_id);
        self.next_id += 1;

        let mut state = DrawableState {
            label: desc.label,
            kind: desc.kind,
            positions: Vec::new(),
            colors: None,
            indices: None,
            material: desc.material,
            transform: desc.transform,
        };
        state.apply_geometry(desc.geometry);

        self.stats.drawables_created += 1;
        self.stats.bytes_uploaded += desc.geometry.byte_len() as u64;
        self.drawables.insert(id, state);
        id
    }

    fn upload_geometry(&mut self, id: DrawableId, geometry: Geometry<'_>) {
        let bytes = geometry.byte_len() as u64;
        if let Some(state) = self.state_mut(id, "geometry") {
            state.apply_geometry(geometry);
            self.stats.geometry_uploads += 1;
            self.stats.bytes_uploaded += bytes;
        }
    }

    fn upload_material(&mut self, id: DrawableId, material: &Material) {
        if let Some(state) = self.state_mut(id, "material") {
            state.material = material.clone();
            self.stats.material_uploads += 1;
        }
    }

    fn upload_transform(&mut self, id: DrawableId, transform: &Transform) {
        if let Some(state) = self.state_mut(id, "transform") {
            state.transform = *transform;
            self.stats.transform_uploads += 1;
        }
    }

    fn remove_drawable(&mut self, id: DrawableId) {
        if self.drawables.remove(&id).is_some() {
            self.stats.drawables_removed += 1;
        } else {
            warn!("remove of unknown drawable {:?}", id);
        }
    }
}
