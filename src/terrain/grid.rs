//! Regular XZ grid mesh shared by the terrain and the sea.

use glam::Vec3;

/// Flat rectangular grid centered on the origin, row-major along +Z then +X
#[derive(Debug, Clone)]
pub struct GridMesh {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
    columns: usize,
    rows: usize,
}

impl GridMesh {
    /// Create a `width × length` grid with `segments_x` cells along X and `segments_z` along Z
    pub fn new(width: f32, length: f32, segments_x: usize, segments_z: usize) -> Self {
        let segments_x = segments_x.max(1);
        let segments_z = segments_z.max(1);
        let spacing_x = width / segments_x as f32;
        let spacing_z = length / segments_z as f32;
        let columns = segments_x + 1;
        let rows = segments_z + 1;

        let mut positions = Vec::with_capacity(columns * rows);
        let mut indices = Vec::with_capacity(segments_x * segments_z * 6);

        // Generate flat XZ plane grid
        for z in 0..rows {
            for x in 0..columns {
                let x_pos = x as f32 * spacing_x - width / 2.0;
                let z_pos = z as f32 * spacing_z - length / 2.0;
                positions.push(Vec3::new(x_pos, 0.0, z_pos));
            }
        }

        // Generate triangle indices (counter-clockwise winding)
        for z in 0..segments_z {
            for x in 0..segments_x {
                let top_left = (z * columns + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * columns + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            positions,
            indices,
            columns,
            rows,
        }
    }

    /// Vertices per row
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Vertex rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
