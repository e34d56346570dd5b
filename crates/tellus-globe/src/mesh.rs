//! UV sphere mesh generation for the globe and its shell layers.

use glam::Vec3;

/// CPU-side sphere mesh: unit radius, equirectangular UVs.
///
/// The same mesh backs the surface, cloud, and atmosphere layers; the shells
/// scale it in their model matrices rather than regenerating geometry.
pub struct GlobeMesh {
    /// Vertex positions on the unit sphere.
    pub positions: Vec<Vec3>,
    /// Per-vertex normals (equal to positions for a unit sphere).
    pub normals: Vec<Vec3>,
    /// Equirectangular UVs: u wraps longitude, v runs pole to pole.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl GlobeMesh {
    /// Generate a latitude/longitude sphere with `segments` subdivisions in
    /// both directions.
    ///
    /// Produces `(segments + 1)^2` vertices; the seam column and pole rows
    /// are duplicated so UVs stay continuous.
    pub fn generate(segments: u32) -> Self {
        let cols = segments + 1;
        let vertex_count = (cols * cols) as usize;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);
        let mut uvs = Vec::with_capacity(vertex_count);

        for row in 0..=segments {
            // phi runs from 0 at the north pole to PI at the south pole.
            let v = row as f32 / segments as f32;
            let phi = v * std::f32::consts::PI;
            for col in 0..=segments {
                let u = col as f32 / segments as f32;
                let theta = u * std::f32::consts::TAU;

                // theta = 0 points along +Z so longitude 0 faces the
                // default camera.
                let position = Vec3::new(
                    phi.sin() * theta.sin(),
                    phi.cos(),
                    phi.sin() * theta.cos(),
                );
                positions.push(position);
                normals.push(position);
                uvs.push([u, v]);
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for row in 0..segments {
            for col in 0..segments {
                let a = row * cols + col;
                let b = (row + 1) * cols + col;
                // Two triangles per quad, counter-clockwise from outside.
                indices.extend_from_slice(&[a, b, a + 1]);
                indices.extend_from_slice(&[a + 1, b, b + 1]);
            }
        }

        log::debug!(
            "Generated globe mesh: {} vertices, {} indices ({segments} segments)",
            positions.len(),
            indices.len()
        );

        Self {
            positions,
            normals,
            uvs,
            indices,
        }
    }

    /// Number of vertices in the mesh.
    pub fn vertex_count(&self) -> u32 {
        self.positions.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count_matches_segment_grid() {
        let mesh = GlobeMesh::generate(128);
        assert_eq!(mesh.vertex_count(), 129 * 129);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(mesh.uvs.len(), mesh.positions.len());
    }

    #[test]
    fn test_index_count_matches_quad_grid() {
        let mesh = GlobeMesh::generate(16);
        assert_eq!(mesh.indices.len(), 16 * 16 * 6);
    }

    #[test]
    fn test_all_vertices_on_unit_sphere() {
        let mesh = GlobeMesh::generate(32);
        for (i, p) in mesh.positions.iter().enumerate() {
            let len = p.length();
            assert!(
                (len - 1.0).abs() < 1e-5,
                "Vertex {i} is off the unit sphere: length = {len}"
            );
        }
    }

    #[test]
    fn test_normals_equal_positions() {
        let mesh = GlobeMesh::generate(8);
        for (p, n) in mesh.positions.iter().zip(mesh.normals.iter()) {
            assert!((*p - *n).length() < 1e-6);
        }
    }

    #[test]
    fn test_uvs_cover_unit_square() {
        let mesh = GlobeMesh::generate(8);
        for [u, v] in &mesh.uvs {
            assert!((0.0..=1.0).contains(u));
            assert!((0.0..=1.0).contains(v));
        }
        // Corners of the UV grid are present exactly.
        assert_eq!(mesh.uvs[0], [0.0, 0.0]);
        assert_eq!(*mesh.uvs.last().unwrap(), [1.0, 1.0]);
    }

    #[test]
    fn test_poles_and_equator_placement() {
        let mesh = GlobeMesh::generate(4);
        // First row is the north pole, last row the south pole.
        assert!((mesh.positions[0].y - 1.0).abs() < 1e-6);
        assert!((mesh.positions.last().unwrap().y + 1.0).abs() < 1e-6);
        // Middle row sits on the equator.
        let equator_start = (2 * 5) as usize;
        assert!(mesh.positions[equator_start].y.abs() < 1e-6);
    }

    #[test]
    fn test_seam_columns_share_positions() {
        let mesh = GlobeMesh::generate(8);
        let cols = 9usize;
        for row in 0..=8usize {
            let first = mesh.positions[row * cols];
            let last = mesh.positions[row * cols + 8];
            assert!(
                (first - last).length() < 1e-5,
                "Seam vertices at row {row} do not coincide"
            );
        }
    }

    #[test]
    fn test_all_indices_in_range() {
        let mesh = GlobeMesh::generate(12);
        let count = mesh.vertex_count();
        for &i in &mesh.indices {
            assert!(i < count);
        }
    }
}
