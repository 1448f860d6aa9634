//! Triangle mesh derived from a [`HeightField`].
//!
//! The mesh is a plain triangle list with no index buffer: every grid cell
//! `(i, j)` in `[0, W-1) x [0, L-1)` contributes two triangles, six vertices,
//! in this order:
//!
//! ```text
//! left:  (i, j)  (i+1, j+1)  (i, j+1)
//! right: (i, j)  (i+1, j)    (i+1, j+1)
//! ```
//!
//! X/Z positions and texture coordinates are fixed when the mesh is built.
//! [`SurfaceMesh::refresh`] only rewrites the Y coordinate and the normal, in
//! the same order, so the vertex count and vertex order never change and a
//! renderer can keep binding the buffer by index.

use crate::render::vertex::WaterVertex;
use super::heightfield::HeightField;

/// Cell-relative grid offsets of the six vertices emitted per cell.
const CELL_VERTICES: [(usize, usize); 6] = [
    // Left triangle
    (0, 0), (1, 1), (0, 1),
    // Right triangle
    (0, 0), (1, 0), (1, 1),
];

/// Read-only view of the mesh handed to a renderer for one frame.
#[derive(Clone, Copy, Debug)]
pub struct MeshBuffer<'a> {
    pub vertices: &'a [WaterVertex],
    pub triangle_count: usize,
}

impl MeshBuffer<'_> {
    /// Raw vertex bytes, ready for a GPU upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.vertices)
    }
}

/// Vertex buffer kept in sync with a heightfield's model heights and normals.
pub struct SurfaceMesh {
    width: usize,
    length: usize,
    vertices: Vec<WaterVertex>,
}

impl SurfaceMesh {
    /// Build the vertex buffer for `field`.
    ///
    /// Texture coordinates spread the unit square over the grid as
    /// `(i / W, j / L)`; positions and normals are taken from the field's
    /// current model state.
    pub fn new(field: &HeightField) -> Self {
        let width = field.width();
        let length = field.length();
        let tex_step_x = 1.0 / width as f32;
        let tex_step_z = 1.0 / length as f32;

        let mut vertices = Vec::with_capacity(Self::vertex_count_for(width, length));
        for_each_vertex(width, length, |i, j| {
            let normal = field.normals().get(i, j);
            vertices.push(WaterVertex {
                position: [i as f32, field.heights().get(i, j), j as f32],
                normal: normal.to_array(),
                tex_coord: [i as f32 * tex_step_x, j as f32 * tex_step_z],
            });
        });

        log::info!(
            "Surface mesh: {}x{} grid, {} vertices, {} triangles",
            width,
            length,
            vertices.len(),
            vertices.len() / 3
        );

        Self { width, length, vertices }
    }

    /// Number of vertices in the buffer for a `width x length` grid.
    pub fn vertex_count_for(width: usize, length: usize) -> usize {
        6 * (width - 1) * (length - 1)
    }

    /// Copy the field's model heights and normals into the existing buffer.
    ///
    /// # Panics
    /// If `field` does not have the shape this mesh was built from.
    pub fn refresh(&mut self, field: &HeightField) {
        assert_eq!(
            (field.width(), field.length()),
            (self.width, self.length),
            "heightfield shape changed under its mesh"
        );

        let heights = field.heights();
        let normals = field.normals();
        let mut vertices = self.vertices.iter_mut();
        for_each_vertex(self.width, self.length, |i, j| {
            if let Some(vertex) = vertices.next() {
                vertex.position[1] = heights.get(i, j);
                vertex.normal = normals.get(i, j).to_array();
            }
        });
    }

    /// Vertices and triangle count for the renderer.
    ///
    /// The borrow ends before the next `refresh`, so the renderer has to finish
    /// uploading within the frame.
    pub fn buffer(&self) -> MeshBuffer<'_> {
        MeshBuffer {
            vertices: &self.vertices,
            triangle_count: self.triangle_count(),
        }
    }

    pub fn vertices(&self) -> &[WaterVertex] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Visit the grid cell behind every vertex, in buffer order.
fn for_each_vertex(width: usize, length: usize, mut visit: impl FnMut(usize, usize)) {
    for i in 0..width - 1 {
        for j in 0..length - 1 {
            for (di, dj) in CELL_VERTICES {
                visit(i + di, j + dj);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_count() {
        for (w, l) in [(2, 2), (3, 5), (10, 4)] {
            let field = HeightField::with_seed(w, l, 1).unwrap();
            let mesh = SurfaceMesh::new(&field);
            assert_eq!(mesh.vertex_count(), 6 * (w - 1) * (l - 1));
            assert_eq!(mesh.buffer().triangle_count, 2 * (w - 1) * (l - 1));
            assert_eq!(mesh.vertex_count(), SurfaceMesh::vertex_count_for(w, l));
        }
    }

    #[test]
    fn test_initial_mesh_is_flat() {
        let field = HeightField::with_seed(4, 3, 2).unwrap();
        let mesh = SurfaceMesh::new(&field);
        for v in mesh.vertices() {
            assert_eq!(v.position[1], 0.0);
            assert_eq!(v.normal, [0.0; 3]);
        }
    }

    #[test]
    fn test_cell_layout() {
        let field = HeightField::with_seed(3, 3, 2).unwrap();
        let mesh = SurfaceMesh::new(&field);
        let v = mesh.vertices();

        let xz = |k: usize| (v[k].position[0], v[k].position[2]);
        // First cell (0, 0)
        assert_eq!(xz(0), (0.0, 0.0));
        assert_eq!(xz(1), (1.0, 1.0));
        assert_eq!(xz(2), (0.0, 1.0));
        assert_eq!(xz(3), (0.0, 0.0));
        assert_eq!(xz(4), (1.0, 0.0));
        assert_eq!(xz(5), (1.0, 1.0));
        // Second cell walks along j
        assert_eq!(xz(6), (0.0, 1.0));
        // Third cell is (1, 0)
        assert_eq!(xz(12), (1.0, 0.0));
    }

    #[test]
    fn test_tex_coords() {
        let field = HeightField::with_seed(4, 5, 2).unwrap();
        let mesh = SurfaceMesh::new(&field);
        for v in mesh.vertices() {
            let expected_u = v.position[0] / 4.0;
            let expected_v = v.position[2] / 5.0;
            assert!((v.tex_coord[0] - expected_u).abs() < 1e-6);
            assert!((v.tex_coord[1] - expected_v).abs() < 1e-6);
        }
    }

    #[test]
    fn test_refresh_tracks_field() {
        let mut field = HeightField::with_seed(5, 4, 8).unwrap();
        let mut mesh = SurfaceMesh::new(&field);
        let tex_before: Vec<[f32; 2]> = mesh.vertices().iter().map(|v| v.tex_coord).collect();
        let ptr = mesh.vertices().as_ptr();

        field.step(1.0 / 30.0);
        mesh.refresh(&field);

        assert_eq!(mesh.vertices().as_ptr(), ptr);
        let mut k = 0;
        for i in 0..4 {
            for j in 0..3 {
                for (di, dj) in CELL_VERTICES {
                    let vert = mesh.vertices()[k];
                    assert_eq!(vert.position, [
                        (i + di) as f32,
                        field.height(i + di, j + dj).unwrap(),
                        (j + dj) as f32,
                    ]);
                    assert_eq!(vert.normal, field.normal(i + di, j + dj).unwrap().to_array());
                    assert_eq!(vert.tex_coord, tex_before[k]);
                    k += 1;
                }
            }
        }
        assert_eq!(k, mesh.vertex_count());
    }

    #[test]
    fn test_refresh_idempotent() {
        let mut field = HeightField::with_seed(6, 6, 21).unwrap();
        let mut mesh = SurfaceMesh::new(&field);
        field.step(0.02);

        mesh.refresh(&field);
        let first = mesh.buffer().as_bytes().to_vec();
        mesh.refresh(&field);
        assert_eq!(mesh.buffer().as_bytes(), first.as_slice());
    }

    #[test]
    #[should_panic(expected = "shape changed")]
    fn test_refresh_rejects_other_shape() {
        let field = HeightField::with_seed(4, 4, 1).unwrap();
        let other = HeightField::with_seed(5, 4, 1).unwrap();
        let mut mesh = SurfaceMesh::new(&field);
        mesh.refresh(&other);
    }
}
