//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct which holds a generated sphere on the GPU side:
//! one buffer of positions, one of texture coordinates and one of indices.

use std::sync::Arc;

use orbit_core::mesh::SphereMesh;

use super::context::{BufferTarget, GraphicsContext};
use crate::error::{OrbitError, ResourceKind};

/// Represents a mesh stored on the GPU side.
pub struct Mesh<G: GraphicsContext> {
    gl: Arc<G>,
    vao: G::VertexArray,
    positions: G::Buffer,
    uvs: G::Buffer,
    indices: G::Buffer,
    index_count: usize,
}

impl<G: GraphicsContext> Mesh<G> {
    /// Uploads the given sphere into new static buffers.
    pub fn new(gl: &Arc<G>, sphere: &SphereMesh) -> Result<Self, OrbitError> {
        let vao = gl
            .create_vertex_array()
            .map_err(OrbitError::resource(ResourceKind::VertexArray))?;

        // Positions, UVs, indices. Release everything created so far if one fails.
        let mut buffers = Vec::with_capacity(3);
        while buffers.len() < 3 {
            match gl.create_buffer() {
                Ok(buffer) => buffers.push(buffer),
                Err(reason) => {
                    for buffer in buffers {
                        gl.delete_buffer(buffer);
                    }
                    gl.delete_vertex_array(vao);
                    return Err(OrbitError::ResourceCreation {
                        kind: ResourceKind::Buffer,
                        reason,
                    });
                }
            }
        }

        let mesh = Self {
            gl: Arc::clone(gl),
            vao,
            positions: buffers[0],
            uvs: buffers[1],
            indices: buffers[2],
            index_count: sphere.index_count(),
        };

        gl.bind_vertex_array(Some(mesh.vao));
        gl.buffer_data(
            BufferTarget::Vertex,
            mesh.positions,
            bytemuck::cast_slice(&sphere.position_data()),
        );
        gl.buffer_data(BufferTarget::Vertex, mesh.uvs, bytemuck::cast_slice(&sphere.uv_data()));
        gl.buffer_data(BufferTarget::Index, mesh.indices, bytemuck::cast_slice(&sphere.indices));
        gl.bind_vertex_array(None);
        gl.bind_buffer(BufferTarget::Vertex, None);
        gl.bind_buffer(BufferTarget::Index, None);

        Ok(mesh)
    }

    /// Binds the vertex array and points the given attribute slots at the position
    /// and texture coordinate buffers. Unresolved slots are skipped.
    pub fn bind_vertex_streams(&self, position_slot: Option<u32>, uv_slot: Option<u32>) {
        self.gl.bind_vertex_array(Some(self.vao));
        if let Some(slot) = position_slot {
            self.gl.bind_buffer(BufferTarget::Vertex, Some(self.positions));
            self.gl.vertex_attrib_f32(slot, 3);
        }
        if let Some(slot) = uv_slot {
            self.gl.bind_buffer(BufferTarget::Vertex, Some(self.uvs));
            self.gl.vertex_attrib_f32(slot, 2);
        }
    }

    /// Binds the index buffer and draws every triangle of the mesh.
    pub fn draw(&self) {
        self.gl.bind_buffer(BufferTarget::Index, Some(self.indices));
        self.gl.draw_triangles(self.index_count);
        self.gl.bind_vertex_array(None);
    }

    /// Returns the amount of indices used in the mesh.
    pub fn index_count(&self) -> usize {
        self.index_count
    }
}

impl<G: GraphicsContext> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.positions);
        self.gl.delete_buffer(self.uvs);
        self.gl.delete_buffer(self.indices);
        self.gl.delete_vertex_array(self.vao);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abs::mock::{Call, MockContext};
    use orbit_core::mesh::SphereOptions;

    fn sphere() -> SphereMesh {
        SphereMesh::generate(SphereOptions {
            latitude_bands: 2,
            longitude_bands: 2,
            radius: 1.0,
        })
    }

    #[test]
    fn test_upload_sizes() {
        let gl = Arc::new(MockContext::new());
        let mesh = Mesh::new(&gl, &sphere()).unwrap();
        assert_eq!(mesh.index_count(), 24);

        let uploads: Vec<usize> = gl
            .take_calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::BufferData(_, _, len) => Some(len),
                _ => None,
            })
            .collect();
        assert_eq!(uploads, vec![9 * 3 * 4, 9 * 2 * 4, 24 * 4]);
    }

    #[test]
    fn test_failed_buffer_releases_earlier_objects() {
        let gl = Arc::new(MockContext::new());
        gl.buffer_budget.set(Some(2));

        let result = Mesh::new(&gl, &sphere());
        assert!(matches!(
            result,
            Err(OrbitError::ResourceCreation {
                kind: ResourceKind::Buffer,
                ..
            })
        ));
        assert!(gl.live_buffers.borrow().is_empty());
        assert!(gl.live_vertex_arrays.borrow().is_empty());
    }

    #[test]
    fn test_drop_releases_buffers() {
        let gl = Arc::new(MockContext::new());
        let mesh = Mesh::new(&gl, &sphere()).unwrap();
        assert_eq!(gl.live_buffers.borrow().len(), 3);
        assert_eq!(gl.live_vertex_arrays.borrow().len(), 1);
        drop(mesh);
        assert!(gl.live_buffers.borrow().is_empty());
        assert!(gl.live_vertex_arrays.borrow().is_empty());
    }

    #[test]
    fn test_skips_unresolved_slots() {
        let gl = Arc::new(MockContext::new());
        let mesh = Mesh::new(&gl, &sphere()).unwrap();
        gl.take_calls();

        mesh.bind_vertex_streams(None, Some(1));
        let calls = gl.take_calls();
        assert_eq!(
            calls.iter().filter(|c| matches!(c, Call::VertexAttrib { .. })).count(),
            1
        );
        assert!(calls.contains(&Call::VertexAttrib {
            location: 1,
            components: 2
        }));
    }
}
