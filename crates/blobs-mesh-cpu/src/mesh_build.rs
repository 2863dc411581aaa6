use blobs_geom::Vec3;
use blobs_lattice::Lattice;

use crate::error::{BufferKind, MeshError};
use crate::tables::MAX_TRIANGLES_PER_CUBE;

/// Flat vertex/index arrays for one extracted surface.
///
/// Limits are fixed when the buffers are sized and every push is checked
/// against them, so a frame can never grow the allocation.
#[derive(Clone, Debug)]
pub struct MeshBuffers {
    pos: Vec<f32>,
    norm: Vec<f32>,
    uv: Vec<f32>,
    idx: Vec<u32>,
    max_vertices: usize,
    max_triangles: usize,
}

impl MeshBuffers {
    pub fn with_limits(max_vertices: usize, max_triangles: usize) -> Self {
        Self {
            pos: Vec::with_capacity(max_vertices * 3),
            norm: Vec::with_capacity(max_vertices * 3),
            uv: Vec::with_capacity(max_vertices * 2),
            idx: Vec::with_capacity(max_triangles * 3),
            max_vertices,
            max_triangles,
        }
    }

    /// Sized for the worst case of `lattice`: one vertex per unique edge and
    /// five triangles per cube.
    pub fn for_lattice(lattice: &Lattice) -> Self {
        Self::with_limits(
            lattice.edge_count(),
            lattice.cube_count() * MAX_TRIANGLES_PER_CUBE,
        )
    }

    /// Clears all arrays but retains capacity for reuse across frames.
    #[inline]
    pub fn clear_keep_capacity(&mut self) {
        self.pos.clear();
        self.norm.clear();
        self.uv.clear();
        self.idx.clear();
    }

    #[inline]
    pub fn max_vertices(&self) -> usize {
        self.max_vertices
    }

    #[inline]
    pub fn max_triangles(&self) -> usize {
        self.max_triangles
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    /// Interleaved `x, y, z` per vertex.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    #[inline]
    pub fn normals(&self) -> &[f32] {
        &self.norm
    }

    /// Interleaved `u, v` per vertex.
    #[inline]
    pub fn uvs(&self) -> &[f32] {
        &self.uv
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.idx
    }

    pub fn position(&self, v: u32) -> Vec3 {
        let i = v as usize * 3;
        Vec3::new(self.pos[i], self.pos[i + 1], self.pos[i + 2])
    }

    pub fn normal(&self, v: u32) -> Vec3 {
        let i = v as usize * 3;
        Vec3::new(self.norm[i], self.norm[i + 1], self.norm[i + 2])
    }

    pub fn uv(&self, v: u32) -> [f32; 2] {
        let i = v as usize * 2;
        [self.uv[i], self.uv[i + 1]]
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.idx.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Appends one vertex and returns its index.
    pub fn push_vertex(&mut self, p: Vec3, n: Vec3, uv: [f32; 2]) -> Result<u32, MeshError> {
        let index = self.vertex_count();
        if index >= self.max_vertices {
            return Err(MeshError::CapacityExceeded {
                kind: BufferKind::Vertices,
                capacity: self.max_vertices,
            });
        }
        self.pos.extend_from_slice(&[p.x, p.y, p.z]);
        self.norm.extend_from_slice(&[n.x, n.y, n.z]);
        self.uv.extend_from_slice(&uv);
        Ok(index as u32)
    }

    pub fn push_triangle(&mut self, tri: [u32; 3]) -> Result<(), MeshError> {
        if self.triangle_count() >= self.max_triangles {
            return Err(MeshError::CapacityExceeded {
                kind: BufferKind::Triangles,
                capacity: self.max_triangles,
            });
        }
        debug_assert!(tri.iter().all(|&v| (v as usize) < self.vertex_count()));
        self.idx.extend_from_slice(&tri);
        Ok(())
    }
}
