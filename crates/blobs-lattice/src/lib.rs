//! Shared-topology sample lattice with per-frame caches (engine-only).
//!
//! Points, edges and cubes live in flat arenas owned by [`Lattice`]; cubes refer
//! to their corners and edges through `u32` handles. Cached values carry a
//! [`FrameStamp`] and are valid only while it equals the current frame.
#![forbid(unsafe_code)]

mod build;
mod cache;
mod dims;
mod error;
pub mod topology;

use blobs_geom::{Aabb, Axis, Vec3};

pub use cache::FrameStamp;
pub use dims::LatticeDims;
pub use error::LatticeError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CubeId(pub u32);

#[derive(Clone, Debug)]
pub struct LatticePoint {
    pub coord: [u32; 3],
    pub position: Vec3,
    intensity: f32,
    stamp: FrameStamp,
}

impl LatticePoint {
    /// Last cached intensity, whatever frame it belongs to.
    #[inline]
    pub fn cached_intensity(&self) -> f32 {
        self.intensity
    }

    #[inline]
    pub fn stamp(&self) -> FrameStamp {
        self.stamp
    }
}

/// One unique lattice edge, shared by every cube incident to it.
#[derive(Clone, Debug)]
pub struct Edge {
    pub axis: Axis,
    crossing: Vec3,
    vertex: u32,
    stamp: FrameStamp,
}

impl Edge {
    #[inline]
    pub fn crossing(&self) -> Vec3 {
        self.crossing
    }

    #[inline]
    pub fn vertex(&self) -> u32 {
        self.vertex
    }

    #[inline]
    pub fn stamp(&self) -> FrameStamp {
        self.stamp
    }
}

#[derive(Clone, Debug)]
pub struct Cube {
    pub coord: [u32; 3],
    /// Corner handles in [`topology::CORNER_OFFSETS`] order.
    pub points: [PointId; 8],
    /// Edge handles in [`topology::EDGE_CORNERS`] order.
    pub edges: [EdgeId; 12],
    visited: FrameStamp,
}

impl Cube {
    #[inline]
    pub fn visited(&self) -> FrameStamp {
        self.visited
    }
}

pub struct Lattice {
    dims: LatticeDims,
    points: Vec<LatticePoint>,
    edges: Vec<Edge>,
    cubes: Vec<Cube>,
    frame: FrameStamp,
    evaluations: u64,
}

impl Lattice {
    /// Builds points, shared edges and cubes for `dims`.
    pub fn new(dims: LatticeDims) -> Self {
        build::build(dims)
    }

    /// Validates and builds in one step.
    pub fn with_counts(x: u32, y: u32, z: u32) -> Result<Self, LatticeError> {
        Ok(Self::new(LatticeDims::new(x, y, z)?))
    }

    #[inline]
    pub fn dims(&self) -> LatticeDims {
        self.dims
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::UNIT_CENTERED
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.cubes.len()
    }

    #[inline]
    pub fn point(&self, id: PointId) -> &LatticePoint {
        &self.points[id.0 as usize]
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0 as usize]
    }

    #[inline]
    pub fn cube(&self, id: CubeId) -> &Cube {
        &self.cubes[id.0 as usize]
    }

    pub fn cube_ids(&self) -> impl Iterator<Item = CubeId> + '_ {
        (0..self.cubes.len() as u32).map(CubeId)
    }

    /// Point at integer lattice coordinates, `None` outside `0..=count`.
    pub fn point_at(&self, ix: i64, iy: i64, iz: i64) -> Option<PointId> {
        let d = self.dims;
        if ix < 0 || iy < 0 || iz < 0 {
            return None;
        }
        if ix > d.x() as i64 || iy > d.y() as i64 || iz > d.z() as i64 {
            return None;
        }
        Some(PointId(
            d.point_index(ix as u32, iy as u32, iz as u32) as u32,
        ))
    }

    /// Cube at integer lattice coordinates, `None` outside `0..count`.
    #[inline]
    pub fn cube_at(&self, ix: i64, iy: i64, iz: i64) -> Option<CubeId> {
        let [x, y, z] = self.dims.cube_coord(ix, iy, iz)?;
        Some(CubeId(self.dims.cube_index(x, y, z) as u32))
    }

    /// Neighbour of `id` displaced by `offset` cubes, if it lies in the lattice.
    #[inline]
    pub fn cube_offset(&self, id: CubeId, offset: [i64; 3]) -> Option<CubeId> {
        let [x, y, z] = self.cube(id).coord;
        self.cube_at(
            x as i64 + offset[0],
            y as i64 + offset[1],
            z as i64 + offset[2],
        )
    }

    /// Cube coordinates containing an object-space position, truncating toward
    /// zero the way seed placement always has. May lie outside the lattice.
    #[inline]
    pub fn project(&self, p: Vec3) -> [i64; 3] {
        let d = self.dims;
        [
            ((p.x + 0.5) * d.x() as f32) as i64,
            ((p.y + 0.5) * d.y() as f32) as i64,
            ((p.z + 0.5) * d.z() as f32) as i64,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_positions_span_unit_box() {
        let l = Lattice::with_counts(2, 4, 5).unwrap();
        let lo = l.point(l.point_at(0, 0, 0).unwrap()).position;
        let hi = l.point(l.point_at(2, 4, 5).unwrap()).position;
        assert_eq!(lo, Vec3::splat(-0.5));
        assert_eq!(hi, Vec3::splat(0.5));
        let mid = l.point(l.point_at(1, 2, 0).unwrap()).position;
        assert_eq!(mid, Vec3::new(0.0, 0.0, -0.5));
    }

    #[test]
    fn point_and_cube_lookup_bounds() {
        let l = Lattice::with_counts(3, 3, 3).unwrap();
        assert!(l.point_at(3, 3, 3).is_some());
        assert!(l.point_at(4, 0, 0).is_none());
        assert!(l.cube_at(2, 2, 2).is_some());
        assert!(l.cube_at(3, 0, 0).is_none());
        assert!(l.cube_at(0, 0, -1).is_none());
    }

    #[test]
    fn cube_offset_walks_faces() {
        let l = Lattice::with_counts(3, 3, 3).unwrap();
        let c = l.cube_at(1, 1, 1).unwrap();
        let up = l.cube_offset(c, [0, 0, 1]).unwrap();
        assert_eq!(l.cube(up).coord, [1, 1, 2]);
        let corner = l.cube_at(0, 0, 0).unwrap();
        assert!(l.cube_offset(corner, [-1, 0, 0]).is_none());
    }

    #[test]
    fn project_truncates_into_cube_coords() {
        let l = Lattice::with_counts(10, 10, 10).unwrap();
        assert_eq!(l.project(Vec3::ZERO), [5, 5, 5]);
        assert_eq!(l.project(Vec3::new(-0.5, 0.49, 0.16)), [0, 9, 6]);
        // Slightly below the low face still truncates to 0.
        assert_eq!(l.project(Vec3::new(-0.52, 0.0, 0.0))[0], 0);
        assert_eq!(l.project(Vec3::new(0.5, 0.0, 0.0))[0], 10);
    }
}
