use blobs_field::ScalarField;
use blobs_geom::Vec3;

use crate::{CubeId, EdgeId, Lattice, PointId};

/// Monotonic frame counter stamped onto cached points, edges and cubes.
/// `NEVER` predates every frame, so freshly built entities start stale.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameStamp(pub u64);

impl FrameStamp {
    pub const NEVER: FrameStamp = FrameStamp(0);

    #[inline]
    pub fn next(self) -> FrameStamp {
        FrameStamp(self.0 + 1)
    }
}

impl Lattice {
    /// Advances the frame counter. Every cached value becomes stale at once.
    pub fn begin_frame(&mut self) -> FrameStamp {
        self.frame = self.frame.next();
        self.evaluations = 0;
        self.frame
    }

    #[inline]
    pub fn frame(&self) -> FrameStamp {
        self.frame
    }

    /// Field evaluations performed since the last `begin_frame`.
    #[inline]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Intensity at a lattice point, evaluating `field` at most once per frame.
    #[inline]
    pub fn point_intensity<F: ScalarField>(
        &mut self,
        id: PointId,
        frame: FrameStamp,
        field: &F,
    ) -> f32 {
        let p = &mut self.points[id.0 as usize];
        if p.stamp != frame {
            p.intensity = field.intensity(p.position);
            p.stamp = frame;
            self.evaluations += 1;
        }
        p.intensity
    }

    /// The eight corner intensities of a cube, in corner order.
    pub fn corner_intensities<F: ScalarField>(
        &mut self,
        cube: CubeId,
        frame: FrameStamp,
        field: &F,
    ) -> [f32; 8] {
        let corners = self.cubes[cube.0 as usize].points;
        let mut out = [0.0f32; 8];
        for (v, id) in out.iter_mut().zip(corners) {
            *v = self.point_intensity(id, frame, field);
        }
        out
    }

    /// Marks `cube` visited for `frame`. Returns false if it already was.
    #[inline]
    pub fn try_visit(&mut self, cube: CubeId, frame: FrameStamp) -> bool {
        let c = &mut self.cubes[cube.0 as usize];
        if c.visited == frame {
            return false;
        }
        c.visited = frame;
        true
    }

    #[inline]
    pub fn is_visited(&self, cube: CubeId, frame: FrameStamp) -> bool {
        self.cubes[cube.0 as usize].visited == frame
    }

    /// Output vertex of an edge if it was materialised during `frame`.
    #[inline]
    pub fn fresh_edge_vertex(&self, edge: EdgeId, frame: FrameStamp) -> Option<u32> {
        let e = &self.edges[edge.0 as usize];
        (e.stamp == frame).then_some(e.vertex)
    }

    /// Stores an edge's surface crossing and its output vertex for `frame`.
    #[inline]
    pub fn record_edge(&mut self, edge: EdgeId, frame: FrameStamp, crossing: Vec3, vertex: u32) {
        let e = &mut self.edges[edge.0 as usize];
        e.crossing = crossing;
        e.vertex = vertex;
        e.stamp = frame;
    }
}
