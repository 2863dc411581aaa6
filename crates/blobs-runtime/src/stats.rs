use std::fmt;
use std::time::Duration;

use blobs_lattice::FrameStamp;

/// Counters published after each completed frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameStats {
    pub frame: FrameStamp,
    pub vertices: usize,
    pub triangles: usize,
    pub cubes_visited: u32,
    pub surface_cubes: u32,
    /// Blobs whose seed walk found no new surface.
    pub seeds_missed: u32,
    pub evaluations: u64,
    pub elapsed: Duration,
}

impl FrameStats {
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

impl fmt::Display for FrameStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {} verts={} tris={} cubes={} surface={} evals={} missed={} {:.2}ms",
            self.frame.0,
            self.vertices,
            self.triangles,
            self.cubes_visited,
            self.surface_cubes,
            self.evaluations,
            self.seeds_missed,
            self.elapsed_ms()
        )
    }
}
