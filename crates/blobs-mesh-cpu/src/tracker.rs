use blobs_field::{Blob, ScalarField};
use blobs_lattice::CubeId;
use blobs_lattice::topology::FACE_NEIGHBORS;

use crate::error::MeshError;
use crate::polygonise::Polygonizer;

/// Counters for one tracking pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackStats {
    /// Cubes marked visited, surface or not.
    pub cubes_visited: u32,
    pub surface_cubes: u32,
    /// Blobs whose seed walk reached the surface.
    pub seeds_found: u32,
    /// Blobs whose seed walk left the lattice or hit an already-visited cube.
    pub seeds_missed: u32,
}

/// Surface-following traversal. Only cubes connected to a seed through
/// surface cubes are ever classified.
///
/// Owns the flood stack so it is reused across frames.
#[derive(Debug, Default)]
pub struct SurfaceTracker {
    stack: Vec<CubeId>,
}

impl SurfaceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sized for a lattice of `cubes` cubes; each is pushed at most once.
    pub fn with_capacity(cubes: usize) -> Self {
        Self {
            stack: Vec::with_capacity(cubes),
        }
    }

    /// Seeds from every blob in order and floods each surface component found.
    pub fn track<F: ScalarField>(
        &mut self,
        poly: &mut Polygonizer<'_, F>,
        blobs: &[Blob],
    ) -> Result<TrackStats, MeshError> {
        let mut stats = TrackStats::default();
        for (i, blob) in blobs.iter().enumerate() {
            if self.seed(poly, blob, &mut stats)? {
                stats.seeds_found += 1;
            } else {
                stats.seeds_missed += 1;
                log::trace!(
                    target: "tracker",
                    "blob {} at {:?}: seed walk found no new surface",
                    i,
                    blob.position
                );
            }
        }
        Ok(stats)
    }

    /// Walks toward -z from the blob's projected cube until the surface, the
    /// lattice boundary or an already-visited cube is reached.
    fn seed<F: ScalarField>(
        &mut self,
        poly: &mut Polygonizer<'_, F>,
        blob: &Blob,
        stats: &mut TrackStats,
    ) -> Result<bool, MeshError> {
        let [jx, jy, mut jz] = poly.lattice().project(blob.position);
        while let Some(cube) = poly.lattice().cube_at(jx, jy, jz) {
            if !poly.visit(cube) {
                return Ok(false);
            }
            stats.cubes_visited += 1;
            if poly.polygonise(cube)?.intersects() {
                stats.surface_cubes += 1;
                self.flood(poly, cube, stats)?;
                return Ok(true);
            }
            jz -= 1;
        }
        Ok(false)
    }

    fn flood<F: ScalarField>(
        &mut self,
        poly: &mut Polygonizer<'_, F>,
        seed: CubeId,
        stats: &mut TrackStats,
    ) -> Result<(), MeshError> {
        self.stack.clear();
        self.stack.push(seed);
        while let Some(cube) = self.stack.pop() {
            for offset in FACE_NEIGHBORS {
                let Some(n) = poly.lattice().cube_offset(cube, offset) else {
                    continue;
                };
                if !poly.visit(n) {
                    continue;
                }
                stats.cubes_visited += 1;
                if poly.polygonise(n)?.intersects() {
                    stats.surface_cubes += 1;
                    self.stack.push(n);
                }
            }
        }
        Ok(())
    }
}
