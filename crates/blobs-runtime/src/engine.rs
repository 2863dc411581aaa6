use std::time::Instant;

use blobs_field::{Blob, BlobField};
use blobs_lattice::{FrameStamp, Lattice, LatticeDims};
use blobs_mesh_cpu::{MeshBuffers, Polygonizer, SurfaceTracker, Winding};

use crate::error::EngineError;
use crate::stats::FrameStats;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Cubes per axis.
    pub dims: [u32; 3],
    pub iso_level: f32,
    pub winding: Winding,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dims: [30, 30, 30],
            iso_level: 0.5,
            winding: Winding::Listed,
        }
    }
}

/// Borrowed result of one frame. Valid until the engine is touched again.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    pub mesh: &'a MeshBuffers,
    pub stats: &'a FrameStats,
}

/// Owns the lattice, blob set, tracker stack and output buffers.
///
/// A frame runs to completion inside `advance_frame`; everything else needs
/// `&mut self` or `&self`, so reads never overlap a frame in progress.
pub struct Engine {
    lattice: Lattice,
    mesh: MeshBuffers,
    tracker: SurfaceTracker,
    blobs: Vec<Blob>,
    iso_level: f32,
    winding: Winding,
    stats: FrameStats,
}

fn check_iso(iso: f32) -> Result<f32, EngineError> {
    if iso.is_finite() {
        Ok(iso)
    } else {
        Err(EngineError::InvalidIsoLevel(iso))
    }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let iso_level = check_iso(config.iso_level)?;
        let [x, y, z] = config.dims;
        let lattice = Lattice::with_counts(x, y, z)?;
        let mesh = MeshBuffers::for_lattice(&lattice);
        let tracker = SurfaceTracker::with_capacity(lattice.cube_count());
        log::info!(
            target: "engine",
            "engine ready: {}x{}x{} iso={} winding={:?}",
            x,
            y,
            z,
            iso_level,
            config.winding
        );
        Ok(Self {
            lattice,
            mesh,
            tracker,
            blobs: Vec::new(),
            iso_level,
            winding: config.winding,
            stats: FrameStats::default(),
        })
    }

    /// Rebuilds the lattice for new dimensions and iso level. The new lattice
    /// and buffers are built before anything is replaced, so on error the
    /// engine is unchanged. On success every cache starts stale and the frame
    /// counter restarts.
    pub fn configure(&mut self, cx: u32, cy: u32, cz: u32, iso: f32) -> Result<(), EngineError> {
        let iso = check_iso(iso)?;
        let lattice = Lattice::with_counts(cx, cy, cz)?;
        let mesh = MeshBuffers::for_lattice(&lattice);
        let tracker = SurfaceTracker::with_capacity(lattice.cube_count());

        self.lattice = lattice;
        self.mesh = mesh;
        self.tracker = tracker;
        self.iso_level = iso;
        self.stats = FrameStats::default();
        log::info!(
            target: "engine",
            "reconfigured: {}x{}x{} iso={} ({} edges, vertex cap {}, triangle cap {})",
            cx,
            cy,
            cz,
            iso,
            self.lattice.edge_count(),
            self.mesh.max_vertices(),
            self.mesh.max_triangles()
        );
        Ok(())
    }

    /// Replaces the blob set, keeping the existing allocation.
    pub fn set_blobs(&mut self, blobs: &[Blob]) {
        self.blobs.clear();
        self.blobs.extend_from_slice(blobs);
    }

    /// In-place access for per-frame animation.
    #[inline]
    pub fn blobs_mut(&mut self) -> &mut [Blob] {
        &mut self.blobs
    }

    #[inline]
    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// Extracts the surface for the current blob set.
    ///
    /// On failure the buffers hold whatever was written before the error and
    /// the previous frame's stats stay published.
    pub fn advance_frame(&mut self) -> Result<FrameView<'_>, EngineError> {
        let t0 = Instant::now();
        self.mesh.clear_keep_capacity();
        let frame = self.lattice.begin_frame();

        let field = BlobField::new(&self.blobs);
        let mut poly = Polygonizer::new(
            &mut self.lattice,
            &mut self.mesh,
            field,
            self.iso_level,
            self.winding,
        );
        let track = self.tracker.track(&mut poly, &self.blobs)?;

        self.stats = FrameStats {
            frame,
            vertices: self.mesh.vertex_count(),
            triangles: self.mesh.triangle_count(),
            cubes_visited: track.cubes_visited,
            surface_cubes: track.surface_cubes,
            seeds_missed: track.seeds_missed,
            evaluations: self.lattice.evaluations(),
            elapsed: t0.elapsed(),
        };
        log::debug!(target: "frame", "{}", self.stats);
        Ok(FrameView {
            mesh: &self.mesh,
            stats: &self.stats,
        })
    }

    #[inline]
    pub fn mesh(&self) -> &MeshBuffers {
        &self.mesh
    }

    #[inline]
    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Stamp of the last frame begun, `FrameStamp::NEVER` right after a rebuild.
    #[inline]
    pub fn frame(&self) -> FrameStamp {
        self.lattice.frame()
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    #[inline]
    pub fn dims(&self) -> LatticeDims {
        self.lattice.dims()
    }

    #[inline]
    pub fn iso_level(&self) -> f32 {
        self.iso_level
    }

    /// Changes the threshold without rebuilding; takes effect next frame.
    pub fn set_iso_level(&mut self, iso: f32) -> Result<(), EngineError> {
        self.iso_level = check_iso(iso)?;
        Ok(())
    }

    #[inline]
    pub fn winding(&self) -> Winding {
        self.winding
    }

    pub fn set_winding(&mut self, winding: Winding) {
        self.winding = winding;
    }
}
