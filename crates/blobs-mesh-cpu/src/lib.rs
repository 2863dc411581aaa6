//! Marching-cubes polygoniser and surface tracker over the shared-edge lattice.
#![forbid(unsafe_code)]

mod error;
mod mesh_build;
mod polygonise;
pub mod tables;
mod tracker;

pub use error::{BufferKind, MeshError};
pub use mesh_build::MeshBuffers;
pub use polygonise::{CubeOutcome, Polygonizer, Winding, corner_mask, edge_crossing, sphere_uv};
pub use tables::{EDGE_TABLE, MAX_TRIANGLES_PER_CUBE, TRI_TABLE};
pub use tracker::{SurfaceTracker, TrackStats};
