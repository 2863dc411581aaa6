//! Frame orchestration for the blob mesher (engine-only, single-threaded).
#![forbid(unsafe_code)]

mod engine;
mod error;
mod stats;

pub use blobs_field::Blob;
pub use blobs_geom::Vec3;
pub use blobs_lattice::{FrameStamp, LatticeDims};
pub use blobs_mesh_cpu::{MeshBuffers, Winding};
pub use engine::{Engine, EngineConfig, FrameView};
pub use error::EngineError;
pub use stats::FrameStats;
