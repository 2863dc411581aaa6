use blobs_lattice::LatticeError;
use blobs_mesh_cpu::MeshError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("invalid lattice: {0}")]
    Lattice(#[from] LatticeError),

    #[error("mesh extraction failed: {0}")]
    Mesh(#[from] MeshError),

    #[error("iso level must be finite, got {0}")]
    InvalidIsoLevel(f32),
}
