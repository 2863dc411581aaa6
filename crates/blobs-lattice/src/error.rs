use blobs_geom::Axis;
use thiserror::Error;

/// Errors raised while validating lattice dimensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LatticeError {
    /// A cube count of zero along one axis.
    #[error("lattice dimension along {axis:?} must be at least 1")]
    ZeroDimension { axis: Axis },

    /// More points, edges or cubes than a `u32` handle can address.
    #[error("lattice of {cubes} cubes needs {edges} edges, more than u32 handles can address")]
    TooLarge { cubes: u64, edges: u64 },
}
