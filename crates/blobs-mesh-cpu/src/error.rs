use std::fmt;

use thiserror::Error;

/// Which output pool ran out of room.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BufferKind {
    Vertices,
    Triangles,
}

impl fmt::Display for BufferKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferKind::Vertices => f.write_str("vertex"),
            BufferKind::Triangles => f.write_str("triangle"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    /// A push would exceed the bound reserved when the buffers were sized.
    #[error("{kind} buffer full: capacity {capacity}")]
    CapacityExceeded { kind: BufferKind, capacity: usize },
}
