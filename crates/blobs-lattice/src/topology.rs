//! Fixed local numbering of a cube's corners and edges.
//!
//! ```text
//! corners                 edges
//! 0 (x  , y  , z  )       0: 0-1 X    4: 4-5 X    8: 0-4 Z
//! 1 (x+1, y  , z  )       1: 1-2 Y    5: 5-6 Y    9: 1-5 Z
//! 2 (x+1, y+1, z  )       2: 2-3 X    6: 6-7 X   10: 2-6 Z
//! 3 (x  , y+1, z  )       3: 3-0 Y    7: 7-4 Y   11: 3-7 Z
//! 4..7 as 0..3 at z+1
//! ```
//!
//! The ordering matches the classic marching-cubes edge and triangle tables.

use blobs_geom::Axis;

/// Offset of each corner from the cube's minimum lattice point.
pub const CORNER_OFFSETS: [[u32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Corner pair (A, B) each edge interpolates between.
pub const EDGE_CORNERS: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

pub const EDGE_AXES: [Axis; 12] = [
    Axis::X,
    Axis::Y,
    Axis::X,
    Axis::Y,
    Axis::X,
    Axis::Y,
    Axis::X,
    Axis::Y,
    Axis::Z,
    Axis::Z,
    Axis::Z,
    Axis::Z,
];

/// Offset of each edge's lower endpoint from the cube's minimum lattice point.
/// Two cubes hold the same geometric edge when `cube + EDGE_ORIGINS[s]` agree
/// and the axes match.
pub const EDGE_ORIGINS: [[u32; 3]; 12] = [
    [0, 0, 0],
    [1, 0, 0],
    [0, 1, 0],
    [0, 0, 0],
    [0, 0, 1],
    [1, 0, 1],
    [0, 1, 1],
    [0, 0, 1],
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
];

/// Edges on a cube's maximum corner. No lower-index cube shares them, so the
/// builder always creates these three fresh.
pub const OWNED_EDGES: [usize; 3] = [5, 6, 10];

/// Face-adjacent neighbour offsets in traversal order: +X, -X, +Y, -Y, +Z, -Z.
pub const FACE_NEIGHBORS: [[i64; 3]; 6] = [
    [1, 0, 0],
    [-1, 0, 0],
    [0, 1, 0],
    [0, -1, 0],
    [0, 0, 1],
    [0, 0, -1],
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_axes_match_corner_offsets() {
        for (s, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
            let pa = CORNER_OFFSETS[a];
            let pb = CORNER_OFFSETS[b];
            let differing: Vec<usize> = (0..3).filter(|&i| pa[i] != pb[i]).collect();
            assert_eq!(differing, vec![EDGE_AXES[s].index()], "edge {}", s);
        }
    }

    #[test]
    fn edge_origin_is_lower_endpoint() {
        for (s, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
            let pa = CORNER_OFFSETS[a];
            let pb = CORNER_OFFSETS[b];
            let lo = [pa[0].min(pb[0]), pa[1].min(pb[1]), pa[2].min(pb[2])];
            assert_eq!(lo, EDGE_ORIGINS[s], "edge {}", s);
        }
    }

    #[test]
    fn owned_edges_touch_the_max_corner() {
        for &s in &OWNED_EDGES {
            let (a, b) = EDGE_CORNERS[s];
            assert!(a == 6 || b == 6);
        }
    }
}
