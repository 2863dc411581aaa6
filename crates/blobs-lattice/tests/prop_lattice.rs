use blobs_lattice::topology::{CORNER_OFFSETS, EDGE_CORNERS, FACE_NEIGHBORS};
use blobs_lattice::{Lattice, LatticeDims, PointId};
use proptest::prelude::*;

fn dim() -> impl Strategy<Value = u32> {
    1u32..=6
}

/// Lattice points of an edge, unordered.
fn edge_points(l: &Lattice, cube: blobs_lattice::CubeId, slot: usize) -> (PointId, PointId) {
    let (a, b) = EDGE_CORNERS[slot];
    let c = l.cube(cube);
    let (pa, pb) = (c.points[a], c.points[b]);
    if pa <= pb { (pa, pb) } else { (pb, pa) }
}

proptest! {
    // Arena sizes match the closed forms for any positive dimensions
    #[test]
    fn arena_sizes_match_dims(x in dim(), y in dim(), z in dim()) {
        let dims = LatticeDims::new(x, y, z).unwrap();
        let l = Lattice::new(dims);
        prop_assert_eq!(l.cube_count(), (x * y * z) as usize);
        prop_assert_eq!(l.point_count(), ((x + 1) * (y + 1) * (z + 1)) as usize);
        prop_assert_eq!(l.edge_count(), dims.expected_edge_count());
    }

    // Face-adjacent cubes hold the very same EdgeId for every edge on the shared face
    #[test]
    fn face_neighbors_share_edge_handles(x in dim(), y in dim(), z in dim()) {
        let l = Lattice::with_counts(x, y, z).unwrap();
        for c in l.cube_ids() {
            for off in FACE_NEIGHBORS {
                let Some(n) = l.cube_offset(c, off) else { continue };
                for s in 0..12 {
                    let mine = edge_points(&l, c, s);
                    for t in 0..12 {
                        if edge_points(&l, n, t) == mine {
                            prop_assert_eq!(l.cube(c).edges[s], l.cube(n).edges[t]);
                        }
                    }
                }
            }
        }
    }

    // Corner handles resolve to points at the cube coordinate plus the corner offset
    #[test]
    fn corners_resolve_to_offset_points(x in dim(), y in dim(), z in dim()) {
        let l = Lattice::with_counts(x, y, z).unwrap();
        for c in l.cube_ids() {
            let cube = l.cube(c);
            for (k, o) in CORNER_OFFSETS.iter().enumerate() {
                let want = [cube.coord[0] + o[0], cube.coord[1] + o[1], cube.coord[2] + o[2]];
                prop_assert_eq!(l.point(cube.points[k]).coord, want);
            }
        }
    }
}
