use std::time::Instant;

use blobs_geom::{Axis, Vec3};

use crate::cache::FrameStamp;
use crate::topology::{CORNER_OFFSETS, EDGE_AXES, EDGE_ORIGINS};
use crate::{Cube, CubeId, Edge, EdgeId, Lattice, LatticeDims, LatticePoint, PointId};

pub(crate) fn build(dims: LatticeDims) -> Lattice {
    let t0 = Instant::now();
    let [cx, cy, cz] = dims.as_array();

    let mut points = Vec::with_capacity(dims.point_count());
    for ix in 0..=cx {
        for iy in 0..=cy {
            for iz in 0..=cz {
                points.push(LatticePoint {
                    coord: [ix, iy, iz],
                    position: Vec3::new(
                        ix as f32 / cx as f32 - 0.5,
                        iy as f32 / cy as f32 - 0.5,
                        iz as f32 / cz as f32 - 0.5,
                    ),
                    intensity: 0.0,
                    stamp: FrameStamp::NEVER,
                });
            }
        }
    }

    let mut edges: Vec<Edge> = Vec::with_capacity(dims.expected_edge_count());
    let mut cubes: Vec<Cube> = Vec::with_capacity(dims.cube_count());
    for ix in 0..cx {
        for iy in 0..cy {
            for iz in 0..cz {
                let coord = [ix, iy, iz];
                debug_assert_eq!(dims.cube_index(ix, iy, iz), cubes.len());

                let corner = |k: usize| {
                    let o = CORNER_OFFSETS[k];
                    PointId(dims.point_index(ix + o[0], iy + o[1], iz + o[2]) as u32)
                };
                let corners = [
                    corner(0),
                    corner(1),
                    corner(2),
                    corner(3),
                    corner(4),
                    corner(5),
                    corner(6),
                    corner(7),
                ];

                let mut slots = [EdgeId(0); 12];
                for (slot, out) in slots.iter_mut().enumerate() {
                    *out = match inherited_edge(&cubes, dims, coord, slot) {
                        Some(id) => id,
                        None => push_edge(&mut edges, EDGE_AXES[slot]),
                    };
                }

                cubes.push(Cube {
                    coord,
                    points: corners,
                    edges: slots,
                    visited: FrameStamp::NEVER,
                });
            }
        }
    }
    debug_assert_eq!(edges.len(), dims.expected_edge_count());

    log::debug!(
        "lattice {}x{}x{} built: {} points, {} edges, {} cubes in {:.2} ms",
        cx,
        cy,
        cz,
        points.len(),
        edges.len(),
        cubes.len(),
        t0.elapsed().as_secs_f64() * 1000.0
    );

    Lattice {
        dims,
        points,
        edges,
        cubes,
        frame: FrameStamp::NEVER,
        evaluations: 0,
    }
}

fn push_edge(edges: &mut Vec<Edge>, axis: Axis) -> EdgeId {
    let id = EdgeId(edges.len() as u32);
    edges.push(Edge {
        axis,
        crossing: Vec3::ZERO,
        vertex: 0,
        stamp: FrameStamp::NEVER,
    });
    id
}

/// Finds the edge for `slot` of the cube at `coord` among the cubes already
/// built (lower linear index). Any same-axis slot of a neighbour whose edge
/// origin lands on the same lattice point is the same geometric edge.
///
/// Slots 5, 6 and 10 sit on the cube's maximum corner; every other cube that
/// shares them comes later, so they always come back `None` and get created.
fn inherited_edge(
    built: &[Cube],
    dims: LatticeDims,
    coord: [u32; 3],
    slot: usize,
) -> Option<EdgeId> {
    let axis = EDGE_AXES[slot];
    let origin = EDGE_ORIGINS[slot];
    for other in 0..12 {
        if other == slot || EDGE_AXES[other] != axis {
            continue;
        }
        let theirs = EDGE_ORIGINS[other];
        let n = dims.cube_coord(
            coord[0] as i64 + origin[0] as i64 - theirs[0] as i64,
            coord[1] as i64 + origin[1] as i64 - theirs[1] as i64,
            coord[2] as i64 + origin[2] as i64 - theirs[2] as i64,
        );
        let Some([nx, ny, nz]) = n else {
            continue;
        };
        let idx = dims.cube_index(nx, ny, nz);
        if idx < built.len() {
            return Some(built[idx].edges[other]);
        }
    }
    None
}
