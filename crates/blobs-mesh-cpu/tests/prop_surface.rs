use std::collections::HashMap;

use blobs_field::{Blob, BlobField};
use blobs_geom::Vec3;
use blobs_lattice::Lattice;
use blobs_mesh_cpu::{MeshBuffers, Polygonizer, SurfaceTracker, Winding};
use proptest::prelude::*;

fn center() -> impl Strategy<Value = Vec3> {
    (-0.15f32..0.15, -0.15f32..0.15, -0.15f32..0.15).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

fn extract(n: u32, blob: Blob, iso: f32) -> (Lattice, MeshBuffers, u32) {
    let mut l = Lattice::with_counts(n, n, n).unwrap();
    let mut mesh = MeshBuffers::for_lattice(&l);
    l.begin_frame();
    let blobs = [blob];
    let mut poly = Polygonizer::new(
        &mut l,
        &mut mesh,
        BlobField::new(&blobs),
        iso,
        Winding::Reversed,
    );
    let stats = SurfaceTracker::new().track(&mut poly, &blobs).unwrap();
    (l, mesh, stats.cubes_visited)
}

/// Signed volume enclosed by the mesh, relative to `origin`, times six.
fn signed_volume6(mesh: &MeshBuffers, origin: Vec3) -> f32 {
    mesh.triangles()
        .map(|[a, b, c]| {
            let (pa, pb, pc) = (
                mesh.position(a) - origin,
                mesh.position(b) - origin,
                mesh.position(c) - origin,
            );
            pa.dot(pb.cross(pc))
        })
        .sum()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // A lone blob well inside the lattice always meshes to a closed surface
    #[test]
    fn lone_blob_surface_is_closed(n in 4u32..=12, c in center(), s in 0.05f32..0.25) {
        let (_, mesh, _) = extract(n, Blob::new(c, s), 1.0);
        let mut edges: HashMap<(u32, u32), u32> = HashMap::new();
        for [a, b, cc] in mesh.triangles() {
            for e in [(a, b), (b, cc), (cc, a)] {
                *edges.entry(e).or_insert(0) += 1;
            }
        }
        for (&(a, b), &k) in &edges {
            prop_assert_eq!(k, 1);
            prop_assert_eq!(edges.get(&(b, a)).copied(), Some(1));
        }
    }

    // Reversed winding encloses positive volume around the blob
    #[test]
    fn reversed_winding_faces_outward(n in 4u32..=12, c in center(), s in 0.05f32..0.25) {
        let (_, mesh, _) = extract(n, Blob::new(c, s), 1.0);
        prop_assume!(!mesh.is_empty());
        prop_assert!(signed_volume6(&mesh, c) > 0.0);
    }

    // Output never exceeds the configure-time bound and each cube is visited at most once
    #[test]
    fn output_respects_lattice_bounds(n in 2u32..=10, c in center(), s in 0.05f32..0.6) {
        let (l, mesh, visited) = extract(n, Blob::new(c, s), 1.0);
        prop_assert!(mesh.vertex_count() <= l.edge_count());
        prop_assert!(mesh.triangle_count() <= 5 * l.cube_count());
        prop_assert!(visited as usize <= l.cube_count());
        for &i in mesh.indices() {
            prop_assert!((i as usize) < mesh.vertex_count());
        }
    }
}
