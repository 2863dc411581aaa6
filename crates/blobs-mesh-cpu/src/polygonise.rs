use blobs_field::ScalarField;
use blobs_geom::{Axis, Vec3};
use blobs_lattice::topology::EDGE_CORNERS;
use blobs_lattice::{CubeId, EdgeId, FrameStamp, Lattice, PointId};

use crate::error::MeshError;
use crate::mesh_build::MeshBuffers;
use crate::tables::{EDGE_TABLE, TRI_TABLE};

/// Order in which a `TRI_TABLE` triple is written to the index buffer.
///
/// `Listed` keeps the table order, whose right-hand face normals point into
/// the surface. `Reversed` swaps the first and last index so right-handed
/// renderers see outward front faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Winding {
    #[default]
    Listed,
    Reversed,
}

impl Winding {
    #[inline]
    pub fn apply(self, [a, b, c]: [u32; 3]) -> [u32; 3] {
        match self {
            Winding::Listed => [a, b, c],
            Winding::Reversed => [c, b, a],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CubeOutcome {
    /// All corners on the same side of the iso level.
    Empty,
    Surface { triangles: u8 },
}

impl CubeOutcome {
    #[inline]
    pub fn intersects(self) -> bool {
        matches!(self, CubeOutcome::Surface { .. })
    }
}

/// 8-bit corner mask: bit `b` set iff corner `b` is strictly above `iso`.
#[inline]
pub fn corner_mask(corners: &[f32; 8], iso: f32) -> u8 {
    corners
        .iter()
        .enumerate()
        .fold(0u8, |m, (b, &v)| if v > iso { m | (1 << b) } else { m })
}

/// Iso crossing on the edge `a`-`b` along `axis`. Only the axis component is
/// interpolated; the other two are copied from `a`. Equal intensities are not
/// guarded and yield non-finite output.
#[inline]
pub fn edge_crossing(a: Vec3, b: Vec3, ia: f32, ib: f32, iso: f32, axis: Axis) -> Vec3 {
    let mu = (iso - ia) / (ib - ia);
    a.with(axis, a.get(axis) + mu * (b.get(axis) - a.get(axis)))
}

/// Sphere-map texture coordinates from a unit normal.
#[inline]
pub fn sphere_uv(n: Vec3) -> [f32; 2] {
    [(n.x + 1.0) * 0.5, (n.y + 1.0) * 0.5]
}

/// Per-frame cube polygoniser.
///
/// Holds the lattice and output buffers for the duration of one frame. The
/// frame is read from the lattice on construction, so `begin_frame` must have
/// been called first.
pub struct Polygonizer<'a, F> {
    lattice: &'a mut Lattice,
    mesh: &'a mut MeshBuffers,
    field: F,
    frame: FrameStamp,
    iso: f32,
    winding: Winding,
}

impl<'a, F: ScalarField> Polygonizer<'a, F> {
    pub fn new(
        lattice: &'a mut Lattice,
        mesh: &'a mut MeshBuffers,
        field: F,
        iso: f32,
        winding: Winding,
    ) -> Self {
        let frame = lattice.frame();
        Self {
            lattice,
            mesh,
            field,
            frame,
            iso,
            winding,
        }
    }

    #[inline]
    pub fn lattice(&self) -> &Lattice {
        self.lattice
    }

    #[inline]
    pub fn mesh(&self) -> &MeshBuffers {
        self.mesh
    }

    #[inline]
    pub fn frame(&self) -> FrameStamp {
        self.frame
    }

    #[inline]
    pub fn iso_level(&self) -> f32 {
        self.iso
    }

    /// Marks `cube` visited for this frame; false if it already was.
    #[inline]
    pub fn visit(&mut self, cube: CubeId) -> bool {
        self.lattice.try_visit(cube, self.frame)
    }

    /// Corner mask of `cube` from cached intensities.
    pub fn classify(&mut self, cube: CubeId) -> u8 {
        let corners = self.lattice.corner_intensities(cube, self.frame, &self.field);
        corner_mask(&corners, self.iso)
    }

    /// Output vertex for the crossing on `edge`, computing it on first use
    /// this frame. `a` and `b` are the edge's endpoints.
    pub fn materialize(&mut self, edge: EdgeId, a: PointId, b: PointId) -> Result<u32, MeshError> {
        if let Some(v) = self.lattice.fresh_edge_vertex(edge, self.frame) {
            return Ok(v);
        }
        let ia = self.lattice.point_intensity(a, self.frame, &self.field);
        let ib = self.lattice.point_intensity(b, self.frame, &self.field);
        let crossing = edge_crossing(
            self.lattice.point(a).position,
            self.lattice.point(b).position,
            ia,
            ib,
            self.iso,
            self.lattice.edge(edge).axis,
        );
        let normal = self.field.normal(crossing);
        let v = self.mesh.push_vertex(crossing, normal, sphere_uv(normal))?;
        self.lattice.record_edge(edge, self.frame, crossing, v);
        Ok(v)
    }

    /// Classifies `cube` and, if the surface passes through it, emits its
    /// crossings and triangles.
    pub fn polygonise(&mut self, cube: CubeId) -> Result<CubeOutcome, MeshError> {
        let mask = self.classify(cube) as usize;
        let active = EDGE_TABLE[mask];
        if active == 0 {
            return Ok(CubeOutcome::Empty);
        }

        let (points, edges) = {
            let c = self.lattice.cube(cube);
            (c.points, c.edges)
        };
        let mut verts = [0u32; 12];
        for (slot, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
            if active & (1 << slot) != 0 {
                verts[slot] = self.materialize(edges[slot], points[a], points[b])?;
            }
        }

        let mut triangles = 0u8;
        for t in TRI_TABLE[mask].chunks_exact(3) {
            if t[0] < 0 {
                break;
            }
            let tri = [
                verts[t[0] as usize],
                verts[t[1] as usize],
                verts[t[2] as usize],
            ];
            self.mesh.push_triangle(self.winding.apply(tri))?;
            triangles += 1;
        }
        Ok(CubeOutcome::Surface { triangles })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use blobs_field::{Blob, BlobField};

    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    /// Linear ramp along x that counts its evaluations.
    struct Ramp {
        calls: Cell<u32>,
    }

    impl ScalarField for Ramp {
        fn intensity(&self, p: Vec3) -> f32 {
            self.calls.set(self.calls.get() + 1);
            p.x
        }

        fn normal(&self, _p: Vec3) -> Vec3 {
            Vec3::new(1.0, 0.0, 0.0)
        }
    }

    #[test]
    fn mask_sets_bits_strictly_above_iso() {
        assert_eq!(corner_mask(&[0.0; 8], 0.5), 0);
        assert_eq!(corner_mask(&[1.0; 8], 0.5), 255);
        // Exactly on the iso level counts as outside.
        assert_eq!(corner_mask(&[0.5; 8], 0.5), 0);
        let mut c = [0.0; 8];
        c[0] = 1.0;
        assert_eq!(corner_mask(&c, 0.5), 0b0000_0001);
        c[6] = 0.75;
        assert_eq!(corner_mask(&c, 0.5), 0b0100_0001);
    }

    #[test]
    fn crossing_interpolates_only_the_edge_axis() {
        let a = Vec3::new(0.1, 0.2, 0.3);
        let b = Vec3::new(0.6, 0.2, 0.3);
        let p = edge_crossing(a, b, 1.0, 0.0, 0.5, Axis::X);
        assert!(approx(p.x, 0.35));
        assert_eq!((p.y, p.z), (0.2, 0.3));

        // Endpoints on the iso level return the endpoint itself.
        assert_eq!(edge_crossing(a, b, 0.5, 0.0, 0.5, Axis::X), a);
        let q = edge_crossing(a, b, 0.0, 0.5, 0.5, Axis::X);
        assert!(approx(q.x, b.x));
    }

    #[test]
    fn crossing_keeps_off_axis_components_of_a() {
        // Off-axis components differ between a and b; only z moves.
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(9.0, 9.0, 1.0);
        let p = edge_crossing(a, b, 0.0, 2.0, 0.5, Axis::Z);
        assert_eq!(p, Vec3::new(0.0, 0.0, 0.25));
    }

    #[test]
    fn uv_maps_normal_into_unit_square() {
        assert_eq!(sphere_uv(Vec3::new(1.0, -1.0, 0.0)), [1.0, 0.0]);
        assert_eq!(sphere_uv(Vec3::new(0.0, 0.0, 1.0)), [0.5, 0.5]);
    }

    #[test]
    fn winding_reverses_first_and_last() {
        assert_eq!(Winding::Listed.apply([1, 2, 3]), [1, 2, 3]);
        assert_eq!(Winding::Reversed.apply([1, 2, 3]), [3, 2, 1]);
        assert_eq!(Winding::default(), Winding::Listed);
    }

    #[test]
    fn planar_cut_emits_two_triangles_per_cube() {
        // x > 0.1 plane through a 2x1x1 lattice: cube 1 is cut, cube 0 is not.
        let mut l = Lattice::with_counts(2, 1, 1).unwrap();
        let mut mesh = MeshBuffers::for_lattice(&l);
        let f = Ramp { calls: Cell::new(0) };
        l.begin_frame();
        let mut p = Polygonizer::new(&mut l, &mut mesh, &f, 0.1, Winding::Listed);
        let c0 = p.lattice().cube_at(0, 0, 0).unwrap();
        let c1 = p.lattice().cube_at(1, 0, 0).unwrap();
        assert_eq!(p.polygonise(c0).unwrap(), CubeOutcome::Empty);
        assert_eq!(
            p.polygonise(c1).unwrap(),
            CubeOutcome::Surface { triangles: 2 }
        );
        assert_eq!(mesh.vertex_count(), 4);
        for v in 0..4 {
            assert!(approx(mesh.position(v).x, 0.1));
            assert_eq!(mesh.normal(v), Vec3::new(1.0, 0.0, 0.0));
        }
        // 12 lattice points, each sampled once.
        assert_eq!(f.calls.get(), 12);
    }

    #[test]
    fn repeated_polygonise_reuses_crossings() {
        let mut l = Lattice::with_counts(2, 1, 1).unwrap();
        let mut mesh = MeshBuffers::for_lattice(&l);
        let f = Ramp { calls: Cell::new(0) };
        l.begin_frame();
        let mut p = Polygonizer::new(&mut l, &mut mesh, &f, 0.1, Winding::Listed);
        let c1 = p.lattice().cube_at(1, 0, 0).unwrap();
        p.polygonise(c1).unwrap();
        p.polygonise(c1).unwrap();
        // Second pass adds triangles but no vertices and no evaluations.
        assert_eq!(p.mesh().vertex_count(), 4);
        assert_eq!(p.mesh().triangle_count(), 4);
        assert_eq!(f.calls.get(), 8);
    }

    #[test]
    fn blob_normals_point_away_from_center() {
        let blobs = [Blob::new(Vec3::new(0.01, 0.02, 0.03), 0.2)];
        let mut l = Lattice::with_counts(6, 6, 6).unwrap();
        let mut mesh = MeshBuffers::for_lattice(&l);
        l.begin_frame();
        let mut p = Polygonizer::new(
            &mut l,
            &mut mesh,
            BlobField::new(&blobs),
            1.0,
            Winding::Reversed,
        );
        let ids: Vec<CubeId> = p.lattice().cube_ids().collect();
        for c in ids {
            p.polygonise(c).unwrap();
        }
        assert!(mesh.triangle_count() > 0);
        for v in 0..mesh.vertex_count() as u32 {
            let out = mesh.position(v) - blobs[0].position;
            assert!(mesh.normal(v).dot(out) > 0.0);
            let [u, w] = mesh.uv(v);
            assert!((0.0..=1.0).contains(&u) && (0.0..=1.0).contains(&w));
        }
    }
}
