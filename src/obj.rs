use std::fs::File;
use std::io::{BufWriter, Result as IoResult, Write};
use std::path::Path;

use blobs_runtime::MeshBuffers;

/// Writes the mesh as Wavefront OBJ: positions, normals and texture
/// coordinates share one 1-based index per vertex.
pub fn write_obj<W: Write>(mesh: &MeshBuffers, writer: &mut W) -> IoResult<()> {
    writeln!(writer, "# blobs isosurface")?;
    writeln!(
        writer,
        "# {} vertices, {} triangles",
        mesh.vertex_count(),
        mesh.triangle_count()
    )?;
    for p in mesh.positions().chunks_exact(3) {
        writeln!(writer, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for n in mesh.normals().chunks_exact(3) {
        writeln!(writer, "vn {} {} {}", n[0], n[1], n[2])?;
    }
    for t in mesh.uvs().chunks_exact(2) {
        writeln!(writer, "vt {} {}", t[0], t[1])?;
    }
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (a + 1, b + 1, c + 1);
        writeln!(writer, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}")?;
    }
    Ok(())
}

pub fn save_obj<P: AsRef<Path>>(mesh: &MeshBuffers, path: P) -> IoResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_obj(mesh, &mut writer)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use blobs_runtime::{Blob, Engine, EngineConfig, Vec3, Winding};

    use super::*;

    fn small_mesh() -> MeshBuffers {
        let mut mesh = MeshBuffers::with_limits(3, 1);
        let n = Vec3::new(0.0, 0.0, 1.0);
        mesh.push_vertex(Vec3::new(0.0, 0.0, 0.0), n, [0.5, 0.5]).unwrap();
        mesh.push_vertex(Vec3::new(1.0, 0.0, 0.0), n, [0.5, 0.5]).unwrap();
        mesh.push_vertex(Vec3::new(0.0, 1.0, 0.0), n, [0.5, 0.5]).unwrap();
        mesh.push_triangle([0, 1, 2]).unwrap();
        mesh
    }

    #[test]
    fn single_triangle_layout() {
        let mut out = Vec::new();
        write_obj(&small_mesh(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let body: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(
            body,
            vec![
                "v 0 0 0",
                "v 1 0 0",
                "v 0 1 0",
                "vn 0 0 1",
                "vn 0 0 1",
                "vn 0 0 1",
                "vt 0.5 0.5",
                "vt 0.5 0.5",
                "vt 0.5 0.5",
                "f 1/1/1 2/2/2 3/3/3",
            ]
        );
    }

    #[test]
    fn engine_frame_round_counts() {
        let mut e = Engine::new(EngineConfig {
            dims: [8, 8, 8],
            iso_level: 1.0,
            winding: Winding::Reversed,
        })
        .unwrap();
        e.set_blobs(&[Blob::new(Vec3::new(0.01, 0.02, 0.03), 0.25)]);
        e.advance_frame().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.obj");
        save_obj(e.mesh(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let count = |prefix: &str| text.lines().filter(|l| l.starts_with(prefix)).count();
        assert_eq!(count("v "), e.mesh().vertex_count());
        assert_eq!(count("vn "), e.mesh().vertex_count());
        assert_eq!(count("vt "), e.mesh().vertex_count());
        assert_eq!(count("f "), e.mesh().triangle_count());
        assert!(e.mesh().triangle_count() > 0);
    }
}
