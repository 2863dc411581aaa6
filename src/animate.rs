use blobs_runtime::Blob;

/// Scripted orbit of the five default blobs at time `t` seconds. Only the
/// animated coordinates are written; blobs past the fifth are left alone.
pub fn legacy_motion(blobs: &mut [Blob], t: f32) {
    for (i, b) in blobs.iter_mut().enumerate() {
        let p = &mut b.position;
        match i {
            0 => {
                p.x = 0.12 + 0.12 * (t * 0.5).sin();
                p.z = 0.06 + 0.23 * (t * 0.2).cos();
            }
            1 => {
                p.x = 0.12 + 0.12 * (t * 0.2).sin();
                p.z = -0.23 + 0.10 * t.cos();
            }
            2 => p.y = -0.03 + 0.24 * (t * 0.35).sin(),
            3 => p.y = 0.126 + 0.10 * (t * 0.1).cos(),
            4 => {
                p.x = 0.206 + 0.1 * (t * 0.5).cos();
                p.y = 0.056 + 0.2 * (t * 0.3).sin();
                p.z = 0.25 + 0.08 * (t * 0.2).cos();
            }
            _ => break,
        }
    }
}
