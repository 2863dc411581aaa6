//! Scalar field of summed reciprocal-distance potentials ("blobs").
#![forbid(unsafe_code)]

use blobs_geom::Vec3;

/// A point source contributing `strength / distance` to the field.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Blob {
    pub position: Vec3,
    pub strength: f32,
}

impl Blob {
    #[inline]
    pub const fn new(position: Vec3, strength: f32) -> Self {
        Self { position, strength }
    }
}

/// Anything the mesher can sample. The lattice caches `intensity` per point and
/// frame; `normal` is evaluated once per emitted vertex.
pub trait ScalarField {
    fn intensity(&self, p: Vec3) -> f32;

    /// Unit surface normal at `p`.
    fn normal(&self, p: Vec3) -> Vec3;
}

impl<F: ScalarField + ?Sized> ScalarField for &F {
    #[inline]
    fn intensity(&self, p: Vec3) -> f32 {
        (**self).intensity(p)
    }

    #[inline]
    fn normal(&self, p: Vec3) -> Vec3 {
        (**self).normal(p)
    }
}

/// Borrowed view over the current blob set.
///
/// Sampling exactly at a blob center divides by zero; the result is non-finite
/// and is passed through unchanged.
#[derive(Clone, Copy, Debug)]
pub struct BlobField<'a> {
    blobs: &'a [Blob],
}

impl<'a> BlobField<'a> {
    #[inline]
    pub fn new(blobs: &'a [Blob]) -> Self {
        Self { blobs }
    }

    #[inline]
    pub fn blobs(&self) -> &'a [Blob] {
        self.blobs
    }

    /// Closed-form sum of `0.5 * s / d^3 * (p - c)` over all blobs. Points away
    /// from the sources, i.e. out of the surface.
    pub fn gradient(&self, p: Vec3) -> Vec3 {
        let mut acc = Vec3::ZERO;
        for b in self.blobs {
            let d = p - b.position;
            let mag = d.length();
            acc += d * (0.5 * b.strength / (mag * mag * mag));
        }
        acc
    }
}

impl ScalarField for BlobField<'_> {
    #[inline]
    fn intensity(&self, p: Vec3) -> f32 {
        self.blobs
            .iter()
            .map(|b| b.strength / p.distance(b.position))
            .sum()
    }

    #[inline]
    fn normal(&self, p: Vec3) -> Vec3 {
        self.gradient(p).normalized()
    }
}
