use blobs_geom::Axis;

use crate::error::LatticeError;

/// Cube counts along each axis. Always at least 1 per axis once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LatticeDims {
    x: u32,
    y: u32,
    z: u32,
}

impl LatticeDims {
    pub fn new(x: u32, y: u32, z: u32) -> Result<Self, LatticeError> {
        for (axis, n) in Axis::ALL.into_iter().zip([x, y, z]) {
            if n == 0 {
                return Err(LatticeError::ZeroDimension { axis });
            }
        }
        let dims = Self { x, y, z };
        // Edges are the largest pool; if they fit, points and cubes do too.
        let edges = dims.expected_edge_count_u64();
        if edges > u32::MAX as u64 {
            return Err(LatticeError::TooLarge {
                cubes: dims.cube_count_u64(),
                edges,
            });
        }
        Ok(dims)
    }

    /// Cubic lattice, `n` cubes per side.
    pub fn cubic(n: u32) -> Result<Self, LatticeError> {
        Self::new(n, n, n)
    }

    #[inline]
    pub fn x(&self) -> u32 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> u32 {
        self.y
    }

    #[inline]
    pub fn z(&self) -> u32 {
        self.z
    }

    #[inline]
    pub fn get(&self, axis: Axis) -> u32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    #[inline]
    pub fn as_array(&self) -> [u32; 3] {
        [self.x, self.y, self.z]
    }

    #[inline]
    pub fn cube_count(&self) -> usize {
        self.x as usize * self.y as usize * self.z as usize
    }

    #[inline]
    pub fn point_count(&self) -> usize {
        (self.x as usize + 1) * (self.y as usize + 1) * (self.z as usize + 1)
    }

    /// Number of unique geometric edges:
    /// `3xyz + 2(xy + xz + yz) + x + y + z`.
    #[inline]
    pub fn expected_edge_count(&self) -> usize {
        self.expected_edge_count_u64() as usize
    }

    fn cube_count_u64(&self) -> u64 {
        self.x as u64 * self.y as u64 * self.z as u64
    }

    fn expected_edge_count_u64(&self) -> u64 {
        let (x, y, z) = (self.x as u64, self.y as u64, self.z as u64);
        3 * x * y * z + 2 * (x * y + x * z + y * z) + x + y + z
    }

    /// Linear index of a lattice point; x-major, z fastest.
    #[inline]
    pub fn point_index(&self, ix: u32, iy: u32, iz: u32) -> usize {
        let sy = self.y as usize + 1;
        let sz = self.z as usize + 1;
        (ix as usize * sy + iy as usize) * sz + iz as usize
    }

    /// Linear index of a cube; same ordering as `point_index`.
    #[inline]
    pub fn cube_index(&self, ix: u32, iy: u32, iz: u32) -> usize {
        (ix as usize * self.y as usize + iy as usize) * self.z as usize + iz as usize
    }

    /// Bounds-checked cube coordinates from signed input.
    #[inline]
    pub fn cube_coord(&self, ix: i64, iy: i64, iz: i64) -> Option<[u32; 3]> {
        if ix < 0 || iy < 0 || iz < 0 {
            return None;
        }
        if ix >= self.x as i64 || iy >= self.y as i64 || iz >= self.z as i64 {
            return None;
        }
        Some([ix as u32, iy as u32, iz as u32])
    }
}
