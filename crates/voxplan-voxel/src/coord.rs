//! Integer voxel coordinates and sizes.
//!
//! The coordinate space is unbounded: any `i32` triple names a unit cell by its
//! minimum corner. `z` is the vertical axis.

use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Mask for one axis of a [`VoxelCoord::packed`] key (21 bits).
const PACK_MASK: i64 = 0x1F_FFFF;

/// A unit cell in voxel space.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct VoxelCoord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelCoord {
    pub const ORIGIN: Self = Self::new(0, 0, 0);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Floors a real-valued anchor onto the voxel grid.
    pub fn from_floor(x: f64, y: f64, z: f64) -> Self {
        Self::new(x.floor() as i32, y.floor() as i32, z.floor() as i32)
    }

    /// Returns the coordinate shifted by `(dx, dy, dz)`, or `None` if any axis
    /// leaves the `i32` range.
    pub fn checked_offset(self, dx: i32, dy: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(
            self.x.min(other.x),
            self.y.min(other.y),
            self.z.min(other.z),
        )
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(
            self.x.max(other.x),
            self.y.max(other.y),
            self.z.max(other.z),
        )
    }

    /// The face-adjacent neighbours, in +X, -X, +Y, -Y, +Z, -Z order.
    ///
    /// Neighbours past either end of the `i32` range don't exist and are left
    /// out, so a cell on an extreme plane has fewer than six.
    pub fn neighbors(self) -> impl Iterator<Item = Self> {
        [
            (1, 0, 0),
            (-1, 0, 0),
            (0, 1, 0),
            (0, -1, 0),
            (0, 0, 1),
            (0, 0, -1),
        ]
        .into_iter()
        .filter_map(move |(dx, dy, dz)| self.checked_offset(dx, dy, dz))
    }

    /// Packs the low 21 bits of each axis into one `i64`.
    ///
    /// Unique for coordinates within ±2^20 of each other on every axis, which
    /// bounds any region a budgeted traversal can reach.
    pub fn packed(self) -> i64 {
        ((self.x as i64 & PACK_MASK) << 42)
            | ((self.y as i64 & PACK_MASK) << 21)
            | (self.z as i64 & PACK_MASK)
    }
}

impl From<(i32, i32, i32)> for VoxelCoord {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for VoxelCoord {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for VoxelCoord {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::fmt::Display for VoxelCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Axis-aligned extent in voxels.
///
/// Deserializes from `{"x","y","z"}` and from the capitalized keys older
/// planner files use.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Size3 {
    #[serde(default, alias = "X")]
    pub x: i32,
    #[serde(default, alias = "Y")]
    pub y: i32,
    #[serde(default, alias = "Z")]
    pub z: i32,
}

impl Size3 {
    pub const UNIT: Self = Self::new(1, 1, 1);

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Clamps every dimension to at least 1.
    pub fn at_least_one(self) -> Self {
        Self::new(self.x.max(1), self.y.max(1), self.z.max(1))
    }

    /// Number of cells, treating non-positive dimensions as empty. Saturates
    /// at `u64::MAX`.
    pub fn volume(self) -> u64 {
        [self.x, self.y, self.z]
            .iter()
            .map(|&d| d.max(0) as u64)
            .fold(1, u64::saturating_mul)
    }
}

impl Default for Size3 {
    fn default() -> Self {
        Self::UNIT
    }
}

impl From<(i32, i32, i32)> for Size3 {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packed_distinguishes_neighbors() {
        let c = VoxelCoord::new(-3, 7, 0);
        let mut keys: Vec<i64> = c.neighbors().map(|n| n.packed()).collect();
        keys.push(c.packed());
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 7);
    }

    #[test]
    fn test_packed_wraps_at_21_bits() {
        let a = VoxelCoord::new(0, 0, 0);
        let b = VoxelCoord::new(1 << 21, 0, 0);
        assert_eq!(a.packed(), b.packed());
    }

    #[test]
    fn test_from_floor_rounds_toward_negative_infinity() {
        assert_eq!(
            VoxelCoord::from_floor(1.9, -0.1, -2.0),
            VoxelCoord::new(1, -1, -2)
        );
    }

    #[test]
    fn test_arithmetic() {
        let a = VoxelCoord::new(1, 2, 3);
        let b = VoxelCoord::new(10, -2, 0);
        assert_eq!(a + b, VoxelCoord::new(11, 0, 3));
        assert_eq!(b - a, VoxelCoord::new(9, -4, -3));
        assert_eq!(a.min(b), VoxelCoord::new(1, -2, 0));
        assert_eq!(a.max(b), VoxelCoord::new(10, 2, 3));
    }

    #[test]
    fn test_size_accepts_capitalized_keys() {
        let s: Size3 = serde_json::from_str(r#"{"X": 2, "Y": 4, "Z": 1}"#).unwrap();
        assert_eq!(s, Size3::new(2, 4, 1));
        let partial: Size3 = serde_json::from_str(r#"{"x": 3}"#).unwrap();
        assert_eq!(partial, Size3::new(3, 0, 0));
    }

    #[test]
    fn test_size_clamp_and_volume() {
        assert_eq!(Size3::new(0, -2, 3).at_least_one(), Size3::new(1, 1, 3));
        assert_eq!(Size3::new(2, 4, 1).volume(), 8);
        assert_eq!(Size3::new(2, 0, 1).volume(), 0);
        assert_eq!(Size3::new(i32::MAX, i32::MAX, i32::MAX).volume(), u64::MAX);
    }

    #[test]
    fn test_neighbors_stop_at_axis_extremes() {
        let high = VoxelCoord::new(i32::MAX, 0, 0);
        let around: Vec<_> = high.neighbors().collect();
        assert_eq!(around.len(), 5);
        assert_eq!(around[0], VoxelCoord::new(i32::MAX - 1, 0, 0));

        let corner = VoxelCoord::new(i32::MIN, i32::MIN, i32::MAX);
        assert_eq!(corner.neighbors().count(), 3);
        assert_eq!(VoxelCoord::ORIGIN.neighbors().count(), 6);
        assert_eq!(high.checked_offset(1, 0, 0), None);
    }
}
