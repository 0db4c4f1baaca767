//! Axis-aligned voxel boxes.

use serde::{Deserialize, Serialize};

use crate::coord::{Size3, VoxelCoord};

/// An axis-aligned box of whole cells, given by its minimum corner and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelBox {
    pub min: VoxelCoord,
    pub size: Size3,
}

impl VoxelBox {
    pub fn new(min: VoxelCoord, size: Size3) -> Self {
        Self { min, size }
    }

    /// The 1×1×1 box covering `cell`.
    pub fn unit(cell: VoxelCoord) -> Self {
        Self::new(cell, Size3::UNIT)
    }

    /// Smallest box containing both inclusive corners.
    ///
    /// Returns `None` when an axis spans more cells than a [`Size3`] can hold,
    /// which only happens for corners more than `i32::MAX` apart.
    pub fn from_corners(a: VoxelCoord, b: VoxelCoord) -> Option<Self> {
        let min = a.min(b);
        let max = a.max(b);
        Some(Self::new(
            min,
            Size3::new(
                axis_span(min.x, max.x)?,
                axis_span(min.y, max.y)?,
                axis_span(min.z, max.z)?,
            ),
        ))
    }

    /// Inclusive maximum corner, clamped to the `i32` range.
    pub fn max(&self) -> VoxelCoord {
        VoxelCoord::new(
            last_cell(self.min.x, self.size.x),
            last_cell(self.min.y, self.size.y),
            last_cell(self.min.z, self.size.z),
        )
    }

    pub fn contains(&self, c: VoxelCoord) -> bool {
        within(c.x, self.min.x, self.size.x)
            && within(c.y, self.min.y, self.size.y)
            && within(c.z, self.min.z, self.size.z)
    }

    /// Smallest box covering both boxes, if it is representable.
    pub fn union(&self, other: &VoxelBox) -> Option<VoxelBox> {
        Self::from_corners(self.min.min(other.min), self.max().max(other.max()))
    }

    pub fn volume(&self) -> u64 {
        self.size.volume()
    }

    /// Every cell in the box, x outermost and z innermost.
    ///
    /// Cells past `i32::MAX` have no coordinate and are not produced.
    pub fn cells(&self) -> impl Iterator<Item = VoxelCoord> + use<> {
        let min = self.min;
        let max = self.max();
        let xs = if self.volume() == 0 { 1..=0 } else { min.x..=max.x };
        xs.flat_map(move |x| {
            (min.y..=max.y)
                .flat_map(move |y| (min.z..=max.z).map(move |z| VoxelCoord::new(x, y, z)))
        })
    }
}

fn axis_span(min: i32, max: i32) -> Option<i32> {
    i32::try_from(i64::from(max) - i64::from(min) + 1).ok()
}

fn last_cell(min: i32, size: i32) -> i32 {
    let last = i64::from(min) + i64::from(size) - 1;
    last.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn within(c: i32, min: i32, size: i32) -> bool {
    c >= min && i64::from(c) < i64::from(min) + i64::from(size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_orders_components() {
        let b =
            VoxelBox::from_corners(VoxelCoord::new(3, -1, 5), VoxelCoord::new(1, 2, 5)).unwrap();
        assert_eq!(b.min, VoxelCoord::new(1, -1, 5));
        assert_eq!(b.size, Size3::new(3, 4, 1));
        assert_eq!(b.max(), VoxelCoord::new(3, 2, 5));
    }

    #[test]
    fn test_contains_is_half_open() {
        let b = VoxelBox::new(VoxelCoord::new(0, 0, 0), Size3::new(2, 1, 1));
        assert!(b.contains(VoxelCoord::new(1, 0, 0)));
        assert!(!b.contains(VoxelCoord::new(2, 0, 0)));
        assert!(!b.contains(VoxelCoord::new(0, -1, 0)));
    }

    #[test]
    fn test_cells_enumerates_volume() {
        let b = VoxelBox::new(VoxelCoord::new(-1, 4, 2), Size3::new(2, 3, 2));
        let cells: Vec<_> = b.cells().collect();
        assert_eq!(cells.len() as u64, b.volume());
        assert_eq!(cells[0], VoxelCoord::new(-1, 4, 2));
        assert_eq!(cells[1], VoxelCoord::new(-1, 4, 3));
        assert!(cells.iter().all(|&c| b.contains(c)));
    }

    #[test]
    fn test_union() {
        let a = VoxelBox::new(VoxelCoord::new(-2, 0, 0), Size3::new(3, 2, 1));
        let other = VoxelBox::unit(VoxelCoord::new(5, 5, 5));
        let u = a.union(&other).unwrap();
        assert_eq!(u.max(), VoxelCoord::new(5, 5, 5));
        assert_eq!(u.min, VoxelCoord::new(-2, 0, 0));
        assert_eq!(u.size, Size3::new(8, 6, 6));
    }

    #[test]
    fn test_full_axis_span_is_not_a_box() {
        let lo = VoxelCoord::new(i32::MIN, 0, 0);
        let hi = VoxelCoord::new(i32::MAX, 0, 0);
        assert_eq!(VoxelBox::from_corners(lo, hi), None);
        assert_eq!(VoxelBox::unit(lo).union(&VoxelBox::unit(hi)), None);

        // The widest representable span still works.
        let b = VoxelBox::from_corners(VoxelCoord::new(1, 0, 0), hi).unwrap();
        assert_eq!(b.size.x, i32::MAX);
    }

    #[test]
    fn test_boxes_touching_i32_max() {
        let top = VoxelCoord::new(i32::MAX - 1, 0, i32::MAX);
        let b = VoxelBox::new(top, Size3::new(4, 1, 3));
        assert_eq!(b.max(), VoxelCoord::new(i32::MAX, 0, i32::MAX));
        assert!(b.contains(VoxelCoord::new(i32::MAX, 0, i32::MAX)));
        assert!(!b.contains(VoxelCoord::new(i32::MIN, 0, i32::MAX)));
        let cells: Vec<_> = b.cells().collect();
        assert_eq!(cells, vec![top, VoxelCoord::new(i32::MAX, 0, i32::MAX)]);
        assert!(VoxelBox::new(top, Size3::new(0, 1, 1)).cells().next().is_none());
    }
}
