//! The sparse voxel store: the single source of truth for cell materials.
//!
//! Absence of a key is the only representation of an empty cell. Lookups go
//! through an [`FxHashMap`](rustc_hash::FxHashMap), which hashes the small
//! fixed-size coordinate keys cheaply.

use rustc_hash::FxHashMap;

use crate::bounds::VoxelBox;
use crate::coord::VoxelCoord;
use crate::material::MaterialId;

/// Unbounded mapping from [`VoxelCoord`] to [`MaterialId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelStore {
    voxels: FxHashMap<VoxelCoord, MaterialId>,
}

impl VoxelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, coord: VoxelCoord) -> Option<MaterialId> {
        self.voxels.get(&coord).copied()
    }

    /// Writes a material and returns the previous one, if any.
    pub fn set(&mut self, coord: VoxelCoord, material: MaterialId) -> Option<MaterialId> {
        self.voxels.insert(coord, material)
    }

    /// Empties a cell and returns the material it held.
    pub fn remove(&mut self, coord: VoxelCoord) -> Option<MaterialId> {
        self.voxels.remove(&coord)
    }

    pub fn contains(&self, coord: VoxelCoord) -> bool {
        self.voxels.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    /// Iterates occupied cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (VoxelCoord, MaterialId)> + '_ {
        self.voxels.iter().map(|(&c, &m)| (c, m))
    }

    /// Occupied cells sorted by coordinate, for stable output.
    pub fn sorted_entries(&self) -> Vec<(VoxelCoord, MaterialId)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by_key(|&(c, _)| c);
        entries
    }

    pub fn clear(&mut self) {
        self.voxels.clear();
    }

    /// Inclusive minimum and maximum corners of the occupied cells, or `None`
    /// when empty.
    pub fn extent(&self) -> Option<(VoxelCoord, VoxelCoord)> {
        let mut keys = self.voxels.keys();
        let first = *keys.next()?;
        Some(keys.fold((first, first), |(lo, hi), &c| (lo.min(c), hi.max(c))))
    }

    /// Bounding box of every occupied cell.
    ///
    /// `None` when empty, or when the cells lie more than `i32::MAX` apart on
    /// some axis; [`extent`](Self::extent) still answers then.
    pub fn bounds(&self) -> Option<VoxelBox> {
        let (min, max) = self.extent()?;
        VoxelBox::from_corners(min, max)
    }
}

impl FromIterator<(VoxelCoord, MaterialId)> for VoxelStore {
    /// Later entries for the same coordinate win.
    fn from_iter<I: IntoIterator<Item = (VoxelCoord, MaterialId)>>(iter: I) -> Self {
        Self {
            voxels: iter.into_iter().collect(),
        }
    }
}
