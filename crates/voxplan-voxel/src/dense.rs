//! Dense, ephemeral extraction of the sparse store for meshing.
//!
//! A [`VoxelChunk`] covers exactly the store's occupied bounding box. It is
//! rebuilt from the store whenever geometry is needed and never written back.

use thiserror::Error;

use crate::coord::VoxelCoord;
use crate::material::MaterialId;
use crate::store::VoxelStore;

/// Upper bound on cells in one extracted chunk (256 Mi cells, 512 MiB of codes).
pub const MAX_CHUNK_VOLUME: u64 = 1 << 28;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChunkError {
    /// Occupied cells are spread too far apart to densify. `volume` saturates
    /// at `u64::MAX`.
    #[error("occupied extent {dims:?} spans {volume} cells, limit is {}", MAX_CHUNK_VOLUME)]
    TooLarge { dims: [u64; 3], volume: u64 },
}

/// Dense array of chunk codes (`material index + 1`, 0 = empty) over a box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoxelChunk {
    origin: VoxelCoord,
    dims: [usize; 3],
    codes: Vec<u16>,
}

impl VoxelChunk {
    /// An all-empty chunk with the given world origin and dimensions.
    pub fn new(origin: VoxelCoord, dims: [usize; 3]) -> Self {
        Self {
            origin,
            dims,
            codes: vec![0; dims[0] * dims[1] * dims[2]],
        }
    }

    /// Densifies the store over its occupied bounding box.
    ///
    /// Returns `Ok(None)` for an empty store.
    pub fn extract(store: &VoxelStore) -> Result<Option<Self>, ChunkError> {
        let Some((min, max)) = store.extent() else {
            return Ok(None);
        };
        let extent = [
            axis_len(min.x, max.x),
            axis_len(min.y, max.y),
            axis_len(min.z, max.z),
        ];
        let volume = extent
            .iter()
            .try_fold(1u64, |acc, &d| acc.checked_mul(d))
            .unwrap_or(u64::MAX);
        if volume > MAX_CHUNK_VOLUME {
            return Err(ChunkError::TooLarge {
                dims: extent,
                volume,
            });
        }

        let dims = extent.map(|d| d as usize);
        let mut chunk = Self::new(min, dims);
        for (coord, material) in store.iter() {
            chunk.set(
                local_index(coord.x, min.x),
                local_index(coord.y, min.y),
                local_index(coord.z, min.z),
                material.chunk_code(),
            );
        }
        tracing::trace!(origin = %min, ?dims, cells = store.len(), "extracted chunk");
        Ok(Some(chunk))
    }

    /// World coordinate of local cell `(0, 0, 0)`.
    pub fn origin(&self) -> VoxelCoord {
        self.origin
    }

    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }

    fn linear_index(&self, x: usize, y: usize, z: usize) -> usize {
        x + self.dims[0] * (y + self.dims[1] * z)
    }

    /// Code at a local cell. Each coordinate must be inside [`dims`](Self::dims).
    pub fn get(&self, x: usize, y: usize, z: usize) -> u16 {
        self.codes[self.linear_index(x, y, z)]
    }

    /// Writes a code at a local cell. Each coordinate must be inside
    /// [`dims`](Self::dims).
    pub fn set(&mut self, x: usize, y: usize, z: usize, code: u16) {
        let i = self.linear_index(x, y, z);
        self.codes[i] = code;
    }

    /// Code at signed local coordinates; anything outside the chunk reads as 0.
    pub fn code_at(&self, local: [i32; 3]) -> u16 {
        let mut idx = [0usize; 3];
        for axis in 0..3 {
            match usize::try_from(local[axis]) {
                Ok(v) if v < self.dims[axis] => idx[axis] = v,
                _ => return 0,
            }
        }
        self.get(idx[0], idx[1], idx[2])
    }

    /// Material at a local cell, or `None` if empty.
    pub fn material(&self, x: usize, y: usize, z: usize) -> Option<MaterialId> {
        MaterialId::from_chunk_code(self.get(x, y, z))
    }

    /// Number of non-empty cells.
    pub fn solid_count(&self) -> usize {
        self.codes.iter().filter(|&&c| c != 0).count()
    }
}

/// Cells from `min` to `max` inclusive; at most 2^32.
fn axis_len(min: i32, max: i32) -> u64 {
    (i64::from(max) - i64::from(min) + 1) as u64
}

fn local_index(c: i32, min: i32) -> usize {
    (i64::from(c) - i64::from(min)) as usize
}
