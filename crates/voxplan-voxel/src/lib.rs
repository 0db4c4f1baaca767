//! Sparse voxel world model: coordinates, materials, the authoritative store,
//! flood-fill region queries and dense chunk extraction.

pub mod bounds;
pub mod coord;
pub mod dense;
pub mod material;
pub mod region;
pub mod store;

pub use bounds::VoxelBox;
pub use coord::{Size3, VoxelCoord};
pub use dense::{ChunkError, MAX_CHUNK_VOLUME, VoxelChunk};
pub use material::MaterialId;
pub use region::{DEFAULT_FLOOD_FILL_BUDGET, RegionQuery, query_region, region_bounds};
pub use store::VoxelStore;
