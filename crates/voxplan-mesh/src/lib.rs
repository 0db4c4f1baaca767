//! Greedy surface meshing of dense voxel chunks into per-material quad meshes.

pub mod face_direction;
pub mod greedy;
pub mod material_mesh;

pub use face_direction::FaceDirection;
pub use greedy::greedy_mesh;
pub use material_mesh::{DrawBatch, MaterialMesh, MeshSet, MeshVertex, QuadInfo};
