//! Per-material mesh buffers produced by the greedy mesher.

use std::collections::BTreeMap;

use voxplan_voxel::{MaterialId, VoxelCoord};

use crate::face_direction::FaceDirection;

/// A single world-space vertex, laid out for direct GPU upload.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    /// Texture coordinates in voxel units, so textures tile across merged quads.
    pub uv: [f32; 2],
}

static_assertions::assert_eq_size!(MeshVertex, [u8; 32]);

/// Metadata for one merged quad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuadInfo {
    pub direction: FaceDirection,
    /// Extent along the direction's u axis, in voxels.
    pub width: u32,
    /// Extent along the direction's v axis, in voxels.
    pub height: u32,
}

impl QuadInfo {
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

/// Geometry for one material: four vertices and six indices per quad.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialMesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    pub quads: Vec<QuadInfo>,
}

impl MaterialMesh {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes one merged quad.
    ///
    /// `plane` is the boundary plane index along the direction's layer axis;
    /// `u`, `v`, `w`, `h` are in chunk-local voxels. `origin` shifts the
    /// result into world space.
    #[allow(clippy::too_many_arguments)]
    pub fn push_quad(
        &mut self,
        direction: FaceDirection,
        plane: usize,
        u: usize,
        v: usize,
        w: usize,
        h: usize,
        origin: VoxelCoord,
    ) {
        let (layer_axis, u_axis, v_axis) = direction.sweep_axes();
        let normal = direction.normal();
        let origin = [origin.x as f32, origin.y as f32, origin.z as f32];

        let (u0, v0) = (u as f32, v as f32);
        let (u1, v1) = ((u + w) as f32, (v + h) as f32);
        let corners = [(u0, v0), (u1, v0), (u1, v1), (u0, v1)];
        let uvs = [
            [0.0, 0.0],
            [w as f32, 0.0],
            [w as f32, h as f32],
            [0.0, h as f32],
        ];

        let base = self.vertices.len() as u32;
        for (&(cu, cv), uv) in corners.iter().zip(uvs) {
            let mut position = [0.0_f32; 3];
            position[layer_axis] = plane as f32;
            position[u_axis] = cu;
            position[v_axis] = cv;
            for (p, o) in position.iter_mut().zip(origin) {
                *p += o;
            }
            self.vertices.push(MeshVertex {
                position,
                normal,
                uv,
            });
        }

        // Counter-clockwise seen from the side the normal points to.
        if direction.is_positive() {
            self.indices
                .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        } else {
            self.indices
                .extend_from_slice(&[base, base + 2, base + 1, base, base + 3, base + 2]);
        }

        self.quads.push(QuadInfo {
            direction,
            width: w as u32,
            height: h as u32,
        });
    }

    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    pub fn count_quads_for_direction(&self, direction: FaceDirection) -> usize {
        self.quads
            .iter()
            .filter(|q| q.direction == direction)
            .count()
    }

    /// Sum of quad areas in voxel faces.
    pub fn face_area(&self) -> u64 {
        self.quads.iter().map(QuadInfo::area).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    /// Vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// One material's mesh with the color it is drawn in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawBatch<'a> {
    pub material: MaterialId,
    pub color: [f32; 3],
    pub mesh: &'a MaterialMesh,
}

/// Meshes keyed by material, one independent mesh per material present.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshSet {
    meshes: BTreeMap<MaterialId, MaterialMesh>,
}

impl MeshSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn mesh_mut(&mut self, material: MaterialId) -> &mut MaterialMesh {
        self.meshes.entry(material).or_default()
    }

    pub fn get(&self, material: MaterialId) -> Option<&MaterialMesh> {
        self.meshes.get(&material)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialId, &MaterialMesh)> {
        self.meshes.iter().map(|(&m, mesh)| (m, mesh))
    }

    /// Meshes in palette order, paired with their display colors.
    pub fn draw_batches(&self) -> impl Iterator<Item = DrawBatch<'_>> {
        self.iter().map(|(material, mesh)| DrawBatch {
            material,
            color: material.color(),
            mesh,
        })
    }

    /// Number of materials with geometry.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    pub fn total_quads(&self) -> usize {
        self.meshes.values().map(MaterialMesh::quad_count).sum()
    }

    pub fn total_face_area(&self) -> u64 {
        self.meshes.values().map(MaterialMesh::face_area).sum()
    }
}

impl IntoIterator for MeshSet {
    type Item = (MaterialId, MaterialMesh);
    type IntoIter = std::collections::btree_map::IntoIter<MaterialId, MaterialMesh>;

    fn into_iter(self) -> Self::IntoIter {
        self.meshes.into_iter()
    }
}
