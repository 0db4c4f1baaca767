//! Greedy meshing: merges coplanar, same-material boundary faces into
//! rectangles so geometry scales with surface complexity, not volume.
//!
//! Each direction is swept one boundary plane at a time over `0..=extent`.
//! A plane's mask holds the chunk code of every face that is solid on the inner
//! side and empty (or outside the chunk) on the outer side. Rectangles are
//! grown in row-major scan order: width first, then whole rows of that width.
//! The result is scan-order dependent, not a minimal partition.

use voxplan_voxel::{MaterialId, VoxelChunk};

use crate::face_direction::FaceDirection;
use crate::material_mesh::MeshSet;

/// Converts abstract axis coordinates back to local `[x, y, z]`.
fn axes_to_local(
    (layer_axis, u_axis, v_axis): (usize, usize, usize),
    layer: i32,
    u: usize,
    v: usize,
) -> [i32; 3] {
    let mut coords = [0i32; 3];
    coords[layer_axis] = layer;
    coords[u_axis] = u as i32;
    coords[v_axis] = v as i32;
    coords
}

/// Fills `mask` with the visible face codes of one boundary plane.
///
/// Returns `true` if any face is visible.
fn build_mask(chunk: &VoxelChunk, direction: FaceDirection, plane: usize, mask: &mut [u16]) -> bool {
    let axes = direction.sweep_axes();
    let dims = chunk.dims();
    let u_len = dims[axes.1];
    let v_len = dims[axes.2];

    let plane = plane as i32;
    let (inner, outer) = if direction.is_positive() {
        (plane - 1, plane)
    } else {
        (plane, plane - 1)
    };

    let mut any = false;
    for v in 0..v_len {
        for u in 0..u_len {
            let code = chunk.code_at(axes_to_local(axes, inner, u, v));
            let visible = code != 0 && chunk.code_at(axes_to_local(axes, outer, u, v)) == 0;
            mask[v * u_len + u] = if visible { code } else { 0 };
            any |= visible;
        }
    }
    any
}

/// Meshes a dense chunk into one independent mesh per material.
///
/// Vertex positions are in world space (the chunk origin is added). The total
/// quad area equals the number of solid faces whose neighbour is empty or
/// outside the chunk.
pub fn greedy_mesh(chunk: &VoxelChunk) -> MeshSet {
    let mut meshes = MeshSet::new();
    let dims = chunk.dims();
    let origin = chunk.origin();

    for direction in FaceDirection::ALL {
        let (layer_axis, u_axis, v_axis) = direction.sweep_axes();
        let u_len = dims[u_axis];
        let v_len = dims[v_axis];
        let mut mask = vec![0u16; u_len * v_len];
        let mut used = vec![false; u_len * v_len];

        for plane in 0..=dims[layer_axis] {
            if !build_mask(chunk, direction, plane, &mut mask) {
                continue;
            }
            used.fill(false);

            for v in 0..v_len {
                for u in 0..u_len {
                    let idx = v * u_len + u;
                    let code = mask[idx];
                    if code == 0 || used[idx] {
                        continue;
                    }

                    // Extend width along u.
                    let mut w = 1;
                    while u + w < u_len && mask[idx + w] == code && !used[idx + w] {
                        w += 1;
                    }

                    // Extend height along v, one full strip at a time.
                    let mut h = 1;
                    'outer: while v + h < v_len {
                        let row = (v + h) * u_len + u;
                        for du in 0..w {
                            if mask[row + du] != code || used[row + du] {
                                break 'outer;
                            }
                        }
                        h += 1;
                    }

                    for dv in 0..h {
                        let row = (v + dv) * u_len + u;
                        used[row..row + w].fill(true);
                    }

                    let Some(material) = MaterialId::from_chunk_code(code) else {
                        continue;
                    };
                    meshes
                        .mesh_mut(material)
                        .push_quad(direction, plane, u, v, w, h, origin);
                }
            }
        }
    }

    tracing::trace!(
        materials = meshes.len(),
        quads = meshes.total_quads(),
        "greedy mesh built"
    );
    meshes
}
