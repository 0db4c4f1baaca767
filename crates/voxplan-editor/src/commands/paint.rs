//! Single-cell and multi-cell paint and erase commands.

use voxplan_voxel::{MaterialId, VoxelCoord};

use crate::command::{EditCommand, EditContext, PreImage};

/// Sets one coordinate to a material, or erases it when `material` is `None`.
#[derive(Debug)]
pub struct PaintVoxelCommand {
    coord: VoxelCoord,
    material: Option<MaterialId>,
    pre: PreImage,
}

impl PaintVoxelCommand {
    pub fn set(coord: VoxelCoord, material: MaterialId) -> Self {
        Self::new(coord, Some(material))
    }

    pub fn erase(coord: VoxelCoord) -> Self {
        Self::new(coord, None)
    }

    pub fn new(coord: VoxelCoord, material: Option<MaterialId>) -> Self {
        Self {
            coord,
            material,
            pre: PreImage::new(),
        }
    }
}

impl EditCommand for PaintVoxelCommand {
    fn apply(&mut self, ctx: &mut EditContext<'_>) {
        self.pre.clear();
        self.pre.write(ctx.store, self.coord, self.material);
    }

    fn revert(&mut self, ctx: &mut EditContext<'_>) {
        self.pre.restore(ctx.store);
    }
}

/// Sets or erases an explicit list of coordinates.
///
/// The list may repeat coordinates; each one is captured once per `apply`.
#[derive(Debug)]
pub struct PaintVolumeCommand {
    cells: Vec<VoxelCoord>,
    material: Option<MaterialId>,
    pre: PreImage,
}

impl PaintVolumeCommand {
    pub fn new(cells: impl IntoIterator<Item = VoxelCoord>, material: Option<MaterialId>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            material,
            pre: PreImage::new(),
        }
    }

    pub fn erase(cells: impl IntoIterator<Item = VoxelCoord>) -> Self {
        Self::new(cells, None)
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }
}

impl EditCommand for PaintVolumeCommand {
    fn apply(&mut self, ctx: &mut EditContext<'_>) {
        self.pre.clear();
        for &coord in &self.cells {
            self.pre.write(ctx.store, coord, self.material);
        }
        tracing::debug!(
            cells = self.cells.len(),
            touched = self.pre.len(),
            erase = self.material.is_none(),
            "painted volume"
        );
    }

    fn revert(&mut self, ctx: &mut EditContext<'_>) {
        self.pre.restore(ctx.store);
    }
}
