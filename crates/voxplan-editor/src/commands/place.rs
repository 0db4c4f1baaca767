//! Piece placement and removal, with or without baking the footprint.

use voxplan_voxel::{MaterialId, VoxelCoord};

use crate::catalog::PieceCatalog;
use crate::command::{EditCommand, EditContext, PreImage, remove_appended};
use crate::piece::PlacedPiece;

/// Appends a piece to the placement list without touching voxels.
#[derive(Debug)]
pub struct PlacePieceCommand {
    piece: PlacedPiece,
    index: usize,
}

impl PlacePieceCommand {
    pub fn new(piece: PlacedPiece) -> Self {
        Self { piece, index: 0 }
    }
}

impl EditCommand for PlacePieceCommand {
    fn apply(&mut self, ctx: &mut EditContext<'_>) {
        self.index = ctx.pieces.len();
        ctx.pieces.push(self.piece.clone());
    }

    fn revert(&mut self, ctx: &mut EditContext<'_>) {
        remove_appended(ctx.pieces, self.index, &self.piece);
    }
}

/// Appends a piece and bakes its footprint as one undoable step.
#[derive(Debug)]
pub struct PlacePieceAndVolumeCommand {
    piece: PlacedPiece,
    cells: Vec<VoxelCoord>,
    material: MaterialId,
    index: usize,
    pre: PreImage,
}

impl PlacePieceAndVolumeCommand {
    /// Uses an explicit set of cells to bake.
    pub fn new(
        piece: PlacedPiece,
        cells: impl IntoIterator<Item = VoxelCoord>,
        material: MaterialId,
    ) -> Self {
        Self {
            piece,
            cells: cells.into_iter().collect(),
            material,
            index: 0,
            pre: PreImage::new(),
        }
    }

    /// Bakes the piece's rotated footprint with its override or `active`.
    ///
    /// A piece the catalog can't resolve is still placed, with nothing baked.
    pub fn for_piece(piece: PlacedPiece, catalog: &dyn PieceCatalog, active: MaterialId) -> Self {
        let cells: Vec<VoxelCoord> = match piece.footprint_box(catalog) {
            Some(footprint) => footprint.cells().collect(),
            None => {
                tracing::debug!(piece_id = %piece.piece_id, "unknown piece, placing without volume");
                Vec::new()
            }
        };
        let material = piece.bake_material(active);
        Self::new(piece, cells, material)
    }
}

impl EditCommand for PlacePieceAndVolumeCommand {
    fn apply(&mut self, ctx: &mut EditContext<'_>) {
        self.pre.clear();
        self.index = ctx.pieces.len();
        ctx.pieces.push(self.piece.clone());
        for &cell in &self.cells {
            self.pre.write(ctx.store, cell, Some(self.material));
        }
    }

    fn revert(&mut self, ctx: &mut EditContext<'_>) {
        remove_appended(ctx.pieces, self.index, &self.piece);
        self.pre.restore(ctx.store);
    }
}

/// Removes the first placement equal to `piece`. Voxels are left alone.
#[derive(Debug)]
pub struct RemovePieceCommand {
    piece: PlacedPiece,
    removed_at: Option<usize>,
}

impl RemovePieceCommand {
    pub fn new(piece: PlacedPiece) -> Self {
        Self {
            piece,
            removed_at: None,
        }
    }
}

impl EditCommand for RemovePieceCommand {
    fn apply(&mut self, ctx: &mut EditContext<'_>) {
        self.removed_at = ctx.pieces.iter().position(|p| *p == self.piece);
        if let Some(index) = self.removed_at {
            ctx.pieces.remove(index);
        }
    }

    fn revert(&mut self, ctx: &mut EditContext<'_>) {
        if let Some(index) = self.removed_at.take() {
            let index = index.min(ctx.pieces.len());
            ctx.pieces.insert(index, self.piece.clone());
        }
    }
}
