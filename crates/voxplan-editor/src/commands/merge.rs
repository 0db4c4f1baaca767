//! Additive merge of another project's pieces and voxels.

use crate::command::{EditCommand, EditContext, PreImage, remove_appended};
use crate::piece::PlacedPiece;
use crate::snippet::VoxelPaint;

/// Adds another blueprint's pieces and voxels in place.
///
/// Nothing is translated or baked; voxel paints overwrite, last one wins.
#[derive(Debug)]
pub struct MergeBlueprintCommand {
    pieces: Vec<PlacedPiece>,
    voxels: Vec<VoxelPaint>,
    added: Vec<usize>,
    pre: PreImage,
}

impl MergeBlueprintCommand {
    pub fn new(pieces: Vec<PlacedPiece>, voxels: Vec<VoxelPaint>) -> Self {
        Self {
            pieces,
            voxels,
            added: Vec::new(),
            pre: PreImage::new(),
        }
    }
}

impl EditCommand for MergeBlueprintCommand {
    fn apply(&mut self, ctx: &mut EditContext<'_>) {
        self.pre.clear();
        self.added.clear();
        for piece in &self.pieces {
            self.added.push(ctx.pieces.len());
            ctx.pieces.push(piece.clone());
        }
        for voxel in &self.voxels {
            self.pre.write(ctx.store, voxel.coord(), Some(voxel.material()));
        }
    }

    fn revert(&mut self, ctx: &mut EditContext<'_>) {
        for (index, piece) in self.added.iter().zip(&self.pieces).rev() {
            remove_appended(ctx.pieces, *index, piece);
        }
        self.pre.restore(ctx.store);
    }
}
