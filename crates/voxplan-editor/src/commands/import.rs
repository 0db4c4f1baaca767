//! Snippet import at a target cell.

use voxplan_voxel::{MaterialId, VoxelCoord};

use crate::command::{EditCommand, EditContext, PreImage, remove_appended};
use crate::piece::PlacedPiece;
use crate::snippet::Snippet;

/// Merges a snippet into the session with its minimum corner at `target`.
///
/// Pieces are appended and baked first; explicit voxel paints follow and win
/// over baked footprints. The whole merge is one history entry.
#[derive(Debug)]
pub struct ImportSnippetCommand {
    snippet: Snippet,
    target: VoxelCoord,
    added: Vec<(usize, PlacedPiece)>,
    pre: PreImage,
}

impl ImportSnippetCommand {
    pub fn new(snippet: Snippet, target: VoxelCoord) -> Self {
        Self {
            snippet,
            target,
            added: Vec::new(),
            pre: PreImage::new(),
        }
    }

    /// Translation applied to every snippet element.
    pub fn offset(&self) -> VoxelCoord {
        self.target - self.snippet.min_corner()
    }
}

impl EditCommand for ImportSnippetCommand {
    fn apply(&mut self, ctx: &mut EditContext<'_>) {
        self.pre.clear();
        self.added.clear();
        let offset = self.offset();

        for piece in &self.snippet.pieces {
            let placed = PlacedPiece {
                pos: piece.pos.translated(offset),
                ..piece.clone()
            };
            let index = ctx.pieces.len();
            ctx.pieces.push(placed.clone());

            match placed.footprint_box(ctx.catalog) {
                Some(footprint) => {
                    let material = placed.bake_material(MaterialId::NoMaterial);
                    for cell in footprint.cells() {
                        self.pre.write(ctx.store, cell, Some(material));
                    }
                }
                None => {
                    tracing::debug!(piece_id = %placed.piece_id, "unknown piece in snippet, skipping bake");
                }
            }
            self.added.push((index, placed));
        }

        for voxel in &self.snippet.voxels {
            self.pre
                .write(ctx.store, voxel.coord() + offset, Some(voxel.material()));
        }

        tracing::debug!(
            pieces = self.added.len(),
            touched = self.pre.len(),
            target = %self.target,
            "imported snippet"
        );
    }

    fn revert(&mut self, ctx: &mut EditContext<'_>) {
        for (index, piece) in self.added.iter().rev() {
            remove_appended(ctx.pieces, *index, piece);
        }
        self.pre.restore(ctx.store);
    }
}
