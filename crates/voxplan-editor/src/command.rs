//! The reversible edit command abstraction.
//!
//! Every mutation of the store, piece list or build zone goes through an
//! [`EditCommand`]. Commands receive the editable state as an explicit
//! [`EditContext`] and record whatever they need to undo themselves during
//! `apply`.

use std::fmt::Debug;

use rustc_hash::FxHashMap;
use voxplan_voxel::{MaterialId, VoxelCoord, VoxelStore};

use crate::catalog::PieceCatalog;
use crate::piece::PlacedPiece;
use crate::zone::{AltarState, BuildZone};

/// Mutable view of the session state handed to commands.
pub struct EditContext<'a> {
    pub store: &'a mut VoxelStore,
    pub pieces: &'a mut Vec<PlacedPiece>,
    pub zone: &'a mut BuildZone,
    pub altar: &'a mut AltarState,
    pub catalog: &'a dyn PieceCatalog,
}

/// A forward/inverse pair over the session state.
///
/// `revert` must restore exactly the state `apply` started from. `apply` may be
/// called again after `revert` (redo) and must re-capture its undo record.
pub trait EditCommand: Debug {
    fn apply(&mut self, ctx: &mut EditContext<'_>);
    fn revert(&mut self, ctx: &mut EditContext<'_>);
}

/// Touch-once pre-image of the voxels one command execution wrote.
///
/// The first write to a coordinate records whether it was occupied and its old
/// material. Later writes to the same coordinate leave the record alone.
#[derive(Debug, Default)]
pub struct PreImage {
    order: Vec<VoxelCoord>,
    before: FxHashMap<VoxelCoord, Option<MaterialId>>,
}

impl PreImage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.before.clear();
    }

    /// Records `coord` if this is its first touch.
    pub fn touch(&mut self, store: &VoxelStore, coord: VoxelCoord) {
        if let std::collections::hash_map::Entry::Vacant(slot) = self.before.entry(coord) {
            slot.insert(store.get(coord));
            self.order.push(coord);
        }
    }

    /// Captures then writes (`Some`) or erases (`None`) a coordinate.
    pub fn write(&mut self, store: &mut VoxelStore, coord: VoxelCoord, value: Option<MaterialId>) {
        self.touch(store, coord);
        match value {
            Some(material) => {
                store.set(coord, material);
            }
            None => {
                store.remove(coord);
            }
        }
    }

    /// Puts every captured coordinate back to its recorded state.
    pub fn restore(&self, store: &mut VoxelStore) {
        for coord in self.order.iter().rev() {
            match self.before.get(coord).copied().flatten() {
                Some(material) => {
                    store.set(*coord, material);
                }
                None => {
                    store.remove(*coord);
                }
            }
        }
    }

    /// Number of distinct coordinates touched.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Removes a piece appended at `index`, falling back to value equality when the
/// list has changed underneath it.
pub(crate) fn remove_appended(pieces: &mut Vec<PlacedPiece>, index: usize, piece: &PlacedPiece) {
    if pieces.get(index) == Some(piece) {
        pieces.remove(index);
    } else if let Some(pos) = pieces.iter().position(|p| p == piece) {
        pieces.remove(pos);
    }
}
