//! The editor session: owner of all editable planner state.
//!
//! There is exactly one mutable path into the store and piece list:
//! [`EditorSession::execute`] (plus undo/redo). Project loading replaces the
//! whole state at once and resets history.

use std::path::{Path, PathBuf};

use voxplan_voxel::{
    DEFAULT_FLOOD_FILL_BUDGET, MaterialId, RegionQuery, Size3, VoxelBox, VoxelCoord, VoxelStore,
    query_region,
};

use crate::catalog::{PieceCatalog, Units};
use crate::command::{EditCommand, EditContext};
use crate::commands::{
    ImportSnippetCommand, MergeBlueprintCommand, PaintVolumeCommand, PaintVoxelCommand,
    PlacePieceAndVolumeCommand, RemovePieceCommand, SetBuildZoneCommand,
};
use crate::history::{CommandHistory, DEFAULT_MAX_UNDO};
use crate::piece::{PlacedPiece, Rotation, rotated_size};
use crate::project::{CURRENT_SCHEMA_VERSION, ProjectError, ProjectFile};
use crate::snippet::{Snippet, paints_from_store};
use crate::zone::{AltarState, BuildZone, ZoneState};

/// Session tunables, usually derived from the application config.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSettings {
    pub max_undo_depth: usize,
    pub flood_fill_budget: usize,
    pub build_zone_size: Size3,
    pub voxel_size_meters: f64,
    pub default_material: MaterialId,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_undo_depth: DEFAULT_MAX_UNDO,
            flood_fill_budget: DEFAULT_FLOOD_FILL_BUDGET,
            build_zone_size: BuildZone::default().size_voxels,
            voxel_size_meters: Units::default().voxel_size_meters,
            default_material: MaterialId::default(),
        }
    }
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoverTarget {
    /// A stored voxel; carries its connected same-material region.
    Region(RegionQuery),
    /// A placed piece, by list index, with its footprint.
    Piece { index: usize, bounds: VoxelBox },
}

impl HoverTarget {
    pub fn bounds(self) -> VoxelBox {
        match self {
            Self::Region(query) => query.bounds(),
            Self::Piece { bounds, .. } => bounds,
        }
    }
}

pub struct EditorSession {
    store: VoxelStore,
    pieces: Vec<PlacedPiece>,
    zone: BuildZone,
    altar: AltarState,
    units: Units,
    history: CommandHistory,
    catalog: Box<dyn PieceCatalog>,
    flood_fill_budget: usize,
    active_material: MaterialId,
    dirty: bool,
    path: Option<PathBuf>,
}

impl EditorSession {
    pub fn new(settings: &SessionSettings, catalog: Box<dyn PieceCatalog>) -> Self {
        let zone = BuildZone::sandbox(settings.build_zone_size);
        let altar = AltarState {
            center: AltarState::centered_in(zone.size_voxels),
            ..AltarState::default()
        };
        Self {
            store: VoxelStore::new(),
            pieces: Vec::new(),
            zone,
            altar,
            units: Units {
                voxel_size_meters: settings.voxel_size_meters,
            },
            history: CommandHistory::new(settings.max_undo_depth),
            catalog,
            flood_fill_budget: settings.flood_fill_budget,
            active_material: settings.default_material,
            dirty: false,
            path: None,
        }
    }

    pub fn store(&self) -> &VoxelStore {
        &self.store
    }

    pub fn pieces(&self) -> &[PlacedPiece] {
        &self.pieces
    }

    pub fn zone(&self) -> &BuildZone {
        &self.zone
    }

    pub fn altar(&self) -> &AltarState {
        &self.altar
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn catalog(&self) -> &dyn PieceCatalog {
        self.catalog.as_ref()
    }

    pub fn active_material(&self) -> MaterialId {
        self.active_material
    }

    pub fn set_active_material(&mut self, material: MaterialId) {
        self.active_material = material;
    }

    /// True when there are changes since the last save or load.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// File the session was last loaded from or saved to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn split(&mut self) -> (&mut CommandHistory, EditContext<'_>) {
        (
            &mut self.history,
            EditContext {
                store: &mut self.store,
                pieces: &mut self.pieces,
                zone: &mut self.zone,
                altar: &mut self.altar,
                catalog: self.catalog.as_ref(),
            },
        )
    }

    // -- Editing ------------------------------------------------------------

    /// Applies a command and records it in the history.
    pub fn execute(&mut self, cmd: Box<dyn EditCommand>) {
        let (history, mut ctx) = self.split();
        history.execute(cmd, &mut ctx);
        self.dirty = true;
    }

    pub fn undo(&mut self) -> bool {
        let (history, mut ctx) = self.split();
        let undone = history.undo(&mut ctx);
        self.dirty |= undone;
        undone
    }

    pub fn redo(&mut self) -> bool {
        let (history, mut ctx) = self.split();
        let redone = history.redo(&mut ctx);
        self.dirty |= redone;
        redone
    }

    /// Sets a voxel to `material`, or erases it.
    pub fn paint(&mut self, coord: VoxelCoord, material: Option<MaterialId>) {
        self.execute(Box::new(PaintVoxelCommand::new(coord, material)));
    }

    /// Places a piece and bakes its footprint with its override or the active material.
    pub fn place_piece(&mut self, piece: PlacedPiece) {
        let cmd = PlacePieceAndVolumeCommand::for_piece(piece, self.catalog(), self.active_material);
        self.execute(Box::new(cmd));
    }

    /// Removes the topmost piece covering `coord`. Returns `false` if none does.
    pub fn remove_piece_at(&mut self, coord: VoxelCoord) -> bool {
        let Some((_, piece)) = self.piece_at(coord) else {
            return false;
        };
        let cmd = RemovePieceCommand::new(piece.clone());
        self.execute(Box::new(cmd));
        true
    }

    /// Erases the remove-brush volume at `cursor`.
    pub fn erase_at(&mut self, cursor: VoxelCoord, brush: Option<(&str, Rotation)>) {
        let volume = self.erase_volume(cursor, brush);
        self.execute(Box::new(PaintVolumeCommand::erase(volume.cells())));
    }

    /// Rotates and normalizes `snippet`, then merges it with its minimum at `target`.
    pub fn import_snippet(&mut self, snippet: &Snippet, target: VoxelCoord, rotation: Rotation) {
        let prepared = snippet.rotated_normalized(rotation, self.catalog());
        tracing::info!(
            pieces = prepared.pieces.len(),
            voxels = prepared.voxels.len(),
            target = %target,
            rotation = rotation.degrees(),
            "importing snippet"
        );
        self.execute(Box::new(ImportSnippetCommand::new(prepared, target)));
    }

    pub fn set_build_zone(&mut self, state: ZoneState) {
        self.execute(Box::new(SetBuildZoneCommand::new(state)));
    }

    /// Sandbox zone without an altar, keeping the current height.
    pub fn clear_altar(&mut self) {
        self.set_build_zone(ZoneState::sandbox(self.zone.size_voxels.z));
    }

    /// Places an altar of `build_size` at the snapped cell, keeping the current height.
    pub fn place_altar(&mut self, build_size: i32, snapped: VoxelCoord) {
        self.set_build_zone(ZoneState::altar(build_size, snapped, self.zone.size_voxels.z));
    }

    // -- Queries ------------------------------------------------------------

    /// Topmost (most recently placed) piece whose footprint covers `coord`.
    pub fn piece_at(&self, coord: VoxelCoord) -> Option<(usize, &PlacedPiece)> {
        self.pieces.iter().enumerate().rev().find(|(_, piece)| {
            piece
                .footprint_box(self.catalog())
                .is_some_and(|fb| fb.contains(coord))
        })
    }

    pub fn region_at(&self, coord: VoxelCoord) -> Option<RegionQuery> {
        query_region(&self.store, coord, self.flood_fill_budget)
    }

    /// Voxel regions take priority over piece footprints.
    pub fn hover_target(&self, coord: VoxelCoord) -> Option<HoverTarget> {
        if let Some(query) = self.region_at(coord) {
            return Some(HoverTarget::Region(query));
        }
        let (index, piece) = self.piece_at(coord)?;
        let bounds = piece.footprint_box(self.catalog())?;
        Some(HoverTarget::Piece { index, bounds })
    }

    pub fn hover_bounds(&self, coord: VoxelCoord) -> Option<VoxelBox> {
        self.hover_target(coord).map(HoverTarget::bounds)
    }

    /// Remove-brush volume: the brush piece's rotated footprint at `cursor`,
    /// or the single cell when no resolvable piece is selected.
    pub fn erase_volume(&self, cursor: VoxelCoord, brush: Option<(&str, Rotation)>) -> VoxelBox {
        brush
            .and_then(|(piece_id, rot)| {
                self.catalog
                    .footprint(piece_id)
                    .map(|size| VoxelBox::new(cursor, rotated_size(size, rot)))
            })
            .unwrap_or_else(|| VoxelBox::unit(cursor))
    }

    /// Every placed piece and stored voxel as a snippet.
    pub fn export_snippet(&self) -> Snippet {
        Snippet {
            pieces: self.pieces.clone(),
            voxels: paints_from_store(&self.store),
        }
    }

    // -- Persistence --------------------------------------------------------

    /// Project file mirroring the current state, voxel list synced from the store.
    pub fn to_project_file(&self) -> ProjectFile {
        ProjectFile {
            schema_version: CURRENT_SCHEMA_VERSION,
            build_zone: self.zone.clone(),
            units: self.units,
            placed_pieces: self.pieces.clone(),
            voxels: paints_from_store(&self.store),
            altar_placed: self.altar.placed,
            altar_build_size_vox: self.altar.build_size_vox,
        }
    }

    pub fn save(&mut self, path: &Path) -> Result<(), ProjectError> {
        self.to_project_file().save(path)?;
        self.dirty = false;
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Replaces the session state with a project file. On error the session is unchanged.
    pub fn load(&mut self, path: &Path) -> Result<(), ProjectError> {
        let project = ProjectFile::load(path)?;
        self.load_project_file(project);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    pub fn load_project_file(&mut self, project: ProjectFile) {
        self.store = project.build_store();
        self.altar = AltarState {
            placed: project.altar_placed,
            build_size_vox: project.altar_build_size_vox,
            center: AltarState::centered_in(project.build_zone.size_voxels),
        };
        self.pieces = project.placed_pieces;
        self.zone = project.build_zone;
        self.units = project.units;
        self.history.clear();
        self.dirty = false;
        tracing::debug!(
            pieces = self.pieces.len(),
            voxels = self.store.len(),
            "session replaced from project"
        );
    }

    /// Adds another project's pieces and voxels as one undoable step.
    pub fn merge_blueprint(&mut self, path: &Path) -> Result<(), ProjectError> {
        let other = ProjectFile::load(path)?;
        self.execute(Box::new(MergeBlueprintCommand::new(
            other.placed_pieces,
            other.voxels,
        )));
        Ok(())
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("voxels", &self.store.len())
            .field("pieces", &self.pieces.len())
            .field("undo", &self.history.undo_len())
            .field("redo", &self.history.redo_len())
            .field("dirty", &self.dirty)
            .field("path", &self.path)
            .finish()
    }
}
