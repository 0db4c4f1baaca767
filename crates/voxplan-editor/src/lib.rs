//! Edit model for the voxel build planner: piece catalog, reversible edit
//! commands with bounded history, snippets, project files and the session
//! that owns them.

pub mod catalog;
pub mod command;
pub mod commands;
pub mod history;
pub mod piece;
pub mod project;
pub mod session;
pub mod snippet;
pub mod zone;

pub use catalog::{CatalogError, Category, PieceCatalog, PieceDef, PieceLibrary, Units};
pub use command::{EditCommand, EditContext, PreImage};
pub use commands::{
    ImportSnippetCommand, MergeBlueprintCommand, PaintVolumeCommand, PaintVoxelCommand,
    PlacePieceAndVolumeCommand, PlacePieceCommand, RemovePieceCommand, SetBuildZoneCommand,
};
pub use history::{CommandHistory, DEFAULT_MAX_UNDO};
pub use piece::{Anchor, InvalidRotation, PlacedPiece, Rotation, rotated_size};
pub use project::{CURRENT_SCHEMA_VERSION, ProjectError, ProjectFile};
pub use session::{EditorSession, HoverTarget, SessionSettings};
pub use snippet::{Snippet, VoxelPaint, paints_from_store, rotate_anchor};
pub use zone::{ALTAR_BUILD_SIZES, AltarState, BuildZone, SANDBOX_SIZE, ZoneState};
