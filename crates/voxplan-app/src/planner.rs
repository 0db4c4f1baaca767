//! Headless planner host.
//!
//! Wraps an [`EditorSession`] and keeps the per-material meshes in step with
//! the store: every edit, undo, redo or load re-extracts the dense chunk and
//! re-runs the greedy mesher. Pointer hover goes through the redraw throttle.

use std::fmt;
use std::path::Path;
use std::time::Instant;

use tracing::{debug, warn};
use voxplan_config::Config;
use voxplan_editor::{
    EditCommand, EditorSession, PieceCatalog, ProjectError, Rotation, SessionSettings, Snippet,
};
use voxplan_mesh::{MeshSet, greedy_mesh};
use voxplan_voxel::{ChunkError, MaterialId, Size3, VoxelBox, VoxelChunk, VoxelCoord};

use crate::throttle::RedrawThrottle;

/// Session settings taken from the application config.
pub fn session_settings(config: &Config) -> SessionSettings {
    SessionSettings {
        max_undo_depth: config.editor.max_undo_depth,
        flood_fill_budget: config.editor.flood_fill_budget,
        build_zone_size: Size3::from(config.project.build_zone_size),
        voxel_size_meters: config.project.voxel_size_meters,
        default_material: MaterialId::from_index(config.editor.default_material),
    }
}

pub struct Planner {
    session: EditorSession,
    meshes: MeshSet,
    hover: Option<VoxelBox>,
    throttle: RedrawThrottle,
    rebuilds: u64,
}

impl Planner {
    pub fn new(session: EditorSession, throttle: RedrawThrottle) -> Self {
        let mut planner = Self {
            session,
            meshes: MeshSet::new(),
            hover: None,
            throttle,
            rebuilds: 0,
        };
        planner.refresh();
        planner
    }

    /// Builds a session and throttle from `config` around `catalog`.
    pub fn from_config(config: &Config, catalog: Box<dyn PieceCatalog>) -> Self {
        let session = EditorSession::new(&session_settings(config), catalog);
        Self::new(session, RedrawThrottle::from_millis(config.editor.redraw_throttle_ms))
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn meshes(&self) -> &MeshSet {
        &self.meshes
    }

    /// Last hover box accepted by the throttle.
    pub fn hover(&self) -> Option<VoxelBox> {
        self.hover
    }

    /// Number of mesh rebuilds so far.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn execute(&mut self, cmd: Box<dyn EditCommand>) {
        self.session.execute(cmd);
        self.refresh();
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.session.undo();
        if undone {
            self.refresh();
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.session.redo();
        if redone {
            self.refresh();
        }
        redone
    }

    pub fn import_snippet(&mut self, snippet: &Snippet, target: VoxelCoord, rotation: Rotation) {
        self.session.import_snippet(snippet, target, rotation);
        self.refresh();
    }

    pub fn load_project(&mut self, path: &Path) -> Result<(), ProjectError> {
        self.session.load(path)?;
        self.hover = None;
        self.refresh();
        Ok(())
    }

    pub fn save_project(&mut self, path: &Path) -> Result<(), ProjectError> {
        self.session.save(path)
    }

    /// Handles pointer movement over `cell`. Returns `true` if a redraw ran.
    pub fn pointer_moved(&mut self, cell: VoxelCoord, now: Instant) -> bool {
        if !self.throttle.should_redraw(now) {
            return false;
        }
        self.hover = self.session.hover_bounds(cell);
        true
    }

    /// Re-extracts the store and re-meshes it.
    pub fn rebuild_meshes(&mut self) -> Result<&MeshSet, ChunkError> {
        self.meshes = match VoxelChunk::extract(self.session.store())? {
            Some(chunk) => greedy_mesh(&chunk),
            None => MeshSet::new(),
        };
        self.rebuilds += 1;
        debug!(
            materials = self.meshes.len(),
            quads = self.meshes.total_quads(),
            "rebuilt meshes"
        );
        Ok(&self.meshes)
    }

    fn refresh(&mut self) {
        let rebuilt = self.rebuild_meshes().map(|_| ());
        if let Err(e) = rebuilt {
            warn!("mesh rebuild skipped: {e}");
            self.meshes = MeshSet::new();
        }
    }

    pub fn stats(&self) -> PlannerStats {
        PlannerStats {
            voxels: self.session.store().len(),
            pieces: self.session.pieces().len(),
            materials: self.meshes.len(),
            quads: self.meshes.total_quads(),
            extent: self.session.store().extent(),
            undo: self.session.history().undo_len(),
            dirty: self.session.is_dirty(),
        }
    }
}

/// Summary printed by the command-line host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannerStats {
    pub voxels: usize,
    pub pieces: usize,
    pub materials: usize,
    pub quads: usize,
    /// Inclusive corners of the occupied cells.
    pub extent: Option<(VoxelCoord, VoxelCoord)>,
    pub undo: usize,
    pub dirty: bool,
}

impl fmt::Display for PlannerStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  voxels:    {}", self.voxels)?;
        writeln!(f, "  pieces:    {}", self.pieces)?;
        writeln!(f, "  materials: {}", self.materials)?;
        writeln!(f, "  quads:     {}", self.quads)?;
        match self.extent {
            Some((min, max)) => writeln!(
                f,
                "  bounds:    {min} size {}x{}x{}",
                span(min.x, max.x),
                span(min.y, max.y),
                span(min.z, max.z)
            )?,
            None => writeln!(f, "  bounds:    (empty)")?,
        }
        write!(f, "  undo:      {} (unsaved changes: {})", self.undo, self.dirty)
    }
}

fn span(min: i32, max: i32) -> i64 {
    i64::from(max) - i64::from(min) + 1
}
