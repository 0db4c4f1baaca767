//! Undo/redo properties over every command kind, driven through a session.

use voxplan_editor::{
    Anchor, EditCommand, EditorSession, ImportSnippetCommand, MergeBlueprintCommand,
    PaintVolumeCommand, PaintVoxelCommand, PieceDef, PieceLibrary, PlacePieceAndVolumeCommand,
    PlacePieceCommand, PlacedPiece, RemovePieceCommand, Rotation, SessionSettings,
    SetBuildZoneCommand, Snippet, VoxelPaint, ZoneState,
};
use voxplan_voxel::{MaterialId, Size3, VoxelBox, VoxelCoord};

const WALL: &str = "base/wall/1m/panel/full";

fn library() -> PieceLibrary {
    let mut lib = PieceLibrary::builtin();
    lib.insert(PieceDef {
        id: "cube3".to_string(),
        size: Size3::new(3, 3, 3),
        ..PieceDef::default()
    });
    lib
}

fn seeded_session() -> EditorSession {
    let mut s = EditorSession::new(&SessionSettings::default(), Box::new(library()));
    s.paint(VoxelCoord::new(0, 0, 0), Some(MaterialId::BrickRed));
    s.paint(VoxelCoord::new(1, 0, 0), Some(MaterialId::BrickSand));
    s.place_piece(PlacedPiece::new(WALL, Anchor::new(4.0, 4.0, 0.0), Rotation::Deg0));
    s
}

#[derive(Debug, PartialEq)]
struct Snapshot {
    voxels: Vec<(VoxelCoord, MaterialId)>,
    pieces: Vec<PlacedPiece>,
    zone_size: Size3,
    altar_placed: bool,
}

fn snapshot(s: &EditorSession) -> Snapshot {
    Snapshot {
        voxels: s.store().sorted_entries(),
        pieces: s.pieces().to_vec(),
        zone_size: s.zone().size_voxels,
        altar_placed: s.altar().placed,
    }
}

fn commands() -> Vec<Box<dyn EditCommand>> {
    let lib = library();
    let overlap = VoxelBox::new(VoxelCoord::ORIGIN, Size3::new(3, 1, 1));
    vec![
        Box::new(PaintVoxelCommand::set(VoxelCoord::ORIGIN, MaterialId::GlowRed)),
        Box::new(PaintVoxelCommand::erase(VoxelCoord::new(1, 0, 0))),
        Box::new(PaintVolumeCommand::new(
            overlap.cells().chain(overlap.cells()),
            Some(MaterialId::MetalDark),
        )),
        Box::new(PlacePieceCommand::new(PlacedPiece::new(
            "cube3",
            Anchor::new(9.0, 9.0, 0.0),
            Rotation::Deg0,
        ))),
        Box::new(PlacePieceAndVolumeCommand::for_piece(
            PlacedPiece::new("cube3", Anchor::new(-1.0, -1.0, -1.0), Rotation::Deg90),
            &lib,
            MaterialId::WoodBrownDark,
        )),
        Box::new(RemovePieceCommand::new(PlacedPiece::new(
            WALL,
            Anchor::new(4.0, 4.0, 0.0),
            Rotation::Deg0,
        ))),
        Box::new(SetBuildZoneCommand::new(ZoneState::altar(
            240,
            VoxelCoord::new(16, 16, 0),
            64,
        ))),
        Box::new(ImportSnippetCommand::new(
            Snippet {
                pieces: vec![PlacedPiece::new("cube3", Anchor::default(), Rotation::Deg0)],
                voxels: vec![VoxelPaint::new(VoxelCoord::new(1, 1, 1), MaterialId::GlowBlue)],
            },
            VoxelCoord::new(0, 0, 0),
        )),
        Box::new(MergeBlueprintCommand::new(
            vec![PlacedPiece::new(WALL, Anchor::new(1.5, 0.0, 0.0), Rotation::Deg180)],
            vec![VoxelPaint::new(VoxelCoord::ORIGIN, MaterialId::GlowWhite)],
        )),
    ]
}

#[test]
fn test_undo_restores_exact_state_for_every_command() {
    for cmd in commands() {
        let mut s = seeded_session();
        let before = snapshot(&s);
        let label = format!("{cmd:?}");
        s.execute(cmd);
        assert!(s.undo(), "{label}");
        assert_eq!(snapshot(&s), before, "{label}");
    }
}

#[test]
fn test_redo_reproduces_post_apply_state_for_every_command() {
    for cmd in commands() {
        let mut s = seeded_session();
        let label = format!("{cmd:?}");
        s.execute(cmd);
        let after = snapshot(&s);
        assert!(s.undo(), "{label}");
        assert!(s.redo(), "{label}");
        assert_eq!(snapshot(&s), after, "{label}");
    }
}

#[test]
fn test_overlapping_footprint_restores_original_pre_image() {
    let mut s = EditorSession::new(&SessionSettings::default(), Box::new(library()));
    s.paint(VoxelCoord::new(1, 1, 1), Some(MaterialId::StoneGrayDark));
    let before = snapshot(&s);

    // Piece bake and explicit voxel both hit (1, 1, 1).
    s.execute(Box::new(ImportSnippetCommand::new(
        Snippet {
            pieces: vec![PlacedPiece::new("cube3", Anchor::default(), Rotation::Deg0)
                .with_material(MaterialId::GlowYellow)],
            voxels: vec![VoxelPaint::new(VoxelCoord::new(1, 1, 1), MaterialId::GlowRed)],
        },
        VoxelCoord::ORIGIN,
    )));
    assert_eq!(s.store().get(VoxelCoord::new(1, 1, 1)), Some(MaterialId::GlowRed));
    assert_eq!(s.store().len(), 27);

    assert!(s.undo());
    assert_eq!(snapshot(&s), before);
}

#[test]
fn test_twenty_five_commands_leave_twenty_undoable() {
    let mut s = EditorSession::new(&SessionSettings::default(), Box::new(library()));
    for x in 0..25 {
        s.paint(VoxelCoord::new(x, 0, 0), Some(MaterialId::BrickRed));
    }
    for _ in 0..20 {
        assert!(s.undo());
    }
    assert!(!s.undo());
    assert_eq!(s.store().len(), 5);
}

#[test]
fn test_configured_depth_bounds_history() {
    let settings = SessionSettings {
        max_undo_depth: 3,
        ..SessionSettings::default()
    };
    let mut s = EditorSession::new(&settings, Box::new(library()));
    for x in 0..5 {
        s.paint(VoxelCoord::new(x, 0, 0), Some(MaterialId::BrickRed));
    }
    assert_eq!(s.history().undo_len(), 3);
}

#[test]
fn test_forward_command_after_undo_clears_redo() {
    let mut s = seeded_session();
    assert!(s.undo());
    assert_eq!(s.history().redo_len(), 1);
    s.paint(VoxelCoord::new(7, 7, 7), Some(MaterialId::GlowWhite));
    assert_eq!(s.history().redo_len(), 0);
    assert!(!s.redo());
}
