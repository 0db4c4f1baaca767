//! Portable blueprint snippets and their quarter-turn rotation.
//!
//! A snippet is an anchor-relative bundle of piece placements and explicit
//! voxel paints. Rotation happens about the vertical axis in integer voxel
//! space after translating the snippet's bounding minimum to the origin.

use std::path::Path;

use serde::{Deserialize, Serialize};
use voxplan_voxel::{MaterialId, Size3, VoxelBox, VoxelCoord, VoxelStore};

use crate::catalog::PieceCatalog;
use crate::piece::{Anchor, PlacedPiece, Rotation};
use crate::project::ProjectError;

/// An explicit voxel paint as persisted. `material` is a palette index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoxelPaint {
    #[serde(alias = "X")]
    pub x: i32,
    #[serde(alias = "Y")]
    pub y: i32,
    #[serde(alias = "Z")]
    pub z: i32,
    #[serde(alias = "Material")]
    pub material: i32,
}

impl VoxelPaint {
    pub fn new(coord: VoxelCoord, material: MaterialId) -> Self {
        Self {
            x: coord.x,
            y: coord.y,
            z: coord.z,
            material: material.index(),
        }
    }

    pub fn coord(&self) -> VoxelCoord {
        VoxelCoord::new(self.x, self.y, self.z)
    }

    /// Negative and unknown indices resolve to [`MaterialId::NoMaterial`].
    pub fn material(&self) -> MaterialId {
        MaterialId::from_index(self.material)
    }
}

/// Voxel paints for every entry of `store`, in coordinate order.
pub fn paints_from_store(store: &VoxelStore) -> Vec<VoxelPaint> {
    store
        .sorted_entries()
        .into_iter()
        .map(|(coord, material)| VoxelPaint::new(coord, material))
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snippet {
    #[serde(alias = "Pieces")]
    pub pieces: Vec<PlacedPiece>,
    #[serde(alias = "Voxels")]
    pub voxels: Vec<VoxelPaint>,
}

impl Snippet {
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty() && self.voxels.is_empty()
    }

    /// Component-wise minimum over floored piece anchors and voxel paints.
    ///
    /// Footprint sizes are ignored. An empty snippet has its minimum at the
    /// origin.
    pub fn min_corner(&self) -> VoxelCoord {
        self.pieces
            .iter()
            .map(|p| p.pos.floor())
            .chain(self.voxels.iter().map(VoxelPaint::coord))
            .reduce(VoxelCoord::min)
            .unwrap_or(VoxelCoord::ORIGIN)
    }

    /// Bounding box of every piece footprint and voxel cell.
    ///
    /// Pieces the catalog can't resolve count as a single cell. `None` for an
    /// empty snippet or one spread wider than `i32::MAX` cells.
    pub fn bounds(&self, catalog: &dyn PieceCatalog) -> Option<VoxelBox> {
        let piece_boxes = self.pieces.iter().map(|p| {
            let size = p.footprint(catalog).unwrap_or(Size3::UNIT);
            VoxelBox::new(p.pos.floor(), size)
        });
        let voxel_boxes = self.voxels.iter().map(|v| VoxelBox::unit(v.coord()));
        let mut boxes = piece_boxes.chain(voxel_boxes);
        let first = boxes.next()?;
        boxes.try_fold(first, |acc, b| acc.union(&b))
    }

    /// Translates the bounding minimum to the origin, then rotates.
    ///
    /// Pieces keep the fractional part of their anchors when translated; rotated
    /// pieces are re-anchored on whole cells.
    pub fn rotated_normalized(&self, rotation: Rotation, catalog: &dyn PieceCatalog) -> Snippet {
        let Some(bounds) = self.bounds(catalog) else {
            if !self.is_empty() {
                tracing::warn!("snippet too wide to normalize, importing it unrotated");
                return self.clone();
            }
            return Snippet::default();
        };
        let min = bounds.min;
        let shift = VoxelCoord::ORIGIN - min;

        let mut out = Snippet {
            pieces: self
                .pieces
                .iter()
                .map(|p| PlacedPiece {
                    pos: p.pos.translated(shift),
                    ..p.clone()
                })
                .collect(),
            voxels: self
                .voxels
                .iter()
                .map(|v| {
                    let c = v.coord() - min;
                    VoxelPaint { x: c.x, y: c.y, z: c.z, ..*v }
                })
                .collect(),
        };
        if rotation == Rotation::Deg0 {
            return out;
        }

        let max_x = bounds.size.x - 1;
        let max_y = bounds.size.y - 1;
        for piece in &mut out.pieces {
            let cell = piece.pos.floor();
            let size = piece.footprint(catalog).unwrap_or(Size3::UNIT);
            let (nx, ny) = rotate_anchor(cell.x, cell.y, size.x, size.y, max_x, max_y, rotation);
            piece.pos = Anchor::from(VoxelCoord::new(nx, ny, cell.z));
            piece.rot_y = piece.rot_y.add(rotation);
        }
        for voxel in &mut out.voxels {
            let (nx, ny) = rotate_anchor(voxel.x, voxel.y, 1, 1, max_x, max_y, rotation);
            voxel.x = nx;
            voxel.y = ny;
        }
        out
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let snippet = Self::from_json(&contents).map_err(|source| ProjectError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            pieces = snippet.pieces.len(),
            voxels = snippet.voxels.len(),
            "loaded snippet"
        );
        Ok(snippet)
    }

    pub fn save(&self, path: &Path) -> Result<(), ProjectError> {
        let json = serde_json::to_string_pretty(self).map_err(ProjectError::Serialize)?;
        std::fs::write(path, json).map_err(|source| ProjectError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "saved snippet");
        Ok(())
    }
}

/// New anchor for an occupant of footprint `w`×`l` at `(x, y)` inside a
/// normalized area whose inclusive maxima are `max_x`, `max_y`.
pub fn rotate_anchor(
    x: i32,
    y: i32,
    w: i32,
    l: i32,
    max_x: i32,
    max_y: i32,
    rotation: Rotation,
) -> (i32, i32) {
    match rotation {
        Rotation::Deg0 => (x, y),
        Rotation::Deg90 => (max_y - (y + l - 1), x),
        Rotation::Deg180 => (max_x - (x + w - 1), max_y - (y + l - 1)),
        Rotation::Deg270 => (y, max_x - (x + w - 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PieceDef, PieceLibrary};

    fn library() -> PieceLibrary {
        let mut lib = PieceLibrary::builtin();
        lib.insert(PieceDef {
            id: "beam".to_string(),
            size: Size3::new(2, 1, 1),
            ..PieceDef::default()
        });
        lib
    }

    fn beam_at(x: f64, y: f64, rot: Rotation) -> PlacedPiece {
        PlacedPiece::new("beam", Anchor::new(x, y, 0.0), rot)
    }

    #[test]
    fn test_empty_snippet_normalizes_to_empty() {
        let lib = library();
        let s = Snippet::default();
        assert!(s.bounds(&lib).is_none());
        assert_eq!(s.min_corner(), VoxelCoord::ORIGIN);
        assert!(s.rotated_normalized(Rotation::Deg90, &lib).is_empty());
    }

    #[test]
    fn test_single_piece_rotations_stay_at_origin() {
        let lib = library();
        let s = Snippet {
            pieces: vec![beam_at(0.0, 0.0, Rotation::Deg0)],
            voxels: vec![],
        };

        let r90 = s.rotated_normalized(Rotation::Deg90, &lib);
        assert_eq!(r90.pieces[0].pos.floor(), VoxelCoord::ORIGIN);
        assert_eq!(r90.pieces[0].rot_y, Rotation::Deg90);

        let r180 = s.rotated_normalized(Rotation::Deg180, &lib);
        assert_eq!(r180.pieces[0].pos.floor(), VoxelCoord::ORIGIN);
        assert_eq!(r180.pieces[0].rot_y, Rotation::Deg180);
    }

    #[test]
    fn test_normalization_keeps_fraction_without_rotation() {
        let lib = library();
        let s = Snippet {
            pieces: vec![beam_at(10.5, 20.0, Rotation::Deg0)],
            voxels: vec![VoxelPaint::new(VoxelCoord::new(12, 21, 3), MaterialId::BrickRed)],
        };
        let n = s.rotated_normalized(Rotation::Deg0, &lib);
        assert_eq!(n.pieces[0].pos, Anchor::new(0.5, 0.0, 0.0));
        assert_eq!(n.voxels[0].coord(), VoxelCoord::new(2, 1, 3));
    }

    #[test]
    fn test_voxel_rotation_about_bounds() {
        let lib = library();
        // 3 wide (x 0..=2), 2 long (y 0..=1).
        let s = Snippet {
            pieces: vec![],
            voxels: vec![
                VoxelPaint::new(VoxelCoord::new(0, 0, 0), MaterialId::GlowRed),
                VoxelPaint::new(VoxelCoord::new(2, 1, 0), MaterialId::GlowBlue),
            ],
        };
        let r90 = s.rotated_normalized(Rotation::Deg90, &lib);
        assert_eq!(r90.voxels[0].coord(), VoxelCoord::new(1, 0, 0));
        assert_eq!(r90.voxels[1].coord(), VoxelCoord::new(0, 2, 0));

        let r270 = s.rotated_normalized(Rotation::Deg270, &lib);
        assert_eq!(r270.voxels[0].coord(), VoxelCoord::new(0, 2, 0));
        assert_eq!(r270.voxels[1].coord(), VoxelCoord::new(1, 0, 0));
    }

    #[test]
    fn test_rotation_adds_to_existing_piece_rotation() {
        let lib = library();
        let s = Snippet {
            pieces: vec![beam_at(0.0, 0.0, Rotation::Deg270)],
            voxels: vec![],
        };
        let r = s.rotated_normalized(Rotation::Deg180, &lib);
        assert_eq!(r.pieces[0].rot_y, Rotation::Deg90);
    }

    #[test]
    fn test_unresolved_piece_counts_as_one_cell() {
        let lib = library();
        let s = Snippet {
            pieces: vec![PlacedPiece::new("ghost", Anchor::new(4.0, 4.0, 1.0), Rotation::Deg0)],
            voxels: vec![VoxelPaint::new(VoxelCoord::new(2, 2, 1), MaterialId::GlowWhite)],
        };
        let b = s.bounds(&lib).unwrap();
        assert_eq!(b.min, VoxelCoord::new(2, 2, 1));
        assert_eq!(b.size, Size3::new(3, 3, 1));
    }

    #[test]
    fn test_negative_material_resolves_to_no_material() {
        let v = VoxelPaint {
            x: 0,
            y: 0,
            z: 0,
            material: -1,
        };
        assert_eq!(v.material(), MaterialId::NoMaterial);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snip.json");
        let s = Snippet {
            pieces: vec![beam_at(1.0, 2.0, Rotation::Deg90)],
            voxels: vec![VoxelPaint::new(VoxelCoord::new(5, 5, 5), MaterialId::MetalDark)],
        };
        s.save(&path).unwrap();
        assert_eq!(Snippet::load(&path).unwrap(), s);
    }
}
