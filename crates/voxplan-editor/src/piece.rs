//! Placed pieces: catalog id, anchor, grid rotation and material override.

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use voxplan_voxel::{MaterialId, Size3, VoxelBox, VoxelCoord};

use crate::catalog::PieceCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("rotation {0}° is not a multiple of 90")]
pub struct InvalidRotation(pub i32);

/// Offset between a legacy stored `RotY` and the grid rotation.
const LEGACY_YAW_OFFSET: Rotation = Rotation::Deg90;

/// Quarter-turn rotation about the vertical axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Normalizes modulo 360; negative inputs are allowed.
    pub fn from_degrees(degrees: i32) -> Result<Self, InvalidRotation> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(InvalidRotation(degrees)),
        }
    }

    pub fn degrees(self) -> i32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Sum of two rotations, modulo 360.
    pub fn add(self, other: Rotation) -> Rotation {
        Self::from_quarter_turns(self.quarter_turns() + other.quarter_turns())
    }

    /// Difference of two rotations, modulo 360.
    pub fn sub(self, other: Rotation) -> Rotation {
        self.add(Rotation::from_quarter_turns(4 - other.quarter_turns()))
    }

    /// Grid rotation of a yaw stored by the earlier planner, which kept piece
    /// yaws a quarter turn ahead of the voxel grid.
    pub fn from_legacy_yaw(yaw: Rotation) -> Rotation {
        yaw.sub(LEGACY_YAW_OFFSET)
    }

    /// True at 90° and 270°, where width and length trade places.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }

    fn quarter_turns(self) -> i32 {
        self.degrees() / 90
    }

    fn from_quarter_turns(turns: i32) -> Rotation {
        match turns.rem_euclid(4) {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }
}

impl TryFrom<i32> for Rotation {
    type Error = InvalidRotation;

    fn try_from(degrees: i32) -> Result<Self, Self::Error> {
        Self::from_degrees(degrees)
    }
}

impl From<Rotation> for i32 {
    fn from(rot: Rotation) -> Self {
        rot.degrees()
    }
}

/// Footprint after rotation: X and Y swap at 90°/270°, every dimension at least 1.
pub fn rotated_size(size: Size3, rotation: Rotation) -> Size3 {
    let size = if rotation.swaps_axes() {
        Size3::new(size.y, size.x, size.z)
    } else {
        size
    };
    size.at_least_one()
}

/// Real-valued piece anchor as stored in project and snippet files.
///
/// Baking floors it onto the voxel grid. Deserializes from `{"x","y","z"}` or
/// from an `"x,y,z"` string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Anchor {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Anchor {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn floor(self) -> VoxelCoord {
        VoxelCoord::from_floor(self.x, self.y, self.z)
    }

    pub fn translated(self, offset: VoxelCoord) -> Self {
        Self::new(
            self.x + f64::from(offset.x),
            self.y + f64::from(offset.y),
            self.z + f64::from(offset.z),
        )
    }

    fn parse_triple(text: &str) -> Option<Self> {
        let mut parts = text.split(',').map(|p| p.trim().parse::<f64>());
        let x = parts.next()?.ok()?;
        let y = parts.next()?.ok()?;
        let z = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(x, y, z))
    }
}

impl From<VoxelCoord> for Anchor {
    fn from(c: VoxelCoord) -> Self {
        Self::new(f64::from(c.x), f64::from(c.y), f64::from(c.z))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnchorRepr {
    Object {
        #[serde(default, alias = "X")]
        x: f64,
        #[serde(default, alias = "Y")]
        y: f64,
        #[serde(default, alias = "Z")]
        z: f64,
    },
    Text(String),
}

impl<'de> Deserialize<'de> for Anchor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match AnchorRepr::deserialize(deserializer)? {
            AnchorRepr::Object { x, y, z } => Ok(Anchor::new(x, y, z)),
            AnchorRepr::Text(text) => Anchor::parse_triple(&text).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid anchor {text:?}, expected \"x,y,z\""))
            }),
        }
    }
}

/// One entry of the ordered piece-placement list.
///
/// `rot_y` is always the grid rotation. It is written as `rotY`; a capitalized
/// `RotY` from an older file is a legacy yaw and is converted on load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "PlacedPieceRecord")]
pub struct PlacedPiece {
    pub piece_id: String,
    pub pos: Anchor,
    pub rot_y: Rotation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<MaterialId>,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct PlacedPieceRecord {
    #[serde(rename = "pieceId", alias = "PieceId")]
    piece_id: String,
    #[serde(rename = "pos", alias = "Pos")]
    pos: Anchor,
    #[serde(rename = "rotY")]
    rot_y: Option<Rotation>,
    #[serde(rename = "RotY")]
    legacy_yaw: Option<Rotation>,
    #[serde(rename = "material", alias = "Material")]
    material: Option<MaterialId>,
}

impl From<PlacedPieceRecord> for PlacedPiece {
    fn from(record: PlacedPieceRecord) -> Self {
        let rot_y = record
            .rot_y
            .or(record.legacy_yaw.map(Rotation::from_legacy_yaw))
            .unwrap_or_default();
        Self {
            piece_id: record.piece_id,
            pos: record.pos,
            rot_y,
            material: record.material,
        }
    }
}

impl PlacedPiece {
    pub fn new(piece_id: impl Into<String>, pos: Anchor, rot_y: Rotation) -> Self {
        Self {
            piece_id: piece_id.into(),
            pos,
            rot_y,
            material: None,
        }
    }

    pub fn with_material(mut self, material: MaterialId) -> Self {
        self.material = Some(material);
        self
    }

    /// Rotated footprint size, or `None` if the catalog doesn't know the id.
    pub fn footprint(&self, catalog: &dyn PieceCatalog) -> Option<Size3> {
        catalog
            .footprint(&self.piece_id)
            .map(|size| rotated_size(size, self.rot_y))
    }

    /// Voxel box covered by the piece at its floored anchor.
    pub fn footprint_box(&self, catalog: &dyn PieceCatalog) -> Option<VoxelBox> {
        self.footprint(catalog)
            .map(|size| VoxelBox::new(self.pos.floor(), size))
    }

    /// Material the footprint is baked with when the piece has no override.
    pub fn bake_material(&self, fallback: MaterialId) -> MaterialId {
        self.material.unwrap_or(fallback)
    }
}
