//! Palette materials and their dense-chunk encoding.
//!
//! Persisted files store materials as integer indices. Inside a
//! [`VoxelChunk`](crate::VoxelChunk) every material is stored as
//! `index + 1` so that code 0 always means empty.

use serde::{Deserialize, Serialize};

/// A palette material, or the distinguished "no material" value.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(from = "i32", into = "i32")]
#[repr(u8)]
pub enum MaterialId {
    #[default]
    StoneGrayLight = 0,
    StoneGrayDark = 1,
    WoodBrownLight = 2,
    WoodBrownDark = 3,
    BrickSand = 4,
    BrickRed = 5,
    MetalLight = 6,
    MetalDark = 7,
    GlowYellow = 8,
    GlowBlue = 9,
    GlowRed = 10,
    GlowWhite = 11,
    /// Used for pieces without an override and for unknown indices.
    NoMaterial = 100,
}

impl MaterialId {
    /// The twelve selectable palette entries, in index order.
    pub const PALETTE: [MaterialId; 12] = [
        MaterialId::StoneGrayLight,
        MaterialId::StoneGrayDark,
        MaterialId::WoodBrownLight,
        MaterialId::WoodBrownDark,
        MaterialId::BrickSand,
        MaterialId::BrickRed,
        MaterialId::MetalLight,
        MaterialId::MetalDark,
        MaterialId::GlowYellow,
        MaterialId::GlowBlue,
        MaterialId::GlowRed,
        MaterialId::GlowWhite,
    ];

    /// Maps a persisted index to a material. Negative or unknown indices
    /// become [`MaterialId::NoMaterial`].
    pub fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::PALETTE.get(i).copied())
            .unwrap_or(MaterialId::NoMaterial)
    }

    /// The persisted integer index.
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Dense-chunk code: `index + 1`, never 0.
    pub fn chunk_code(self) -> u16 {
        self as u16 + 1
    }

    /// Inverse of [`chunk_code`](Self::chunk_code). Returns `None` for the
    /// empty code 0.
    pub fn from_chunk_code(code: u16) -> Option<Self> {
        match code {
            0 => None,
            c => Some(Self::from_index(i32::from(c) - 1)),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MaterialId::StoneGrayLight => "Stone Gray Light",
            MaterialId::StoneGrayDark => "Stone Gray Dark",
            MaterialId::WoodBrownLight => "Wood Brown Light",
            MaterialId::WoodBrownDark => "Wood Brown Dark",
            MaterialId::BrickSand => "Brick Sand",
            MaterialId::BrickRed => "Brick Red",
            MaterialId::MetalLight => "Metal Light",
            MaterialId::MetalDark => "Metal Dark",
            MaterialId::GlowYellow => "Glow Yellow",
            MaterialId::GlowBlue => "Glow Blue",
            MaterialId::GlowRed => "Glow Red",
            MaterialId::GlowWhite => "Glow White",
            MaterialId::NoMaterial => "No Material",
        }
    }

    /// Display color as linear RGB in `0.0..=1.0`.
    pub fn color(self) -> [f32; 3] {
        match self {
            MaterialId::StoneGrayLight => [0.72, 0.72, 0.70],
            MaterialId::StoneGrayDark => [0.38, 0.38, 0.37],
            MaterialId::WoodBrownLight => [0.66, 0.49, 0.31],
            MaterialId::WoodBrownDark => [0.36, 0.24, 0.14],
            MaterialId::BrickSand => [0.82, 0.72, 0.52],
            MaterialId::BrickRed => [0.62, 0.22, 0.17],
            MaterialId::MetalLight => [0.78, 0.80, 0.83],
            MaterialId::MetalDark => [0.30, 0.32, 0.35],
            MaterialId::GlowYellow => [1.00, 0.88, 0.30],
            MaterialId::GlowBlue => [0.35, 0.65, 1.00],
            MaterialId::GlowRed => [1.00, 0.30, 0.25],
            MaterialId::GlowWhite => [1.00, 1.00, 1.00],
            MaterialId::NoMaterial => [0.25, 0.45, 0.95],
        }
    }
}

impl From<i32> for MaterialId {
    fn from(index: i32) -> Self {
        Self::from_index(index)
    }
}

impl From<MaterialId> for i32 {
    fn from(id: MaterialId) -> Self {
        id.index()
    }
}

impl std::fmt::Display for MaterialId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
