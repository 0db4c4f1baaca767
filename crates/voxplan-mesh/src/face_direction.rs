//! The six axis-aligned directions a voxel face can point.

/// A face direction. The discriminant is the direction index used in mesh
/// statistics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum FaceDirection {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl FaceDirection {
    /// All six directions in order.
    pub const ALL: [FaceDirection; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// Returns `(layer_axis, u_axis, v_axis)` with 0=X, 1=Y, 2=Z.
    ///
    /// `u × v` always points along the positive layer axis, so a quad
    /// traversed `(u,v) → (u+w,v) → (u+w,v+h)` faces the positive direction.
    pub fn sweep_axes(self) -> (usize, usize, usize) {
        match self {
            Self::PosX | Self::NegX => (0, 1, 2), // u=Y, v=Z
            Self::PosY | Self::NegY => (1, 2, 0), // u=Z, v=X
            Self::PosZ | Self::NegZ => (2, 0, 1), // u=X, v=Y
        }
    }

    /// Axis perpendicular to the face (0=X, 1=Y, 2=Z).
    pub fn axis(self) -> usize {
        self.sweep_axes().0
    }

    pub fn is_positive(self) -> bool {
        matches!(self, Self::PosX | Self::PosY | Self::PosZ)
    }

    /// Returns the unit normal as `[f32; 3]`.
    pub fn normal(self) -> [f32; 3] {
        let mut n = [0.0; 3];
        n[self.axis()] = if self.is_positive() { 1.0 } else { -1.0 };
        n
    }

    /// Returns the neighbour of `cell` in this direction.
    pub fn offset(self, cell: [i32; 3]) -> [i32; 3] {
        let mut out = cell;
        out[self.axis()] += if self.is_positive() { 1 } else { -1 };
        out
    }

    pub fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
            Self::PosZ => Self::NegZ,
            Self::NegZ => Self::PosZ,
        }
    }

    /// Returns the direction index (0–5).
    pub fn index(self) -> usize {
        self as usize
    }
}
