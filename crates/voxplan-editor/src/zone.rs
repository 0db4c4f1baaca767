//! Build zone and flame-altar state.

use serde::{Deserialize, Serialize};
use voxplan_voxel::{Size3, VoxelCoord};

use crate::piece::Anchor;

/// Sandbox side length in voxels.
pub const SANDBOX_SIZE: i32 = 320;

/// Build sizes offered by the altar presets.
pub const ALTAR_BUILD_SIZES: [i32; 4] = [80, 160, 240, 320];

/// Offset from the snapped placement cell to the altar centre.
const ALTAR_CENTER_OFFSET: f64 = 4.0;

/// The build zone as persisted in project files.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuildZone {
    #[serde(alias = "Mode")]
    pub mode: String,
    #[serde(alias = "FlameAltarLevel")]
    pub flame_altar_level: i32,
    #[serde(alias = "SizeVoxels")]
    pub size_voxels: Size3,
    #[serde(alias = "Origin")]
    pub origin: String,
}

impl BuildZone {
    pub fn sandbox(size_voxels: Size3) -> Self {
        Self {
            size_voxels,
            ..Self::default()
        }
    }
}

impl Default for BuildZone {
    fn default() -> Self {
        Self {
            mode: "FLAME_ALTAR".to_string(),
            flame_altar_level: 1,
            size_voxels: Size3::new(SANDBOX_SIZE, SANDBOX_SIZE, 64),
            origin: "CRITER".to_string(),
        }
    }
}

/// Whether an altar is placed, its build size and its centre.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AltarState {
    pub placed: bool,
    pub build_size_vox: i32,
    pub center: Anchor,
}

impl AltarState {
    /// Centre of the zone footprint at half height; used after load.
    pub fn centered_in(size: Size3) -> Anchor {
        Anchor::new(
            f64::from(size.x) / 2.0,
            f64::from(size.y) / 2.0,
            f64::from(size.z) / 2.0,
        )
    }
}

/// Everything a build-zone change replaces, captured for undo.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneState {
    pub altar: AltarState,
    pub size_voxels: Size3,
}

impl ZoneState {
    /// Sandbox without an altar; keeps the current height.
    pub fn sandbox(height: i32) -> Self {
        let size_voxels = Size3::new(SANDBOX_SIZE, SANDBOX_SIZE, height);
        Self {
            altar: AltarState {
                placed: false,
                build_size_vox: 0,
                center: AltarState::centered_in(size_voxels),
            },
            size_voxels,
        }
    }

    /// Altar of `build_size` placed at the snapped cell; keeps the current height.
    pub fn altar(build_size: i32, snapped: VoxelCoord, height: i32) -> Self {
        Self {
            altar: AltarState {
                placed: true,
                build_size_vox: build_size,
                center: Anchor::new(
                    f64::from(snapped.x) + ALTAR_CENTER_OFFSET,
                    f64::from(snapped.y) + ALTAR_CENTER_OFFSET,
                    f64::from(height) / 2.0,
                ),
            },
            size_voxels: Size3::new(build_size, build_size, height),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sandbox_preset_centers_altar() {
        let state = ZoneState::sandbox(64);
        assert!(!state.altar.placed);
        assert_eq!(state.size_voxels, Size3::new(320, 320, 64));
        assert_eq!(state.altar.center, Anchor::new(160.0, 160.0, 32.0));
    }

    #[test]
    fn test_altar_preset_offsets_center() {
        let state = ZoneState::altar(160, VoxelCoord::new(10, 20, 0), 80);
        assert!(state.altar.placed);
        assert_eq!(state.altar.build_size_vox, 160);
        assert_eq!(state.size_voxels, Size3::new(160, 160, 80));
        assert_eq!(state.altar.center, Anchor::new(14.0, 24.0, 40.0));
    }
}
