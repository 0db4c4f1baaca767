//! Build zone and altar state changes.

use crate::command::{EditCommand, EditContext};
use crate::zone::ZoneState;

/// Replaces the altar state and zone size; revert restores the previous ones.
#[derive(Debug)]
pub struct SetBuildZoneCommand {
    new: ZoneState,
    old: Option<ZoneState>,
}

impl SetBuildZoneCommand {
    pub fn new(state: ZoneState) -> Self {
        Self {
            new: state,
            old: None,
        }
    }

    fn write(ctx: &mut EditContext<'_>, state: ZoneState) {
        *ctx.altar = state.altar;
        ctx.zone.size_voxels = state.size_voxels;
    }
}

impl EditCommand for SetBuildZoneCommand {
    fn apply(&mut self, ctx: &mut EditContext<'_>) {
        self.old = Some(ZoneState {
            altar: *ctx.altar,
            size_voxels: ctx.zone.size_voxels,
        });
        Self::write(ctx, self.new);
    }

    fn revert(&mut self, ctx: &mut EditContext<'_>) {
        if let Some(old) = self.old.take() {
            Self::write(ctx, old);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::Fixture;
    use voxplan_voxel::{Size3, VoxelCoord};

    #[test]
    fn test_altar_then_revert() {
        let mut fx = Fixture::new();
        let zone_before = fx.zone.clone();
        let altar_before = fx.altar;

        let mut cmd = SetBuildZoneCommand::new(ZoneState::altar(80, VoxelCoord::new(0, 0, 0), 64));
        fx.apply(&mut cmd);
        assert!(fx.altar.placed);
        assert_eq!(fx.altar.build_size_vox, 80);
        assert_eq!(fx.zone.size_voxels, Size3::new(80, 80, 64));

        fx.revert(&mut cmd);
        assert_eq!(fx.zone, zone_before);
        assert_eq!(fx.altar, altar_before);
    }
}
