//! Concrete edit commands.

mod build_zone;
mod import;
mod merge;
mod paint;
mod place;

pub use build_zone::SetBuildZoneCommand;
pub use import::ImportSnippetCommand;
pub use merge::MergeBlueprintCommand;
pub use paint::{PaintVolumeCommand, PaintVoxelCommand};
pub use place::{PlacePieceAndVolumeCommand, PlacePieceCommand, RemovePieceCommand};

#[cfg(test)]
pub(crate) mod test_support {
    use voxplan_voxel::VoxelStore;

    use crate::catalog::PieceLibrary;
    use crate::command::{EditCommand, EditContext};
    use crate::piece::PlacedPiece;
    use crate::zone::{AltarState, BuildZone};

    /// Owned session state for driving commands in tests.
    #[derive(Default)]
    pub struct Fixture {
        pub store: VoxelStore,
        pub pieces: Vec<PlacedPiece>,
        pub zone: BuildZone,
        pub altar: AltarState,
        pub library: PieceLibrary,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                library: PieceLibrary::builtin(),
                ..Self::default()
            }
        }

        pub fn apply(&mut self, cmd: &mut dyn EditCommand) {
            cmd.apply(&mut self.context());
        }

        pub fn revert(&mut self, cmd: &mut dyn EditCommand) {
            cmd.revert(&mut self.context());
        }

        pub fn context(&mut self) -> EditContext<'_> {
            EditContext {
                store: &mut self.store,
                pieces: &mut self.pieces,
                zone: &mut self.zone,
                altar: &mut self.altar,
                catalog: &self.library,
            }
        }
    }
}
