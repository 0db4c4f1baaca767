//! Schema-versioned JSON project files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxplan_voxel::VoxelStore;

use crate::catalog::Units;
use crate::piece::PlacedPiece;
use crate::snippet::VoxelPaint;
use crate::zone::BuildZone;

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: i32 = 2;

/// Errors that can occur when reading or writing project and snippet files.
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("project schema version {found} is newer than supported version {supported}")]
    UnsupportedSchema { found: i32, supported: i32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectFile {
    #[serde(alias = "SchemaVersion")]
    pub schema_version: i32,
    #[serde(alias = "BuildZone")]
    pub build_zone: BuildZone,
    #[serde(alias = "Units")]
    pub units: Units,
    #[serde(alias = "PlacedPieces")]
    pub placed_pieces: Vec<PlacedPiece>,
    #[serde(alias = "Voxels")]
    pub voxels: Vec<VoxelPaint>,
    #[serde(alias = "AltarPlaced")]
    pub altar_placed: bool,
    #[serde(alias = "AltarBuildSizeVox")]
    pub altar_build_size_vox: i32,
}

impl Default for ProjectFile {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            build_zone: BuildZone::default(),
            units: Units::default(),
            placed_pieces: Vec::new(),
            voxels: Vec::new(),
            altar_placed: false,
            altar_build_size_vox: 0,
        }
    }
}

impl ProjectFile {
    /// Parses a project without migrating it.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Brings the project to the current schema.
    ///
    /// Files without a version (or with a non-positive one) predate
    /// versioning and are read as the current schema.
    pub fn migrate(mut self) -> Result<Self, ProjectError> {
        if self.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(ProjectError::UnsupportedSchema {
                found: self.schema_version,
                supported: CURRENT_SCHEMA_VERSION,
            });
        }
        if self.schema_version <= 0 {
            tracing::debug!(from = self.schema_version, to = CURRENT_SCHEMA_VERSION, "migrating project schema");
            self.schema_version = CURRENT_SCHEMA_VERSION;
        }
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String, ProjectError> {
        serde_json::to_string_pretty(self).map_err(ProjectError::Serialize)
    }

    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ProjectError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let project = Self::from_json(&contents)
            .map_err(|source| ProjectError::Parse {
                path: path.to_path_buf(),
                source,
            })?
            .migrate()?;
        tracing::info!(
            path = %path.display(),
            pieces = project.placed_pieces.len(),
            voxels = project.voxels.len(),
            "loaded project"
        );
        Ok(project)
    }

    /// Writes pretty-printed JSON stamped with the current schema version.
    pub fn save(&mut self, path: &Path) -> Result<(), ProjectError> {
        self.schema_version = CURRENT_SCHEMA_VERSION;
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| ProjectError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "saved project");
        Ok(())
    }

    /// Store rebuilt from the voxel list; later duplicates win.
    pub fn build_store(&self) -> VoxelStore {
        self.voxels.iter().map(|v| (v.coord(), v.material())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::{Anchor, Rotation};
    use voxplan_voxel::{MaterialId, Size3, VoxelCoord};

    #[test]
    fn test_missing_fields_default() {
        let p = ProjectFile::from_json("{}").unwrap();
        assert_eq!(p.schema_version, CURRENT_SCHEMA_VERSION);
        assert!(p.placed_pieces.is_empty());
        assert_eq!(p.units.voxel_size_meters, 0.5);
    }

    #[test]
    fn test_schema_zero_migrates() {
        let p = ProjectFile::from_json(r#"{"schemaVersion": 0}"#)
            .unwrap()
            .migrate()
            .unwrap();
        assert_eq!(p.schema_version, 2);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let err = ProjectFile::from_json(r#"{"schemaVersion": 3}"#)
            .unwrap()
            .migrate()
            .unwrap_err();
        assert!(matches!(err, ProjectError::UnsupportedSchema { found: 3, supported: 2 }));
    }

    #[test]
    fn test_reads_capitalized_legacy_file() {
        let json = r#"{
            "SchemaVersion": 1,
            "BuildZone": { "Mode": "FLAME_ALTAR", "FlameAltarLevel": 2,
                           "SizeVoxels": { "X": 80, "Y": 80, "Z": 40 }, "Origin": "CRITER" },
            "PlacedPieces": [ { "PieceId": "base/wall/1m/panel/full", "Pos": "2,3,0", "RotY": 90 } ],
            "Voxels": [ { "X": 1, "Y": 1, "Z": 1, "Material": 5 } ],
            "AltarPlaced": true,
            "AltarBuildSizeVox": 80
        }"#;
        let p = ProjectFile::from_json(json).unwrap().migrate().unwrap();
        assert_eq!(p.schema_version, 1);
        assert_eq!(p.build_zone.size_voxels, Size3::new(80, 80, 40));
        assert_eq!(p.build_zone.flame_altar_level, 2);
        assert_eq!(p.placed_pieces[0].pos, Anchor::new(2.0, 3.0, 0.0));
        // Legacy yaw 90 is the unrotated grid placement.
        assert_eq!(p.placed_pieces[0].rot_y, Rotation::Deg0);
        assert!(p.altar_placed);
        assert_eq!(
            p.build_store().get(VoxelCoord::new(1, 1, 1)),
            Some(MaterialId::BrickRed)
        );
    }

    #[test]
    fn test_build_store_last_duplicate_wins() {
        let c = VoxelCoord::new(0, 0, 0);
        let p = ProjectFile {
            voxels: vec![
                VoxelPaint::new(c, MaterialId::GlowRed),
                VoxelPaint::new(c, MaterialId::GlowBlue),
            ],
            ..ProjectFile::default()
        };
        let store = p.build_store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(c), Some(MaterialId::GlowBlue));
    }

    #[test]
    fn test_save_stamps_version_and_writes_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let mut p = ProjectFile {
            schema_version: 0,
            ..ProjectFile::default()
        };
        p.save(&path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"schemaVersion\": 2"));
        assert!(text.contains("\"placedPieces\""));
        assert_eq!(ProjectFile::load(&path).unwrap(), p);
    }

    #[test]
    fn test_load_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = ProjectFile::load(&path).unwrap_err();
        assert!(matches!(err, ProjectError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
