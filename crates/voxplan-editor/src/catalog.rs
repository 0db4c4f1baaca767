//! Piece catalog: read-only lookup from piece id to footprint size.
//!
//! [`PieceLibrary`] is the JSON-backed catalog. Field names are camelCase;
//! capitalized keys from older library files are accepted as aliases, and any
//! missing field takes its default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voxplan_voxel::Size3;

/// Resolves piece ids to unrotated footprint sizes.
pub trait PieceCatalog {
    /// Returns `None` for unknown ids.
    fn footprint(&self, piece_id: &str) -> Option<Size3>;
}

/// Errors that can occur when loading a piece library file.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read piece library {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse piece library {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// World scale shared by libraries and projects.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Units {
    #[serde(alias = "VoxelSizeMeters")]
    pub voxel_size_meters: f64,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            voxel_size_meters: 0.5,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "DisplayName")]
    pub display_name: String,
}

/// One placeable piece.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PieceDef {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "DisplayName")]
    pub display_name: String,
    #[serde(alias = "CategoryId")]
    pub category_id: String,
    /// Unrotated size in voxels (x = width, y = length, z = height).
    #[serde(alias = "Size")]
    pub size: Size3,
    #[serde(alias = "ReservedOnly", skip_serializing_if = "Option::is_none")]
    pub reserved_only: Option<bool>,
}

/// A piece library file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PieceLibrary {
    #[serde(alias = "SchemaVersion")]
    pub schema_version: i32,
    #[serde(alias = "Units")]
    pub units: Units,
    #[serde(alias = "Categories")]
    pub categories: Vec<Category>,
    #[serde(alias = "Pieces")]
    pub pieces: Vec<PieceDef>,
}

impl PieceLibrary {
    /// The library used when no library file is configured.
    pub fn builtin() -> Self {
        Self {
            schema_version: 2,
            units: Units::default(),
            categories: vec![
                Category {
                    id: "WALL_1M".to_string(),
                    display_name: "Walls 1M".to_string(),
                },
                Category {
                    id: "ALTAR".to_string(),
                    display_name: "Flame Altar".to_string(),
                },
            ],
            pieces: vec![PieceDef {
                id: "base/wall/1m/panel/full".to_string(),
                display_name: "Wall 1M (2×4×1)".to_string(),
                category_id: "WALL_1M".to_string(),
                size: Size3::new(2, 4, 1),
                reserved_only: None,
            }],
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Loads a library from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let library = Self::from_json(&contents).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            pieces = library.pieces.len(),
            "loaded piece library"
        );
        Ok(library)
    }

    /// First piece with the given id.
    pub fn find(&self, piece_id: &str) -> Option<&PieceDef> {
        self.pieces.iter().find(|p| p.id == piece_id)
    }

    pub fn pieces_in_category<'a>(
        &'a self,
        category_id: &'a str,
    ) -> impl Iterator<Item = &'a PieceDef> + 'a {
        self.pieces
            .iter()
            .filter(move |p| p.category_id == category_id)
    }

    /// Adds or replaces a piece definition.
    pub fn insert(&mut self, def: PieceDef) {
        match self.pieces.iter_mut().find(|p| p.id == def.id) {
            Some(existing) => *existing = def,
            None => self.pieces.push(def),
        }
    }
}

impl PieceCatalog for PieceLibrary {
    fn footprint(&self, piece_id: &str) -> Option<Size3> {
        self.find(piece_id).map(|p| p.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_library_resolves_wall_panel() {
        let lib = PieceLibrary::builtin();
        assert_eq!(
            lib.footprint("base/wall/1m/panel/full"),
            Some(Size3::new(2, 4, 1))
        );
        assert_eq!(lib.footprint("missing"), None);
        assert_eq!(lib.pieces_in_category("WALL_1M").count(), 1);
    }

    #[test]
    fn test_parse_camel_case_with_defaults() {
        let json = r#"{
            "pieces": [
                { "id": "floor/2x2", "size": { "x": 2, "y": 2, "z": 1 } }
            ]
        }"#;
        let lib = PieceLibrary::from_json(json).unwrap();
        assert_eq!(lib.schema_version, 0);
        assert_eq!(lib.units.voxel_size_meters, 0.5);
        assert_eq!(lib.pieces[0].display_name, "");
        assert_eq!(lib.footprint("floor/2x2"), Some(Size3::new(2, 2, 1)));
    }

    #[test]
    fn test_parse_capitalized_keys() {
        let json = r#"{
            "SchemaVersion": 2,
            "Pieces": [
                { "Id": "roof/slope", "CategoryId": "ROOF", "Size": { "X": 4, "Y": 2, "Z": 2 } }
            ]
        }"#;
        let lib = PieceLibrary::from_json(json).unwrap();
        assert_eq!(lib.schema_version, 2);
        assert_eq!(lib.pieces[0].category_id, "ROOF");
        assert_eq!(lib.footprint("roof/slope"), Some(Size3::new(4, 2, 2)));
    }

    #[test]
    fn test_insert_replaces_existing() {
        let mut lib = PieceLibrary::builtin();
        lib.insert(PieceDef {
            id: "base/wall/1m/panel/full".to_string(),
            size: Size3::new(1, 1, 1),
            ..PieceDef::default()
        });
        assert_eq!(lib.pieces.len(), 1);
        assert_eq!(
            lib.footprint("base/wall/1m/panel/full"),
            Some(Size3::UNIT)
        );
    }

    #[test]
    fn test_load_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = PieceLibrary::load(&path).unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
        assert!(err.to_string().contains("nope.json"));
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lib.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            PieceLibrary::load(&path),
            Err(CatalogError::Parse { .. })
        ));
    }
}
