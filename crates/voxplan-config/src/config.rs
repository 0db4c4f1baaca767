//! Planner settings, persisted as `config.ron` in the platform config directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level planner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Editing and history settings.
    pub editor: EditorConfig,
    /// Defaults applied to new projects.
    pub project: ProjectConfig,
    /// Presentation-side preferences.
    pub ui: UiConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Editing configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorConfig {
    /// Maximum number of undoable commands kept on the history stack.
    pub max_undo_depth: usize,
    /// Node budget for hover region queries before falling back to a single cell.
    pub flood_fill_budget: usize,
    /// Minimum interval between pointer-driven redraws, in milliseconds.
    pub redraw_throttle_ms: u64,
    /// Palette index of the material selected on startup.
    pub default_material: i32,
}

/// Defaults for newly created projects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Build zone size in voxels `(x, y, z)`.
    pub build_zone_size: (i32, i32, i32),
    /// Edge length of one voxel in meters.
    pub voxel_size_meters: f64,
    /// Piece library JSON file. `None` uses the built-in library.
    pub library_path: Option<PathBuf>,
}

/// Presentation-side preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Theme name ("System", "Light", "Dark").
    pub theme: String,
    /// Whether the host should look for updates on startup.
    pub check_for_updates_on_start: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Also write JSON logs to the log directory (debug builds only).
    pub log_to_file: bool,
}

// --- Default implementations ---

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_undo_depth: 20,
            flood_fill_budget: 6000,
            redraw_throttle_ms: 16,
            default_material: 0,
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            build_zone_size: (320, 320, 64),
            voxel_size_meters: 0.5,
            library_path: None,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: "System".to_string(),
            check_for_updates_on_start: true,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_to_file: false,
        }
    }
}

// --- Persistence ---

impl Config {
    /// Reads `config.ron` from `config_dir`. A missing file is replaced by the
    /// defaults, which are written back so the user has something to edit.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("wrote default planner config to {}", path.display());
            return Ok(config);
        }
        let config = Self::read_from(&path)?;
        log::info!("planner config read from {}", path.display());
        Ok(config)
    }

    fn read_from(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = ron::from_str(&text).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values the editor cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.editor.flood_fill_budget == 0 {
            return Err(ConfigError::InvalidValue {
                field: "editor.flood_fill_budget",
                reason: "must be at least 1".to_string(),
            });
        }
        let (x, y, z) = self.project.build_zone_size;
        if x <= 0 || y <= 0 || z <= 0 {
            return Err(ConfigError::InvalidValue {
                field: "project.build_zone_size",
                reason: format!("all extents must be positive, got ({x}, {y}, {z})"),
            });
        }
        if self.project.voxel_size_meters.is_nan() || self.project.voxel_size_meters <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "project.voxel_size_meters",
                reason: format!("must be positive, got {}", self.project.voxel_size_meters),
            });
        }
        Ok(())
    }

    /// Writes the config as pretty RON, creating `config_dir` if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;
        std::fs::write(config_dir.join(CONFIG_FILE_NAME), text).map_err(ConfigError::WriteError)
    }

    /// Re-reads the file. `None` means nothing changed.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::read_from(&config_dir.join(CONFIG_FILE_NAME))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("planner config changed on disk");
        Ok(Some(fresh))
    }
}
