//! Platform directory resolution.
//!
//! Config and logs live under the OS configuration directory, project data
//! under the OS data directory.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during platform operations.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("could not determine OS configuration directory")]
    NoConfigDir,

    #[error("platform I/O error: {0}")]
    Io(#[from] io::Error),
}

/// OS-specific directory paths for the planner.
///
/// Each field resolves to the platform-appropriate location (XDG on Linux,
/// Known Folders on Windows, Library on macOS).
#[derive(Debug, Clone)]
pub struct PlatformDirs {
    /// `config.ron`.
    pub config_dir: PathBuf,
    /// Default location for projects and snippets.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

pub const APP_NAME: &str = "voxplan";

impl PlatformDirs {
    /// Resolves directories without creating them on disk.
    pub fn resolve() -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let app_config = config_base.join(APP_NAME);

        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| app_config.clone())
            .join(APP_NAME);

        Ok(Self {
            config_dir: app_config.clone(),
            data_dir,
            log_dir: app_config.join("logs"),
        })
    }

    /// Directories rooted under an explicit config directory (`--config`).
    pub fn with_config_dir(config_dir: &Path) -> Self {
        Self {
            config_dir: config_dir.to_path_buf(),
            data_dir: config_dir.join("data"),
            log_dir: config_dir.join("logs"),
        }
    }

    pub fn create_dirs(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_dirs_resolve() {
        let Ok(dirs) = PlatformDirs::resolve() else {
            // Headless CI images may not expose a config directory.
            return;
        };
        assert!(dirs.config_dir.ends_with(APP_NAME));
        assert!(dirs.log_dir.starts_with(&dirs.config_dir));
        assert!(dirs.data_dir.ends_with(APP_NAME));
    }

    #[test]
    fn test_directory_creation() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::with_config_dir(&tmp.path().join("cfg"));
        dirs.create_dirs().unwrap();

        assert!(dirs.config_dir.exists());
        assert!(dirs.data_dir.exists());
        assert!(dirs.log_dir.exists());
    }
}
