use thiserror::Error;
use voxplan_config::ConfigError;
use voxplan_editor::{CatalogError, InvalidRotation, ProjectError};

use crate::platform::PlatformError;

/// Errors that end a command-line run.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Project(#[from] ProjectError),

    #[error("invalid --rotate value: {0}")]
    Rotation(#[from] InvalidRotation),
}
