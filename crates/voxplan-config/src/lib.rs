//! Configuration system for the voxel planner.
//!
//! Provides runtime-configurable settings that persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, parse_cell};
pub use config::{CONFIG_FILE_NAME, Config, DebugConfig, EditorConfig, ProjectConfig, UiConfig};
pub use error::ConfigError;
