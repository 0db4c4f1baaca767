//! Command-line argument parsing for the planner.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Voxel planner command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "voxplan", about = "Voxel build planner")]
pub struct CliArgs {
    /// Project file to open.
    pub project: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Maximum undo depth.
    #[arg(long)]
    pub undo_depth: Option<usize>,

    /// Node budget for region queries.
    #[arg(long)]
    pub flood_budget: Option<usize>,

    /// Piece library JSON file.
    #[arg(long)]
    pub library: Option<PathBuf>,

    /// Snippet file to import into the project.
    #[arg(long)]
    pub import: Option<PathBuf>,

    /// Target cell for `--import`, as `x,y,z`.
    #[arg(long, value_parser = parse_cell, default_value = "0,0,0")]
    pub at: (i32, i32, i32),

    /// Rotation applied to the imported snippet (0, 90, 180, 270).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub rotate: i32,

    /// Report the connected region containing this cell, as `x,y,z`.
    #[arg(long, value_parser = parse_cell)]
    pub region: Option<(i32, i32, i32)>,

    /// Export the whole project as a snippet to this path.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Save the (possibly modified) project to this path.
    #[arg(long)]
    pub save: Option<PathBuf>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Parses `x,y,z` into an integer cell triple.
pub fn parse_cell(s: &str) -> Result<(i32, i32, i32), String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{s}'"));
    }
    let mut out = [0i32; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .map_err(|e| format!("invalid coordinate '{part}': {e}"))?;
    }
    Ok((out[0], out[1], out[2]))
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(depth) = args.undo_depth {
            self.editor.max_undo_depth = depth;
        }
        if let Some(budget) = args.flood_budget {
            self.editor.flood_fill_budget = budget;
        }
        if let Some(ref library) = args.library {
            self.project.library_path = Some(library.clone());
        }
    }
}
