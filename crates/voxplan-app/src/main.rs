//! The `voxplan` command-line host.
//!
//! Opens (or starts) a project, optionally imports a snippet, answers a region
//! query, exports and saves, then prints a summary of the resulting plan.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use voxplan_app::{AppError, Planner, PlatformDirs};
use voxplan_config::{CliArgs, Config};
use voxplan_editor::{PieceLibrary, Rotation, Snippet};
use voxplan_voxel::VoxelCoord;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("voxplan: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = match args.config.as_deref() {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => PlatformDirs::resolve()?,
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(args);
    config.validate()?;

    voxplan_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let library = match config.project.library_path.as_deref() {
        Some(path) => PieceLibrary::load(path)?,
        None => PieceLibrary::builtin(),
    };
    info!(pieces = library.pieces.len(), "piece library ready");

    let mut planner = Planner::from_config(&config, Box::new(library));

    if let Some(project) = args.project.as_deref() {
        planner.load_project(project)?;
    }

    if let Some(snippet_path) = args.import.as_deref() {
        let snippet = Snippet::load(snippet_path)?;
        let rotation = Rotation::from_degrees(args.rotate)?;
        planner.import_snippet(&snippet, VoxelCoord::from(args.at), rotation);
    }

    if let Some(cell) = args.region {
        let cell = VoxelCoord::from(cell);
        match planner.session().region_at(cell) {
            Some(query) => {
                let b = query.bounds();
                println!(
                    "region at {cell}: min {} size {}x{}x{}{}",
                    b.min,
                    b.size.x,
                    b.size.y,
                    b.size.z,
                    if query.is_truncated() { " (budget exceeded)" } else { "" }
                );
            }
            None => println!("region at {cell}: empty"),
        }
    }

    if let Some(path) = args.export.as_deref() {
        planner.session().export_snippet().save(path)?;
    }

    if let Some(path) = args.save.as_deref() {
        planner.save_project(path)?;
    }

    println!("voxplan");
    println!("{}", planner.stats());
    for batch in planner.meshes().draw_batches() {
        let [r, g, b] = batch.color.map(|c| (c * 255.0).round() as u8);
        println!(
            "  {:<18} #{r:02x}{g:02x}{b:02x}  {} quads",
            batch.material.name(),
            batch.mesh.quad_count()
        );
    }
    Ok(())
}
