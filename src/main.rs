//! Haunted Path: walk a grid of screens, paint walls, export the result.
mod config;
mod engine;
mod logging;
mod map;
mod tui;

use anyhow::Result;
use config::GameConfig;
use engine::game_loop::run;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = GameConfig::from_env();
    logging::setup_logging(config.log_dir.as_deref())?;

    let exports = run(&config)?;
    for export in &exports {
        println!("{export}");
    }
    if let (false, Some(path)) = (exports.is_empty(), &config.export_path) {
        println!("Exports also appended to {}", path.display());
    }
    Ok(())
}
