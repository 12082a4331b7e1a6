mod canvas;
mod models;
mod render;
mod utils;

use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;

/// Where the icons land, relative to the project root.
fn output_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets").join("icon")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;

    let out_dir = output_dir();
    log::info!("generating launcher icons into {}", out_dir.display());

    let written = render::generate_icons(&out_dir)?;
    for path in &written {
        println!("Wrote: {}", path.display());
    }
    Ok(())
}
