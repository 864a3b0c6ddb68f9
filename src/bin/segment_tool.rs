use pixelkit::config::segment::load_config;
use pixelkit::raster::io::{load_raster, save_raster};
use pixelkit::segmentation::KMeansSegmentation;
use std::env;
use std::path::Path;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = load_config(Path::new(&config_path))?;

    let raster = load_raster(&config.input, 3)?;
    let segmentation = KMeansSegmentation::new(config.segmentation)
        .map_err(|e| format!("Invalid segmentation configuration: {e}"))?;
    let segmented = segmentation
        .run(&raster)
        .map_err(|e| format!("Segmentation failed: {e}"))?;

    save_raster(&segmented, &config.output.segmented_image)?;
    println!(
        "Saved segmented image to {}",
        config.output.segmented_image.display()
    );

    Ok(())
}

fn usage() -> String {
    "Usage: segment_tool <config.json>".to_string()
}
