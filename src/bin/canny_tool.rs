use pixelkit::config::canny::load_config;
use pixelkit::edges::Canny;
use pixelkit::raster::io::{load_raster, save_raster, write_json_file};
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

    let raster = load_raster(&config.input, 1)?;
    let canny =
        Canny::new(config.canny).map_err(|e| format!("Invalid Canny configuration: {e}"))?;
    let (edges, trace) = canny
        .run_with_trace(&raster)
        .map_err(|e| format!("Edge detection failed: {e}"))?;

    save_raster(&edges, &config.output.edges_image)?;
    if let Some(trace_path) = &config.output.trace_json {
        write_json_file(trace_path, &trace)?;
    }

    println!(
        "Saved edge map to {} ({} edge pixels, {:.3} ms)",
        config.output.edges_image.display(),
        trace.edge_pixels,
        trace.total_ms
    );

    Ok(())
}

fn usage() -> String {
    "Usage: canny_tool <config.json>".to_string()
}
