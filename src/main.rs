use pixelkit::convolve::{convolve, ConvolveOptions};
use pixelkit::edges::{Canny, CannyOptions};
use pixelkit::filters::Sobel;
use pixelkit::raster::Raster;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), pixelkit::Error> {
    // Demo stub: builds a synthetic two-tone image and runs the edge pipeline
    let width = 64usize;
    let height = 64usize;
    let mut image = Raster::new(width, height, 1)?;
    for i in 0..height {
        for j in width / 2..width {
            image.set(i, j, 0, 255.0);
        }
    }

    // Raw gradient estimate: combine the two Sobel half-gradients.
    let sobel = Sobel::new();
    let opts = ConvolveOptions::default();
    let mut combined = convolve(&image, sobel.horizontal_kernel(), &opts)?;
    let vertical = convolve(&image, sobel.vertical_kernel(), &opts)?;
    combined.add(&vertical);
    println!("gradient max={:.1}", combined.max_sample());

    let canny = Canny::new(CannyOptions::default())?;
    let (_, trace) = canny.run_with_trace(&image)?;
    println!(
        "edge_pixels={} total_ms={:.3}",
        trace.edge_pixels, trace.total_ms
    );
    Ok(())
}
