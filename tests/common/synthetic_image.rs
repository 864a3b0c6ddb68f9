use pixelkit::raster::Raster;

/// Generates a solid single-color image.
pub fn solid(width: usize, height: usize, channels: usize, value: f32) -> Raster {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    Raster::filled(width, height, channels, value).expect("valid raster shape")
}

/// Generates a single-channel image that is `left` on the left half and
/// `right` on the right half, with the step at `width / 2`.
pub fn vertical_step(width: usize, height: usize, left: f32, right: f32) -> Raster {
    assert!(width > 1 && height > 0, "image dimensions must be positive");
    let mut img = Raster::filled(width, height, 1, left).expect("valid raster shape");
    for i in 0..height {
        for j in width / 2..width {
            img.set(i, j, 0, right);
        }
    }
    img
}

/// Generates a 3-channel image split into two solid color halves.
pub fn color_halves(width: usize, height: usize, top: [f32; 3], bottom: [f32; 3]) -> Raster {
    assert!(width > 0 && height > 1, "image dimensions must be positive");
    let mut img = Raster::new(width, height, 3).expect("valid raster shape");
    for i in 0..height {
        let color = if i < height / 2 { top } else { bottom };
        for j in 0..width {
            for (c, &v) in color.iter().enumerate() {
                img.set(i, j, c, v);
            }
        }
    }
    img
}
