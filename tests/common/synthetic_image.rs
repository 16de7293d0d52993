use perceptual_metrics::image::RgbaRaster;

/// Raster where every pixel has gray level `value`.
pub fn uniform_gray(width: usize, height: usize, value: u8) -> RgbaRaster {
    RgbaRaster::filled(width, height, [value, value, value, 255])
}

/// Left half `lo`, right half `hi` (split at `width / 2`).
pub fn vertical_split(width: usize, height: usize, lo: u8, hi: u8) -> RgbaRaster {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    let mut data = Vec::with_capacity(width * height * 4);
    for _y in 0..height {
        for x in 0..width {
            let v = if x < width / 2 { lo } else { hi };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    RgbaRaster::new(width, height, data).expect("buffer sized for raster")
}

/// Generates a simple high-contrast checkerboard image.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> RgbaRaster {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(cell > 0, "cell size must be positive");

    let mut data = Vec::with_capacity(width * height * 4);
    for y in 0..height {
        for x in 0..width {
            let sum = x / cell + y / cell;
            let val = if sum & 1 == 0 { 32u8 } else { 220u8 };
            data.extend_from_slice(&[val, val, val, 255]);
        }
    }
    RgbaRaster::new(width, height, data).expect("buffer sized for raster")
}

/// Colored disc on a contrasting background.
pub fn disc(size: usize, radius: f64) -> RgbaRaster {
    let c = (size as f64 - 1.0) / 2.0;
    let mut data = Vec::with_capacity(size * size * 4);
    for y in 0..size {
        for x in 0..size {
            let d = ((x as f64 - c).powi(2) + (y as f64 - c).powi(2)).sqrt();
            let px = if d <= radius {
                [20, 160, 230, 255]
            } else {
                [200, 190, 120, 255]
            };
            data.extend_from_slice(&px);
        }
    }
    RgbaRaster::new(size, size, data).expect("buffer sized for raster")
}
