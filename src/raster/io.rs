//! I/O boundary for rasters.
//!
//! - `from_rgba` / `to_rgba`: convert between flat RGBA byte buffers and the
//!   internal raster layout. Alpha is always discarded on the way in and
//!   forced fully opaque on the way out.
//! - `load_raster` / `save_raster`: read and write image files on disk.
//! - `write_json_file`: pretty-print a serializable value to disk.

use super::Raster;
use crate::errors::Error;
use image::RgbaImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Build a raster from a flat RGBA byte buffer.
///
/// With `channels == 1` the first three channels are averaged into a single
/// intensity value; otherwise up to three channels are copied directly. The
/// alpha channel is ignored in both cases.
pub fn from_rgba(
    bytes: &[u8],
    width: usize,
    height: usize,
    channels: usize,
) -> Result<Raster, Error> {
    if channels == 0 {
        return Err(Error::ZeroChannels);
    }
    let expected = width * height * 4;
    if bytes.len() != expected {
        return Err(Error::SampleCountMismatch {
            expected,
            actual: bytes.len(),
        });
    }

    let pixels = width * height;
    let mut data = vec![0.0f32; pixels * channels];
    if channels < 2 {
        for i in 0..pixels {
            let sum = bytes[i * 4] as f32 + bytes[i * 4 + 1] as f32 + bytes[i * 4 + 2] as f32;
            data[i] = sum / 3.0;
        }
    } else {
        for i in 0..pixels {
            for c in 0..channels.min(3) {
                data[i * channels + c] = bytes[i * 4 + c] as f32;
            }
        }
    }
    Raster::from_samples(width, height, channels, data)
}

/// Serialize a raster into an RGBA byte buffer.
///
/// A single channel is replicated across R, G and B; multi-channel rasters
/// map their first three channels directly. Alpha is fully opaque.
pub fn to_rgba(raster: &Raster) -> Vec<u8> {
    let channels = raster.channels();
    let pixels = raster.width() * raster.height();
    let samples = raster.samples();
    let mut bytes = vec![0u8; pixels * 4];
    for i in 0..pixels {
        for c in 0..3 {
            let channel = c.min(channels - 1);
            let v = samples[i * channels + channel];
            bytes[i * 4 + c] = v.clamp(0.0, 255.0).round() as u8;
        }
        bytes[i * 4 + 3] = 255;
    }
    bytes
}

/// Load an image from disk into a raster with the requested channel count.
pub fn load_raster(path: &Path, channels: usize) -> Result<Raster, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    from_rgba(img.as_raw(), width, height, channels)
        .map_err(|e| format!("Failed to convert {}: {e}", path.display()))
}

/// Save a raster to disk as an RGBA image, clamping samples into [0, 255].
pub fn save_raster(raster: &Raster, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let bytes = to_rgba(raster);
    let img: RgbaImage =
        RgbaImage::from_raw(raster.width() as u32, raster.height() as u32, bytes)
            .ok_or_else(|| "Failed to create image buffer".to_string())?;
    img.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
